//! Ready-made checks for the registered time claims, built for
//! [`VerificationRegistry::register`](crate::registry::VerificationRegistry::register)
//! or [`ClaimsVerifierBuilder::with_check`](crate::verifier::ClaimsVerifierBuilder::with_check).
//! Both resolve the allowed drift from the context the same way
//! [`DriftChecker`] does.

use crate::claims::{ClaimSet, ClaimValue, Options};
use crate::config::ConfigAccess;
use crate::drift::{Clock, DriftChecker};
use crate::error::{VerifyError, VerifyResult};

/// Check for `exp`-style claims: the timestamp must not be in the past,
/// beyond the allowed drift. A present but non-integer value is rejected;
/// an absent one passes (there is nothing to check).
pub fn expiration<Ctx, C>(
    clock: C,
) -> impl Fn(&Ctx, &str, ClaimSet, &Options) -> VerifyResult<ClaimSet> + Send + Sync
where
    Ctx: ConfigAccess,
    C: Clock + Send + Sync,
{
    let drift = DriftChecker::with_clock(clock);
    move |ctx: &Ctx, key: &str, claims: ClaimSet, _options: &Options| {
        match claims.get(key).map(ClaimValue::as_i64) {
            None => Ok(claims),
            Some(None) => Err(VerifyError::ClaimRejected(key.to_owned())),
            Some(Some(expires_at)) => {
                if drift.clock().now() <= expires_at || drift.is_within_drift(ctx, Some(expires_at))
                {
                    Ok(claims)
                } else {
                    Err(VerifyError::ClaimRejected(key.to_owned()))
                }
            }
        }
    }
}

/// Check for `nbf`-style claims: the timestamp must already have been
/// reached, within the allowed drift. Missing/malformed handling matches
/// [`expiration`].
pub fn not_before<Ctx, C>(
    clock: C,
) -> impl Fn(&Ctx, &str, ClaimSet, &Options) -> VerifyResult<ClaimSet> + Send + Sync
where
    Ctx: ConfigAccess,
    C: Clock + Send + Sync,
{
    let drift = DriftChecker::with_clock(clock);
    move |ctx: &Ctx, key: &str, claims: ClaimSet, _options: &Options| {
        match claims.get(key).map(ClaimValue::as_i64) {
            None => Ok(claims),
            Some(None) => Err(VerifyError::ClaimRejected(key.to_owned())),
            Some(Some(starts_at)) => {
                if starts_at <= drift.clock().now() || drift.is_within_drift(ctx, Some(starts_at)) {
                    Ok(claims)
                } else {
                    Err(VerifyError::ClaimRejected(key.to_owned()))
                }
            }
        }
    }
}

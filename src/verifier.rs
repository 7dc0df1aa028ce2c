use tracing::debug;

use crate::claims::{ClaimSet, Options};
use crate::error::VerifyResult;
use crate::registry::VerificationRegistry;

/// Runs every claim in a set through the registry, fail-fast.
pub struct ClaimsVerifier<Ctx> {
    registry: VerificationRegistry<Ctx>,
}

impl<Ctx> ClaimsVerifier<Ctx> {
    /// A verifier with no registered checks accepts every claim set.
    pub fn new() -> Self {
        Self {
            registry: VerificationRegistry::new(),
        }
    }

    pub fn with_registry(registry: VerificationRegistry<Ctx>) -> Self {
        Self { registry }
    }

    pub fn builder() -> ClaimsVerifierBuilder<Ctx> {
        ClaimsVerifierBuilder::new()
    }

    pub fn registry(&self) -> &VerificationRegistry<Ctx> {
        &self.registry
    }

    /// Verify each claim in claim-set order. Checks see the set as
    /// transformed by earlier checks, and the final set is returned. The
    /// first failure wins: no later check runs once one claim has been
    /// rejected, so its side effects never execute and later failures are
    /// never reported.
    pub fn verify_claims(
        &self,
        ctx: &Ctx,
        claims: &ClaimSet,
        options: &Options,
    ) -> VerifyResult<ClaimSet> {
        // snapshot the key list; checks replace the working set
        let keys: Vec<String> = claims.keys().map(str::to_owned).collect();
        let mut current = claims.clone();
        for key in &keys {
            match self.registry.verify_claim(ctx, key, current, options) {
                Ok(next) => current = next,
                Err(err) => {
                    debug!(claim = %key, "claim rejected");
                    return Err(err);
                }
            }
        }
        debug!(claims = keys.len(), "claim set verified");
        Ok(current)
    }
}

impl<Ctx> Default for ClaimsVerifier<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ClaimsVerifierBuilder<Ctx> {
    registry: VerificationRegistry<Ctx>,
}

impl<Ctx> ClaimsVerifierBuilder<Ctx> {
    fn new() -> Self {
        Self {
            registry: VerificationRegistry::new(),
        }
    }

    pub fn with_registry(mut self, registry: VerificationRegistry<Ctx>) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_check<F>(mut self, key: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Ctx, &str, ClaimSet, &Options) -> VerifyResult<ClaimSet> + Send + Sync + 'static,
    {
        self.registry.register(key, check);
        self
    }

    pub fn build(self) -> ClaimsVerifier<Ctx> {
        ClaimsVerifier {
            registry: self.registry,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::claims::ClaimValue;
    use crate::error::VerifyError;

    #[test]
    fn empty_registry_accepts_any_claim_set() {
        let verifier = ClaimsVerifier::<()>::new();
        let claims = ClaimSet::new().with("iss", "issuer").with("exp", 100i64);
        let verified = verifier
            .verify_claims(&(), &claims, &Options::new())
            .expect("accepted");
        assert_eq!(verified, claims);
    }

    #[test]
    fn first_failure_wins_and_later_checks_never_run() {
        let invoked = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&invoked);
        let verifier = ClaimsVerifier::<()>::builder()
            .with_check("b", |_ctx, key, _claims: ClaimSet, _options| {
                Err(VerifyError::ClaimRejected(key.to_owned()))
            })
            .with_check("c", move |_ctx, key, _claims: ClaimSet, _options| {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(VerifyError::ClaimRejected(key.to_owned()))
            })
            .build();

        let claims = ClaimSet::new()
            .with("a", "fine")
            .with("b", "bad")
            .with("c", "also bad");
        let err = verifier
            .verify_claims(&(), &claims, &Options::new())
            .expect_err("rejected");

        assert_eq!(err, VerifyError::ClaimRejected("b".into()));
        assert_eq!(invoked.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn normalization_threads_through_to_later_checks() {
        let verifier = ClaimsVerifier::<()>::builder()
            .with_check("iss", |_ctx, key, mut claims: ClaimSet, _options| {
                claims.insert(key, "normalized");
                Ok(claims)
            })
            .with_check("sub", |_ctx, key, claims: ClaimSet, _options| {
                // runs after "iss" in claim-set order and must see its output
                match claims.get("iss").and_then(ClaimValue::as_str) {
                    Some("normalized") => Ok(claims),
                    _ => Err(VerifyError::ClaimRejected(key.to_owned())),
                }
            })
            .build();

        let claims = ClaimSet::new().with("iss", "raw").with("sub", "user");
        let verified = verifier
            .verify_claims(&(), &claims, &Options::new())
            .expect("accepted");
        assert_eq!(
            verified.get("iss"),
            Some(&ClaimValue::String("normalized".into()))
        );
        // input set untouched
        assert_eq!(claims.get("iss"), Some(&ClaimValue::String("raw".into())));
    }
}

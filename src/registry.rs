use std::collections::HashMap;

use crate::claims::{ClaimSet, Options};
use crate::error::VerifyResult;

/// A per-claim verification strategy. Receives the opaque context, the
/// claim key being checked, the current claim set, and the caller's
/// options; returns the (possibly normalized) claim set or the failing
/// key. A check may replace the value of the key it checks, but must not
/// add or remove claims.
pub type ClaimCheck<Ctx> =
    Box<dyn Fn(&Ctx, &str, ClaimSet, &Options) -> VerifyResult<ClaimSet> + Send + Sync>;

/// Dispatches verification per claim key. Keys without a registered check
/// are implicitly accepted unchanged.
pub struct VerificationRegistry<Ctx> {
    checks: HashMap<String, ClaimCheck<Ctx>>,
}

impl<Ctx> VerificationRegistry<Ctx> {
    pub fn new() -> Self {
        Self {
            checks: HashMap::new(),
        }
    }

    /// Install or replace the check for a claim key.
    pub fn register<F>(&mut self, key: impl Into<String>, check: F)
    where
        F: Fn(&Ctx, &str, ClaimSet, &Options) -> VerifyResult<ClaimSet> + Send + Sync + 'static,
    {
        self.checks.insert(key.into(), Box::new(check));
    }

    pub fn has_check(&self, key: &str) -> bool {
        self.checks.contains_key(key)
    }

    pub fn verify_claim(
        &self,
        ctx: &Ctx,
        key: &str,
        claims: ClaimSet,
        options: &Options,
    ) -> VerifyResult<ClaimSet> {
        match self.checks.get(key) {
            Some(check) => check(ctx, key, claims, options),
            None => Ok(claims),
        }
    }
}

impl<Ctx> Default for VerificationRegistry<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration key holding the allowed clock drift in milliseconds.
pub const ALLOWED_DRIFT_KEY: &str = "allowed_drift";

/// Resolves a named configuration value for the owning verification
/// context, falling back to `default` when the key is unset. This crate
/// only ever requests [`ALLOWED_DRIFT_KEY`].
pub trait ConfigAccess {
    fn config_value(&self, key: &str, default: i64) -> i64;
}

/// Runtime configuration for claims verification.
#[derive(Debug, Clone, Default)]
pub struct VerifyConfig {
    allowed_drift_millis: Option<i64>,
}

impl VerifyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow clock drift of `millis` when checking timestamp claims.
    pub fn with_allowed_drift(mut self, millis: i64) -> Self {
        self.allowed_drift_millis = Some(millis);
        self
    }
}

impl ConfigAccess for VerifyConfig {
    fn config_value(&self, key: &str, default: i64) -> i64 {
        match key {
            ALLOWED_DRIFT_KEY => self.allowed_drift_millis.unwrap_or(default),
            _ => default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_drift_resolves_to_default() {
        let config = VerifyConfig::new();
        assert_eq!(config.config_value(ALLOWED_DRIFT_KEY, 0), 0);
        assert_eq!(config.config_value(ALLOWED_DRIFT_KEY, 5000), 5000);
    }

    #[test]
    fn configured_drift_overrides_default() {
        let config = VerifyConfig::new().with_allowed_drift(30_000);
        assert_eq!(config.config_value(ALLOWED_DRIFT_KEY, 0), 30_000);
    }

    #[test]
    fn unknown_keys_resolve_to_default() {
        let config = VerifyConfig::new().with_allowed_drift(30_000);
        assert_eq!(config.config_value("token_ttl", 7), 7);
    }
}

use thiserror::Error;

pub type VerifyResult<T> = Result<T, VerifyError>;

/// A verification failure, carrying the key of the first claim that failed.
/// Verification is fail-fast: only the first failure in iteration order is
/// ever reported. Mapping a failure onto a transport-level response is the
/// enclosing pipeline's job.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("claim '{0}' failed verification")]
    ClaimRejected(String),
    #[error("claim '{0}' does not match the expected value")]
    LiteralMismatch(String),
}

impl VerifyError {
    /// The key of the claim that failed.
    pub fn claim_key(&self) -> &str {
        match self {
            VerifyError::ClaimRejected(key) | VerifyError::LiteralMismatch(key) => key,
        }
    }
}

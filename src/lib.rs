pub mod checks;
pub mod claims;
pub mod config;
pub mod drift;
pub mod error;
pub mod matcher;
pub mod registry;
pub mod verifier;

pub use claims::{
    ClaimSet, ClaimValue, ExpectedClaims, Options, CLAIM_AUD, CLAIM_EXP, CLAIM_IAT, CLAIM_ISS,
    CLAIM_NBF, CLAIM_SUB,
};
pub use config::{ConfigAccess, VerifyConfig, ALLOWED_DRIFT_KEY};
pub use drift::{Clock, DriftChecker, FixedClock, SystemClock};
pub use error::{VerifyError, VerifyResult};
pub use matcher::match_literal_claims;
pub use registry::{ClaimCheck, VerificationRegistry};
pub use verifier::{ClaimsVerifier, ClaimsVerifierBuilder};

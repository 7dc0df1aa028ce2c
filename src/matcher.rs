use tracing::debug;

use crate::claims::{ClaimSet, ClaimValue, ExpectedClaims, Options};
use crate::error::{VerifyError, VerifyResult};

/// Check a claim set against caller-supplied literal expectations.
///
/// With no expectations the set passes unrestricted. Otherwise every
/// expected claim is checked in the order the caller listed it, and the
/// first mismatching key is reported:
///
/// - a list expectation against a list claim passes when every expected
///   element occurs in the claim;
/// - a scalar expectation against a list claim passes when the claim
///   contains it;
/// - everything else, a scalar or absent claim, is compared by strict
///   equality. Note this makes a list expectation against a scalar claim
///   fall through to equality between a scalar and a list, which never
///   holds.
///
/// Never transforms values: success returns the claims exactly as given.
pub fn match_literal_claims(
    claims: &ClaimSet,
    expected: &ExpectedClaims,
    _options: &Options,
) -> VerifyResult<ClaimSet> {
    for (key, want) in expected.iter() {
        if !matches_expected(claims.get(key), want) {
            debug!(claim = key, "literal claim mismatch");
            return Err(VerifyError::LiteralMismatch(key.to_owned()));
        }
    }
    Ok(claims.clone())
}

fn matches_expected(actual: Option<&ClaimValue>, expected: &ClaimValue) -> bool {
    match (actual, expected) {
        (Some(ClaimValue::List(have)), ClaimValue::List(want)) => {
            want.iter().all(|item| have.contains(item))
        }
        (Some(ClaimValue::List(have)), ClaimValue::String(want)) => have.contains(want),
        // a list of strings never contains a number or boolean
        (Some(ClaimValue::List(_)), _) => false,
        (Some(have), want) => have == want,
        (None, _) => false,
    }
}

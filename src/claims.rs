use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const CLAIM_ISS: &str = "iss";
pub const CLAIM_SUB: &str = "sub";
pub const CLAIM_AUD: &str = "aud";
pub const CLAIM_EXP: &str = "exp";
pub const CLAIM_NBF: &str = "nbf";
pub const CLAIM_IAT: &str = "iat";

/// Caller-supplied options forwarded unmodified to every per-claim check.
/// The crate interprets none of its contents.
pub type Options = serde_json::Map<String, serde_json::Value>;

/// Literal expectations have the same shape as a claim set: an ordered
/// mapping from claim key to a scalar or list value. An empty set means
/// "no literal constraints".
pub type ExpectedClaims = ClaimSet;

/// A single claim value as it appears in a decoded token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClaimValue {
    Bool(bool),
    Number(i64),
    String(String),
    List(Vec<String>),
}

impl ClaimValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ClaimValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ClaimValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ClaimValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ClaimValue::List(values) => Some(values),
            _ => None,
        }
    }
}

impl From<bool> for ClaimValue {
    fn from(value: bool) -> Self {
        ClaimValue::Bool(value)
    }
}

impl From<i64> for ClaimValue {
    fn from(value: i64) -> Self {
        ClaimValue::Number(value)
    }
}

impl From<&str> for ClaimValue {
    fn from(value: &str) -> Self {
        ClaimValue::String(value.to_owned())
    }
}

impl From<String> for ClaimValue {
    fn from(value: String) -> Self {
        ClaimValue::String(value)
    }
}

impl From<Vec<String>> for ClaimValue {
    fn from(values: Vec<String>) -> Self {
        ClaimValue::List(values)
    }
}

impl From<Vec<&str>> for ClaimValue {
    fn from(values: Vec<&str>) -> Self {
        ClaimValue::List(values.into_iter().map(str::to_owned).collect())
    }
}

/// Decoded claims from a token payload, in the order the payload listed
/// them. Lookups are linear; claim sets are small and the caller-visible
/// iteration order has to survive every transformation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimSet {
    entries: Vec<(String, ClaimValue)>,
}

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == key)
    }

    pub fn get(&self, key: &str) -> Option<&ClaimValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Insert or replace a claim. Replacing keeps the claim's original
    /// position, so normalizing a value never reorders the set.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ClaimValue>,
    ) -> Option<ClaimValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<ClaimValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClaimValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl<K, V> FromIterator<(K, V)> for ClaimSet
where
    K: Into<String>,
    V: Into<ClaimValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = ClaimSet::new();
        for (key, value) in iter {
            set.insert(key, value);
        }
        set
    }
}

impl Serialize for ClaimSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ClaimSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ClaimSetVisitor;

        impl<'de> Visitor<'de> for ClaimSetVisitor {
            type Value = ClaimSet;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of claim names to claim values")
            }

            fn visit_map<A>(self, mut access: A) -> Result<ClaimSet, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut set = ClaimSet::new();
                while let Some((key, value)) = access.next_entry::<String, ClaimValue>()? {
                    // duplicate keys: last occurrence wins, first position kept
                    set.insert(key, value);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(ClaimSetVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut claims = ClaimSet::new().with(CLAIM_ISS, "issuer").with(CLAIM_EXP, 100i64);
        let previous = claims.insert(CLAIM_ISS, "other");
        assert_eq!(previous, Some(ClaimValue::String("issuer".into())));
        assert_eq!(
            claims.keys().collect::<Vec<_>>(),
            vec![CLAIM_ISS, CLAIM_EXP]
        );
        assert_eq!(claims.get(CLAIM_ISS), Some(&ClaimValue::String("other".into())));
    }

    #[test]
    fn deserialize_preserves_payload_order() {
        let payload = r#"{"iss":"foo","aud":["a","b"],"exp":100,"active":true}"#;
        let claims: ClaimSet = serde_json::from_str(payload).expect("decode");
        assert_eq!(
            claims.keys().collect::<Vec<_>>(),
            vec!["iss", "aud", "exp", "active"]
        );
        let encoded = serde_json::to_string(&claims).expect("encode");
        assert_eq!(encoded, payload);
    }

    #[test]
    fn deserialize_duplicate_key_last_wins() {
        let claims: ClaimSet = serde_json::from_str(r#"{"a":1,"b":2,"a":3}"#).expect("decode");
        assert_eq!(claims.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(claims.get("a"), Some(&ClaimValue::Number(3)));
    }

    #[test]
    fn value_accessors_match_variants() {
        assert_eq!(ClaimValue::from(42i64).as_i64(), Some(42));
        assert_eq!(ClaimValue::from("x").as_str(), Some("x"));
        assert_eq!(ClaimValue::from(true).as_bool(), Some(true));
        assert_eq!(
            ClaimValue::from(vec!["a", "b"]).as_list(),
            Some(&["a".to_owned(), "b".to_owned()][..])
        );
        assert_eq!(ClaimValue::from("x").as_i64(), None);
    }
}

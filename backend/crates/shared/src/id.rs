//! Common ID Types
//!
//! The auth backend assigns identifiers; the gateway never mints them.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque identifier assigned by the auth backend
///
/// The backend may send it as a JSON number (`42`) or string (`"42"`);
/// both normalize to the same stringified key.
///
/// Usage:
/// ```
/// use kernel::id::UserId;
/// let id = UserId::parse(" 42 ").unwrap();
/// assert_eq!(id.as_str(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Normalize a raw candidate key
    ///
    /// Returns `None` for values that can never name a session: empty,
    /// whitespace only, or containing control characters.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_control) {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(UserId::from(n)),
            Raw::Text(s) => UserId::parse(&s)
                .ok_or_else(|| serde::de::Error::custom("user id must not be blank")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_whitespace() {
        assert_eq!(UserId::parse("  7\t").unwrap().as_str(), "7");
    }

    #[test]
    fn test_parse_rejects_blank_and_control() {
        assert!(UserId::parse("").is_none());
        assert!(UserId::parse("   ").is_none());
        assert!(UserId::parse("4\n2").is_none());
    }

    #[test]
    fn test_number_and_string_ids_are_the_same_key() {
        let from_number: UserId = serde_json::from_str("42").unwrap();
        let from_text: UserId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(serde_json::to_string(&from_number).unwrap(), "\"42\"");
    }

    #[test]
    fn test_blank_string_id_is_rejected() {
        assert!(serde_json::from_str::<UserId>("\" \"").is_err());
    }
}

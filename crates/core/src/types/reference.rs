//! Product reference code.
//!
//! Every catalog item is identified by a reference code. The documented API
//! contract is a string, but the legacy backend stores references as
//! integers and serializes them as JSON numbers. The [`Reference`] type
//! normalizes both wire shapes to a string once, at the serde boundary, so
//! the rest of the application never has to guess the shape.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A product reference code.
///
/// Compares and hashes as a plain string. An empty reference is
/// representable (some legacy rows carry one) but callers that build
/// lookups are expected to skip empty references.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Reference(String);

impl Reference {
    /// Create a reference from a string value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The empty reference (serde default for absent fields).
    #[must_use]
    pub const fn empty() -> Self {
        Self(String::new())
    }

    /// Get the reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the reference is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Reference {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Reference {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for Reference {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Accept both the documented string shape and the legacy integer
        // shape; absent/null references normalize to the empty string.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Text(String),
            Number(i64),
            Null,
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Text(s) => Self(s),
            Wire::Number(n) => Self(n.to_string()),
            Wire::Null => Self(String::new()),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_string() {
        let r: Reference = serde_json::from_str("\"R-100\"").unwrap();
        assert_eq!(r.as_str(), "R-100");
    }

    #[test]
    fn test_deserialize_legacy_number() {
        let r: Reference = serde_json::from_str("1042").unwrap();
        assert_eq!(r.as_str(), "1042");
    }

    #[test]
    fn test_deserialize_null_is_empty() {
        let r: Reference = serde_json::from_str("null").unwrap();
        assert!(r.is_empty());
    }

    #[test]
    fn test_serialize_is_string() {
        let r = Reference::new("1042");
        assert_eq!(serde_json::to_string(&r).unwrap(), "\"1042\"");
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let a = Reference::new("A10");
        let b = Reference::new("A2");
        // Byte-wise string ordering, not numeric
        assert!(a < b);
    }
}

//! Validated identity newtypes for people
//!
//! These newtypes ensure that identity fields are valid by construction:
//! - `PersonName` is non-empty (whitespace is kept as given)
//! - `NationalId` is exactly nine characters long
//!
//! Each type has a strict `new` and a lenient `sanitize` that substitutes the
//! documented default.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Sanitized;
use crate::error::DomainError;

/// Name used when a person is created with an empty name
const DEFAULT_NAME: &str = "Someone";

/// Identifier used when a person is created with a malformed id
const DEFAULT_ID: &str = "000000000";

/// Required length of an identity number, in characters
const ID_LENGTH: usize = 9;

// ============================================================================
// PersonName
// ============================================================================

/// A validated person name (non-empty)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonName(String);

impl PersonName {
    /// Create a new validated person name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the name is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::validation("Person name cannot be empty"));
        }
        Ok(Self(name))
    }

    /// Validate a name, substituting "Someone" for an empty one.
    pub fn sanitize(name: impl Into<String>) -> Sanitized<Self> {
        match Self::new(name) {
            Ok(name) => Sanitized::accepted(name),
            Err(err) => Sanitized::substituted(Self::default(), err),
        }
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PersonName {
    fn default() -> Self {
        Self(DEFAULT_NAME.to_string())
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PersonName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<PersonName> for String {
    fn from(name: PersonName) -> String {
        name.0
    }
}

// ============================================================================
// NationalId
// ============================================================================

/// A validated identity number (exactly nine characters)
///
/// Only the length is checked; the characters themselves are not required to
/// be digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NationalId(String);

impl NationalId {
    /// Create a new validated identity number.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the id is not exactly nine
    /// characters long.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        let length = id.chars().count();
        if length != ID_LENGTH {
            return Err(DomainError::validation(format!(
                "ID must be exactly {} characters, got {}",
                ID_LENGTH, length
            )));
        }
        Ok(Self(id))
    }

    /// Validate an id, substituting "000000000" for a malformed one.
    pub fn sanitize(id: impl Into<String>) -> Sanitized<Self> {
        match Self::new(id) {
            Ok(id) => Sanitized::accepted(id),
            Err(err) => Sanitized::substituted(Self::default(), err),
        }
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NationalId {
    fn default() -> Self {
        Self(DEFAULT_ID.to_string())
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for NationalId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<NationalId> for String {
    fn from(id: NationalId) -> String {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod person_name {
        use super::*;

        #[test]
        fn accepts_any_non_empty_name() {
            assert_eq!(PersonName::new("Dana").unwrap().as_str(), "Dana");
            // No trimming: whitespace-only names are not empty
            assert_eq!(PersonName::new("  ").unwrap().as_str(), "  ");
        }

        #[test]
        fn rejects_empty_name() {
            assert!(matches!(
                PersonName::new(""),
                Err(DomainError::Validation(_))
            ));
        }

        #[test]
        fn sanitize_substitutes_default() {
            let s = PersonName::sanitize("");
            assert!(!s.is_valid());
            assert_eq!(s.into_lenient().as_str(), "Someone");
        }

        #[test]
        fn serde_rejects_empty_name() {
            let result: Result<PersonName, _> = serde_json::from_str(r#""""#);
            assert!(result.is_err());
            let ok: PersonName = serde_json::from_str(r#""Noa""#).unwrap();
            assert_eq!(ok.as_str(), "Noa");
        }
    }

    mod national_id {
        use super::*;

        #[test]
        fn accepts_nine_characters() {
            assert_eq!(NationalId::new("123456789").unwrap().as_str(), "123456789");
            assert!(NationalId::new("ABCDEFGHI").is_ok());
        }

        #[test]
        fn rejects_other_lengths() {
            assert!(NationalId::new("").is_err());
            assert!(NationalId::new("123").is_err());
            assert!(NationalId::new("12345678").is_err());
            assert!(NationalId::new("1234567890").is_err());
        }

        #[test]
        fn length_counts_characters_not_bytes() {
            assert!(NationalId::new("אבגדהוזחט").is_ok());
        }

        #[test]
        fn sanitize_substitutes_default() {
            let s = NationalId::sanitize("123");
            assert!(!s.is_valid());
            assert_eq!(s.into_lenient().as_str(), "000000000");
        }
    }
}

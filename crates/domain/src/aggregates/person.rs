//! Person aggregate - identity and date of birth of a tenant
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: name, id and date of birth are only reachable
//!   through accessors and validating setters
//! - **Newtypes**: `PersonName` and `NationalId` are valid by construction
//! - **Value semantics**: `Date` is `Copy`, so the date handed out or taken
//!   in is never shared with the caller

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{Date, NationalId, PersonName};

/// A person who can rent an apartment
///
/// # Invariants
///
/// - `name` is never empty (enforced by `PersonName`)
/// - `id` is exactly nine characters (enforced by `NationalId`)
/// - `date_of_birth` is a valid calendar date (enforced by `Date`)
///
/// # Example
///
/// ```
/// use rentals_domain::Person;
///
/// let person = Person::new("", 1, 1, 2000, "123");
/// assert_eq!(person.name(), "Someone");
/// assert_eq!(person.id(), "000000000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    name: PersonName,
    id: NationalId,
    date_of_birth: Date,
}

impl Person {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create a person, substituting defaults for invalid fields.
    ///
    /// An empty name becomes "Someone", an id that is not nine characters
    /// becomes "000000000" and an invalid birth date becomes 01/01/2000.
    pub fn new(
        name: impl Into<String>,
        day: i32,
        month: i32,
        year: i32,
        id: impl Into<String>,
    ) -> Self {
        let name = PersonName::sanitize(name);
        if let Some(err) = name.error() {
            tracing::debug!(reason = %err, "person name replaced by default");
        }
        let id = NationalId::sanitize(id);
        if let Some(err) = id.error() {
            tracing::debug!(reason = %err, "person id replaced by default");
        }
        Self {
            name: name.into_lenient(),
            id: id.into_lenient(),
            date_of_birth: Date::new(day, month, year),
        }
    }

    /// Create a person, rejecting invalid fields.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for an empty name, an id that is not
    /// nine characters, or an invalid birth date.
    pub fn try_new(
        name: impl Into<String>,
        day: i32,
        month: i32,
        year: i32,
        id: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self::from_parts(
            PersonName::new(name)?,
            NationalId::new(id)?,
            Date::try_new(day, month, year)?,
        ))
    }

    /// Assemble a person from pre-validated parts.
    pub fn from_parts(name: PersonName, id: NationalId, date_of_birth: Date) -> Self {
        Self {
            name,
            id,
            date_of_birth,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    #[inline]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    #[inline]
    pub fn date_of_birth(&self) -> Date {
        self.date_of_birth
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Set the name; an empty name is ignored.
    pub fn set_name(&mut self, name: impl Into<String>) {
        match PersonName::new(name) {
            Ok(name) => self.name = name,
            Err(err) => tracing::debug!(reason = %err, "person name change ignored"),
        }
    }

    /// Set the id; an id that is not nine characters is ignored.
    pub fn set_id(&mut self, id: impl Into<String>) {
        match NationalId::new(id) {
            Ok(id) => self.id = id,
            Err(err) => tracing::debug!(reason = %err, "person id change ignored"),
        }
    }

    /// Replace the date of birth unconditionally.
    pub fn set_date_of_birth(&mut self, date_of_birth: Date) {
        self.date_of_birth = date_of_birth;
    }

    // =========================================================================
    // Age comparison
    // =========================================================================

    /// Compare by age: `Greater` if this person is older (born earlier),
    /// `Less` if younger, `Equal` for the same birth date.
    ///
    /// This is the reverse of comparing the birth dates themselves.
    ///
    /// ```
    /// use std::cmp::Ordering;
    /// use rentals_domain::Person;
    ///
    /// let older = Person::new("Avi", 1, 1, 1990, "111111111");
    /// let younger = Person::new("Gal", 1, 1, 2000, "222222222");
    /// assert_eq!(older.compare_to(&younger), Ordering::Greater);
    /// ```
    pub fn compare_to(&self, other: &Person) -> Ordering {
        other.date_of_birth.cmp(&self.date_of_birth)
    }

    /// Returns true if this person was born strictly before `other`.
    pub fn is_older_than(&self, other: &Person) -> bool {
        self.date_of_birth.is_before(other.date_of_birth)
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}\nID: {}\nDate of birth: {}",
            self.name, self.id, self.date_of_birth
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_person() -> Person {
        Person::try_new("Dana Levi", 12, 5, 1990, "123456789").unwrap()
    }

    mod constructor {
        use super::*;

        #[test]
        fn new_keeps_valid_fields() {
            let p = create_test_person();
            assert_eq!(p.name(), "Dana Levi");
            assert_eq!(p.id(), "123456789");
            assert_eq!(p.date_of_birth(), Date::new(12, 5, 1990));
        }

        #[test]
        fn new_substitutes_defaults() {
            let p = Person::new("", 1, 1, 2000, "123");
            assert_eq!(p.name(), "Someone");
            assert_eq!(p.id(), "000000000");
        }

        #[test]
        fn new_falls_back_on_invalid_birth_date() {
            let p = Person::new("Roni", 31, 2, 1995, "123456789");
            assert_eq!(p.date_of_birth(), Date::DEFAULT);
        }

        #[test]
        fn try_new_rejects_each_invalid_field() {
            assert!(Person::try_new("", 1, 1, 1990, "123456789").is_err());
            assert!(Person::try_new("Roni", 1, 1, 1990, "12345").is_err());
            assert!(Person::try_new("Roni", 30, 2, 1990, "123456789").is_err());
        }
    }

    mod mutation {
        use super::*;

        #[test]
        fn valid_setters_apply() {
            let mut p = create_test_person();
            p.set_name("Noa");
            p.set_id("987654321");
            p.set_date_of_birth(Date::new(3, 3, 1985));
            assert_eq!(p.name(), "Noa");
            assert_eq!(p.id(), "987654321");
            assert_eq!(p.date_of_birth(), Date::new(3, 3, 1985));
        }

        #[test]
        fn invalid_setters_are_ignored() {
            let mut p = create_test_person();
            p.set_name("");
            p.set_id("12");
            p.set_id("1234567890");
            assert_eq!(p, create_test_person());
        }

        #[test]
        fn birth_date_is_not_shared_with_caller() {
            let mut p = create_test_person();
            let mut dob = Date::new(1, 1, 1980);
            p.set_date_of_birth(dob);
            dob.set_year(1999);
            assert_eq!(p.date_of_birth().year(), 1980);

            let mut copy = p.date_of_birth();
            copy.set_day(20);
            assert_eq!(p.date_of_birth().day(), 1);
        }
    }

    mod comparison {
        use super::*;

        #[test]
        fn older_person_compares_greater() {
            let older = Person::new("A", 1, 1, 1990, "111111111");
            let younger = Person::new("B", 1, 1, 2000, "222222222");
            assert_eq!(older.compare_to(&younger), Ordering::Greater);
            assert_eq!(younger.compare_to(&older), Ordering::Less);
            assert!(older.is_older_than(&younger));
            assert!(!younger.is_older_than(&older));
        }

        #[test]
        fn same_birth_date_compares_equal() {
            let a = Person::new("A", 5, 5, 1990, "111111111");
            let b = Person::new("B", 5, 5, 1990, "222222222");
            assert_eq!(a.compare_to(&b), Ordering::Equal);
            assert_ne!(a, b);
        }

        #[test]
        fn equality_requires_all_fields() {
            let p = create_test_person();
            assert_eq!(p, create_test_person());

            let mut other = create_test_person();
            other.set_date_of_birth(Date::new(13, 5, 1990));
            assert_ne!(p, other);
        }
    }

    mod formatting {
        use super::*;

        #[test]
        fn display_lists_fields() {
            let p = create_test_person();
            assert_eq!(
                p.to_string(),
                "Name: Dana Levi\nID: 123456789\nDate of birth: 12/05/1990"
            );
        }
    }

    mod serde {
        use super::*;

        #[test]
        fn serialize_deserialize_roundtrip() {
            let p = create_test_person();
            let json = serde_json::to_string(&p).unwrap();
            assert!(json.contains("dateOfBirth"));
            let back: Person = serde_json::from_str(&json).unwrap();
            assert_eq!(back, p);
        }

        #[test]
        fn deserialize_rejects_invalid_id() {
            let json = r#"{"name":"Roni","id":"12","dateOfBirth":{"day":1,"month":1,"year":1990}}"#;
            let result: Result<Person, _> = serde_json::from_str(json);
            assert!(result.is_err());
        }
    }
}

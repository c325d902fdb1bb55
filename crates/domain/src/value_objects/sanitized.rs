//! Outcome of lenient validation
//!
//! Every lenient constructor in this crate first produces a `Sanitized<T>`:
//! the value that will be used, plus the error that forced a substitution (if
//! any). Callers then pick a policy: `into_lenient` keeps the corrected value,
//! `into_strict` turns the substitution back into an error.

use crate::error::DomainError;

/// A validated value, possibly replaced by a default.
#[derive(Debug, Clone, PartialEq)]
pub struct Sanitized<T> {
    value: T,
    error: Option<DomainError>,
}

impl<T> Sanitized<T> {
    /// The input passed validation and is used as-is.
    pub fn accepted(value: T) -> Self {
        Self { value, error: None }
    }

    /// The input was rejected; `fallback` is used in its place.
    pub fn substituted(fallback: T, error: DomainError) -> Self {
        Self {
            value: fallback,
            error: Some(error),
        }
    }

    /// Returns true if the original input was valid.
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Returns the corrected value (the input, or the fallback).
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns the validation error that caused a substitution.
    pub fn error(&self) -> Option<&DomainError> {
        self.error.as_ref()
    }

    /// Lenient policy: always yields a usable value.
    pub fn into_lenient(self) -> T {
        self.value
    }

    /// Strict policy: yields the value only if no substitution happened.
    pub fn into_strict(self) -> Result<T, DomainError> {
        match self.error {
            None => Ok(self.value),
            Some(err) => Err(err),
        }
    }
}

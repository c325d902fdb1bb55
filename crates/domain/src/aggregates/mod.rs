//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//! - Keeps its invariants through validating setters
//!
//! # Rustic DDD Principles
//!
//! | Java DDD Pattern | Rustic Equivalent |
//! |------------------|-------------------|
//! | Private fields + getters | Newtypes valid by construction |
//! | Defensive copies in getters | `Copy` values and `&` borrows |
//! | Copy constructors | `#[derive(Clone)]` |
//! | Factory pattern | `::new()` (lenient) + `::try_new()` (strict) |

pub mod apartment;
pub mod person;

pub use apartment::{Apartment, TenantChangeRejection, LEASE_EXPIRED};
pub use person::Person;

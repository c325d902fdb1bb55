//! Rentals domain - apartments, their tenants and lease periods
//!
//! Three value types, leaves first:
//!
//! - [`Date`]: a validated calendar date with day arithmetic
//! - [`Person`]: a tenant's identity and date of birth
//! - [`Apartment`]: rental attributes, a tenant, a lease and the tenant-change rule
//!
//! Every constructor comes in a lenient form (`new`, substitutes documented
//! defaults for invalid input) and a strict form (`try_new`, returns a
//! [`DomainError`]). Setters are lenient: a change that would break an
//! invariant is ignored and reported through `tracing` at debug level.

pub mod aggregates;
pub mod error;
pub mod value_objects;

pub use aggregates::{Apartment, Person, TenantChangeRejection, LEASE_EXPIRED};
pub use error::DomainError;
pub use value_objects::{Date, NationalId, PersonName, RentalPolicy, Sanitized, MAX_LEASE_YEARS};

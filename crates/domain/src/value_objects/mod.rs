//! Value objects - Immutable objects defined by their attributes

mod date;
mod names;
mod rental_policy;
mod sanitized;

pub use date::Date;
pub use names::{NationalId, PersonName};
pub use rental_policy::{RentalPolicy, MAX_LEASE_YEARS};
pub use sanitized::Sanitized;

//! Apartment aggregate - rental attributes, tenant and lease period
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: every field goes through a validating setter
//! - **Owned parts**: the tenant and both lease dates are owned by value, so
//!   nothing handed to or from an `Apartment` aliases its state
//! - **Configurable rules**: minimums, fallbacks and the tenant-change window
//!   come from a [`RentalPolicy`]
//!
//! The lenient API never fails: constructors substitute policy defaults and
//! setters ignore values that would break an invariant. The strict
//! constructors (`try_new`, `try_with_policy`, deserialization) report the
//! same violations as `DomainError`s.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::aggregates::Person;
use crate::error::DomainError;
use crate::value_objects::{Date, RentalPolicy, Sanitized};

/// `days_left` result for a date past the end of the lease
pub const LEASE_EXPIRED: i64 = -1;

/// Why a tenant change was refused
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TenantChangeRejection {
    /// The incoming tenant must be born after the current one
    #[error("new tenant is not younger than the current tenant")]
    TenantNotYounger,

    /// The price may not go down
    #[error("offered price {offered} is below the current price {current}")]
    PriceReduced { current: f64, offered: f64 },

    /// The change is requested too long before the lease ends
    #[error("{days_left} days left on the lease, changes allowed from {max_days_left}")]
    TooEarly { days_left: u64, max_days_left: u64 },

    /// A lease starting on `start` would end past the last representable year
    #[error("a lease starting on {start} cannot be represented")]
    LeaseOutOfRange { start: Date },
}

/// A rentable apartment
///
/// # Invariants
///
/// - `rooms`, `area` and `price` are at least the policy minimums
/// - `rental_end` is strictly after `rental_start`
///
/// # Example
///
/// ```
/// use rentals_domain::{Apartment, Date, Person};
///
/// let tenant = Person::new("Dana", 1, 1, 1990, "123456789");
/// let apartment = Apartment::new(
///     3,
///     80.0,
///     5000.0,
///     tenant,
///     Date::new(1, 1, 2023),
///     Date::new(1, 1, 2022),
/// );
///
/// // An end date before the start resets the lease to one year
/// assert_eq!(apartment.rental_end(), Date::new(1, 1, 2024));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ApartmentWireFormat", into = "ApartmentWireFormat")]
pub struct Apartment {
    rooms: u32,
    area: f64,
    price: f64,
    tenant: Person,
    rental_start: Date,
    rental_end: Date,
    policy: RentalPolicy,
}

impl Apartment {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create an apartment under the default [`RentalPolicy`], substituting
    /// defaults for invalid input.
    pub fn new(
        rooms: i32,
        area: f64,
        price: f64,
        tenant: Person,
        rental_start: Date,
        rental_end: Date,
    ) -> Self {
        Self::with_policy(
            RentalPolicy::default(),
            rooms,
            area,
            price,
            tenant,
            rental_start,
            rental_end,
        )
    }

    /// Create an apartment under `policy`, substituting defaults for invalid
    /// input.
    ///
    /// An invalid `policy` is replaced by [`RentalPolicy::default`]. Rooms,
    /// area and price below their minimums take the policy defaults. An end
    /// date that does not fall after the start is replaced by the start plus
    /// the policy lease length; if that end is not representable, the lease
    /// is reset to start on [`Date::DEFAULT`].
    pub fn with_policy(
        policy: RentalPolicy,
        rooms: i32,
        area: f64,
        price: f64,
        tenant: Person,
        rental_start: Date,
        rental_end: Date,
    ) -> Self {
        let policy = match policy.validate() {
            Ok(()) => policy,
            Err(err) => {
                tracing::debug!(reason = %err, "invalid rental policy replaced by default");
                RentalPolicy::default()
            }
        };
        let parts = SanitizedParts::new(&policy, rooms, area, price, rental_start, rental_end);
        parts.log_substitutions();
        Self {
            rooms: parts.rooms.into_lenient(),
            area: parts.area.into_lenient(),
            price: parts.price.into_lenient(),
            tenant,
            rental_start: parts.rental_start.into_lenient(),
            rental_end: parts.rental_end.into_lenient(),
            policy,
        }
    }

    /// Create an apartment under the default policy, rejecting invalid input.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for a value below its minimum and
    /// `DomainError::Constraint` if the end date does not follow the start.
    pub fn try_new(
        rooms: i32,
        area: f64,
        price: f64,
        tenant: Person,
        rental_start: Date,
        rental_end: Date,
    ) -> Result<Self, DomainError> {
        Self::try_with_policy(
            RentalPolicy::default(),
            rooms,
            area,
            price,
            tenant,
            rental_start,
            rental_end,
        )
    }

    /// Create an apartment under `policy`, rejecting invalid input.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the policy itself is invalid or a
    /// value is below its minimum, and `DomainError::Constraint` if the end
    /// date does not follow the start (or its replacement is not
    /// representable).
    pub fn try_with_policy(
        policy: RentalPolicy,
        rooms: i32,
        area: f64,
        price: f64,
        tenant: Person,
        rental_start: Date,
        rental_end: Date,
    ) -> Result<Self, DomainError> {
        policy.validate()?;
        let parts = SanitizedParts::new(&policy, rooms, area, price, rental_start, rental_end);
        Ok(Self {
            rooms: parts.rooms.into_strict()?,
            area: parts.area.into_strict()?,
            price: parts.price.into_strict()?,
            tenant,
            rental_start: parts.rental_start.into_strict()?,
            rental_end: parts.rental_end.into_strict()?,
            policy,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn rooms(&self) -> u32 {
        self.rooms
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.area
    }

    #[inline]
    pub fn price(&self) -> f64 {
        self.price
    }

    #[inline]
    pub fn tenant(&self) -> &Person {
        &self.tenant
    }

    #[inline]
    pub fn rental_start(&self) -> Date {
        self.rental_start
    }

    #[inline]
    pub fn rental_end(&self) -> Date {
        self.rental_end
    }

    #[inline]
    pub fn policy(&self) -> &RentalPolicy {
        &self.policy
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Set the number of rooms; ignored below the policy minimum.
    pub fn set_rooms(&mut self, rooms: i32) {
        match check_rooms(&self.policy, rooms) {
            Ok(rooms) => self.rooms = rooms,
            Err(err) => tracing::debug!(reason = %err, "apartment rooms change ignored"),
        }
    }

    /// Set the area; ignored below the policy minimum.
    pub fn set_area(&mut self, area: f64) {
        match check_minimum("area", area, self.policy.min_area()) {
            Ok(area) => self.area = area,
            Err(err) => tracing::debug!(reason = %err, "apartment area change ignored"),
        }
    }

    /// Set the price; ignored below the policy minimum.
    pub fn set_price(&mut self, price: f64) {
        match check_minimum("price", price, self.policy.min_price()) {
            Ok(price) => self.price = price,
            Err(err) => tracing::debug!(reason = %err, "apartment price change ignored"),
        }
    }

    /// Replace the tenant without any checks. Outside callers go through
    /// [`Apartment::change_tenant`].
    pub(crate) fn set_tenant(&mut self, tenant: Person) {
        self.tenant = tenant;
    }

    /// Move the lease start; ignored unless the current end is after it.
    pub fn set_rental_start(&mut self, rental_start: Date) {
        if self.rental_end.is_after(rental_start) {
            self.rental_start = rental_start;
        } else {
            tracing::debug!(
                start = %rental_start,
                end = %self.rental_end,
                "rental start change ignored"
            );
        }
    }

    /// Move the lease end; ignored unless it is after the current start.
    pub fn set_rental_end(&mut self, rental_end: Date) {
        if rental_end.is_after(self.rental_start) {
            self.rental_end = rental_end;
        } else {
            tracing::debug!(
                start = %self.rental_start,
                end = %rental_end,
                "rental end change ignored"
            );
        }
    }

    // =========================================================================
    // Lease operations
    // =========================================================================

    /// Push the lease end back by `years` (no-op for `years <= 0`).
    ///
    /// Only the year of the end date changes. An end date of 29 February is
    /// left where it is if the target year has no leap day.
    pub fn extend_rental_period(&mut self, years: i32) {
        if years <= 0 {
            return;
        }
        match self.rental_end.year().checked_add(years) {
            Some(year) => self.rental_end.set_year(year),
            None => tracing::debug!(years, "rental extension overflows the year"),
        }
    }

    /// Returns true if `date` falls inside the half-open lease period
    /// `[rental_start, rental_end)`.
    pub fn is_leased_on(&self, date: Date) -> bool {
        date >= self.rental_start && date < self.rental_end
    }

    /// Days between `as_of` and the lease end, or `None` once `as_of` is past
    /// the end. The count is unsigned: a date before the lease start also
    /// yields its full distance to the end.
    pub fn remaining_days(&self, as_of: Date) -> Option<u64> {
        if as_of.is_after(self.rental_end) {
            None
        } else {
            Some(self.rental_end.difference(as_of))
        }
    }

    /// Like [`Apartment::remaining_days`], with [`LEASE_EXPIRED`] (-1) for a
    /// date past the end.
    pub fn days_left(&self, as_of: Date) -> i64 {
        self.remaining_days(as_of)
            .map_or(LEASE_EXPIRED, |days| i64::try_from(days).unwrap_or(i64::MAX))
    }

    /// Check whether [`Apartment::change_tenant`] would succeed.
    ///
    /// Rules are checked in order: the new tenant must be younger than the
    /// current one, the price may not drop, and the lease must end within the
    /// policy window of `new_start`. A `new_start` past the end of the lease
    /// always satisfies the window. Finally the new lease must end in a
    /// representable year.
    pub fn check_tenant_change(
        &self,
        new_start: Date,
        new_tenant: &Person,
        new_price: f64,
    ) -> Result<(), TenantChangeRejection> {
        self.plan_tenant_change(new_start, new_tenant, new_price).map(|_| ())
    }

    /// Applies the tenant-change rules and returns the end of the new lease.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    fn plan_tenant_change(
        &self,
        new_start: Date,
        new_tenant: &Person,
        new_price: f64,
    ) -> Result<Date, TenantChangeRejection> {
        if !self
            .tenant
            .date_of_birth()
            .is_before(new_tenant.date_of_birth())
        {
            return Err(TenantChangeRejection::TenantNotYounger);
        }
        // Negated so a NaN offer is refused as well
        if !(self.price <= new_price) {
            return Err(TenantChangeRejection::PriceReduced {
                current: self.price,
                offered: new_price,
            });
        }
        let max_days_left = self.policy.max_days_left_for_tenant_change();
        if let Some(days_left) = self.remaining_days(new_start) {
            if days_left > max_days_left {
                return Err(TenantChangeRejection::TooEarly {
                    days_left,
                    max_days_left,
                });
            }
        }
        lease_end(&self.policy, new_start)
            .ok_or(TenantChangeRejection::LeaseOutOfRange { start: new_start })
    }

    /// Hand the apartment to `new_tenant` at `new_price`, starting a fresh
    /// lease on `new_start`.
    ///
    /// Returns false and leaves the apartment untouched if any rule of
    /// [`Apartment::check_tenant_change`] fails.
    ///
    /// ```
    /// use rentals_domain::{Apartment, Date, Person};
    ///
    /// let tenant = Person::new("Dana", 1, 1, 1990, "123456789");
    /// let mut apartment = Apartment::new(
    ///     3, 80.0, 5000.0, tenant, Date::new(1, 1, 2023), Date::new(1, 1, 2024),
    /// );
    /// let newcomer = Person::new("Gal", 1, 1, 2000, "987654321");
    ///
    /// assert!(!apartment.change_tenant(Date::new(1, 12, 2023), &newcomer, 4000.0));
    /// assert!(apartment.change_tenant(Date::new(1, 12, 2023), &newcomer, 5500.0));
    /// assert_eq!(apartment.rental_end(), Date::new(1, 12, 2024));
    /// ```
    pub fn change_tenant(&mut self, new_start: Date, new_tenant: &Person, new_price: f64) -> bool {
        let new_end = match self.plan_tenant_change(new_start, new_tenant, new_price) {
            Ok(new_end) => new_end,
            Err(rejection) => {
                tracing::debug!(reason = %rejection, "tenant change rejected");
                return false;
            }
        };
        self.set_tenant(new_tenant.clone());
        self.price = new_price;
        self.rental_start = new_start;
        self.rental_end = new_end;
        tracing::info!(
            tenant = self.tenant.name(),
            start = %self.rental_start,
            end = %self.rental_end,
            price = self.price,
            "tenant changed"
        );
        true
    }
}

impl PartialEq for Apartment {
    /// Compares the rental attributes, tenant and lease; the policy is not
    /// part of an apartment's identity.
    fn eq(&self, other: &Self) -> bool {
        self.rooms == other.rooms
            && self.area == other.area
            && self.price == other.price
            && self.tenant == other.tenant
            && self.rental_start == other.rental_start
            && self.rental_end == other.rental_end
    }
}

impl fmt::Display for Apartment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of rooms: {}", self.rooms)?;
        writeln!(f, "Area: {:?}", self.area)?;
        writeln!(f, "Price: {:?} NIS", self.price)?;
        writeln!(f, "Tenant name: {}", self.tenant.name())?;
        writeln!(f, "Rental start date: {}", self.rental_start)?;
        write!(f, "Rental end date: {}", self.rental_end)
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Every constructor input after validation, with the reason for each
/// substitution.
struct SanitizedParts {
    rooms: Sanitized<u32>,
    area: Sanitized<f64>,
    price: Sanitized<f64>,
    rental_start: Sanitized<Date>,
    rental_end: Sanitized<Date>,
}

impl SanitizedParts {
    fn new(
        policy: &RentalPolicy,
        rooms: i32,
        area: f64,
        price: f64,
        rental_start: Date,
        rental_end: Date,
    ) -> Self {
        let (rental_start, rental_end) = sanitize_lease(policy, rental_start, rental_end);
        Self {
            rooms: check_rooms(policy, rooms).map_or_else(
                |err| Sanitized::substituted(policy.default_rooms(), err),
                Sanitized::accepted,
            ),
            area: check_minimum("area", area, policy.min_area()).map_or_else(
                |err| Sanitized::substituted(policy.default_area(), err),
                Sanitized::accepted,
            ),
            price: check_minimum("price", price, policy.min_price()).map_or_else(
                |err| Sanitized::substituted(policy.default_price(), err),
                Sanitized::accepted,
            ),
            rental_start,
            rental_end,
        }
    }

    fn log_substitutions(&self) {
        let errors = [
            self.rooms.error(),
            self.area.error(),
            self.price.error(),
            self.rental_start.error(),
            self.rental_end.error(),
        ];
        for err in errors.into_iter().flatten() {
            tracing::debug!(reason = %err, "apartment field replaced by default");
        }
    }
}

/// End of a lease that starts on `start`, if it is representable and falls
/// after the start.
fn lease_end(policy: &RentalPolicy, start: Date) -> Option<Date> {
    start
        .checked_add_years(policy.lease_years())
        .filter(|end| end.is_after(start))
}

/// Keeps a well-ordered lease. Otherwise the end moves to one policy lease
/// after the start, and when that is not representable both dates restart
/// from [`Date::DEFAULT`].
fn sanitize_lease(
    policy: &RentalPolicy,
    rental_start: Date,
    rental_end: Date,
) -> (Sanitized<Date>, Sanitized<Date>) {
    if rental_end.is_after(rental_start) {
        return (
            Sanitized::accepted(rental_start),
            Sanitized::accepted(rental_end),
        );
    }
    let err = DomainError::constraint(format!(
        "Rental end {} must be after rental start {}",
        rental_end, rental_start
    ));
    match lease_end(policy, rental_start) {
        Some(end) => (
            Sanitized::accepted(rental_start),
            Sanitized::substituted(end, err),
        ),
        None => {
            let start_err = DomainError::constraint(format!(
                "A lease starting on {} cannot be represented",
                rental_start
            ));
            (
                Sanitized::substituted(Date::DEFAULT, start_err),
                Sanitized::substituted(Date::DEFAULT.add_years(policy.lease_years()), err),
            )
        }
    }
}

fn check_rooms(policy: &RentalPolicy, rooms: i32) -> Result<u32, DomainError> {
    u32::try_from(rooms)
        .ok()
        .filter(|r| *r >= policy.min_rooms())
        .ok_or_else(|| {
            DomainError::validation(format!(
                "rooms must be at least {}, got {}",
                policy.min_rooms(),
                rooms
            ))
        })
}

fn check_minimum(field: &str, value: f64, min: f64) -> Result<f64, DomainError> {
    if value >= min {
        Ok(value)
    } else {
        Err(DomainError::validation(format!(
            "{} must be at least {}, got {}",
            field, min, value
        )))
    }
}

// ============================================================================
// Serde Implementation
// ============================================================================

/// Intermediate format for serialization that matches the wire format
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApartmentWireFormat {
    rooms: i32,
    area: f64,
    price: f64,
    tenant: Person,
    rental_start: Date,
    rental_end: Date,
    #[serde(default)]
    policy: RentalPolicy,
}

impl From<Apartment> for ApartmentWireFormat {
    fn from(apartment: Apartment) -> Self {
        Self {
            rooms: i32::try_from(apartment.rooms).unwrap_or(i32::MAX),
            area: apartment.area,
            price: apartment.price,
            tenant: apartment.tenant,
            rental_start: apartment.rental_start,
            rental_end: apartment.rental_end,
            policy: apartment.policy,
        }
    }
}

impl TryFrom<ApartmentWireFormat> for Apartment {
    type Error = DomainError;

    fn try_from(wire: ApartmentWireFormat) -> Result<Self, Self::Error> {
        Self::try_with_policy(
            wire.policy,
            wire.rooms,
            wire.area,
            wire.price,
            wire.tenant,
            wire.rental_start,
            wire.rental_end,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

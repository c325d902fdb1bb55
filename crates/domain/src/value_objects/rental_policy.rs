//! Rental policy - configuration for apartment rules
//!
//! Holds the minimums, fallback values and tenant-change window that
//! [`Apartment`](crate::aggregates::Apartment) enforces. `Default` carries the
//! standard rules; a policy can also be loaded from any serde format, where
//! missing fields take their default value.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Longest lease a policy may prescribe, in years
pub const MAX_LEASE_YEARS: i32 = 100;

/// Configuration for apartment validation and the tenant-change rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RentalPolicyWireFormat", into = "RentalPolicyWireFormat")]
pub struct RentalPolicy {
    /// Smallest accepted number of rooms
    min_rooms: u32,
    /// Smallest accepted area
    min_area: f64,
    /// Smallest accepted monthly price
    min_price: f64,
    /// Rooms used when the requested value is below the minimum
    default_rooms: u32,
    /// Area used when the requested value is below the minimum
    default_area: f64,
    /// Price used when the requested value is below the minimum
    default_price: f64,
    /// A tenant may only be replaced this close to the end of the lease
    max_days_left_for_tenant_change: u64,
    /// Length of a fresh lease, in years
    lease_years: i32,
}

impl Default for RentalPolicy {
    fn default() -> Self {
        Self {
            min_rooms: 1,
            min_area: 1.0,
            min_price: 1.0,
            default_rooms: 3,
            default_area: 80.0,
            default_price: 5000.0,
            max_days_left_for_tenant_change: 90,
            lease_years: 1,
        }
    }
}

impl RentalPolicy {
    /// Validate configuration values
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.min_area.is_finite() || !self.min_price.is_finite() {
            return Err(DomainError::validation(
                "min_area and min_price must be finite",
            ));
        }
        if self.default_rooms < self.min_rooms {
            return Err(DomainError::validation(
                "default_rooms must not be below min_rooms",
            ));
        }
        // Written as negated comparisons so NaN defaults are rejected too
        if !(self.default_area >= self.min_area) {
            return Err(DomainError::validation(
                "default_area must not be below min_area",
            ));
        }
        if !(self.default_price >= self.min_price) {
            return Err(DomainError::validation(
                "default_price must not be below min_price",
            ));
        }
        if !(1..=MAX_LEASE_YEARS).contains(&self.lease_years) {
            return Err(DomainError::validation(format!(
                "lease_years must be between 1 and {}, got {}",
                MAX_LEASE_YEARS, self.lease_years
            )));
        }
        Ok(())
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    pub fn min_rooms(&self) -> u32 {
        self.min_rooms
    }

    pub fn min_area(&self) -> f64 {
        self.min_area
    }

    pub fn min_price(&self) -> f64 {
        self.min_price
    }

    pub fn default_rooms(&self) -> u32 {
        self.default_rooms
    }

    pub fn default_area(&self) -> f64 {
        self.default_area
    }

    pub fn default_price(&self) -> f64 {
        self.default_price
    }

    /// Largest `days_left` at which a tenant change is still allowed
    pub fn max_days_left_for_tenant_change(&self) -> u64 {
        self.max_days_left_for_tenant_change
    }

    /// Years added to a lease start to obtain its end
    pub fn lease_years(&self) -> i32 {
        self.lease_years
    }

    // ============================================================================
    // Builder-style setters (consume self)
    // ============================================================================

    /// Set the tenant-change window
    pub fn with_max_days_left_for_tenant_change(self, days: u64) -> Self {
        Self {
            max_days_left_for_tenant_change: days,
            ..self
        }
    }

    /// Set the lease length
    pub fn with_lease_years(self, lease_years: i32) -> Self {
        Self {
            lease_years,
            ..self
        }
    }

    /// Set the room minimum and fallback
    pub fn with_rooms(self, min_rooms: u32, default_rooms: u32) -> Self {
        Self {
            min_rooms,
            default_rooms,
            ..self
        }
    }

    /// Set the area minimum and fallback
    pub fn with_area(self, min_area: f64, default_area: f64) -> Self {
        Self {
            min_area,
            default_area,
            ..self
        }
    }

    /// Set the price minimum and fallback
    pub fn with_price(self, min_price: f64, default_price: f64) -> Self {
        Self {
            min_price,
            default_price,
            ..self
        }
    }
}

// ============================================================================
// Serde Implementation
// ============================================================================

/// Wire format; absent fields fall back to the default policy.
#[derive(Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RentalPolicyWireFormat {
    min_rooms: u32,
    min_area: f64,
    min_price: f64,
    default_rooms: u32,
    default_area: f64,
    default_price: f64,
    max_days_left_for_tenant_change: u64,
    lease_years: i32,
}

impl Default for RentalPolicyWireFormat {
    fn default() -> Self {
        RentalPolicy::default().into()
    }
}

impl From<RentalPolicy> for RentalPolicyWireFormat {
    fn from(policy: RentalPolicy) -> Self {
        Self {
            min_rooms: policy.min_rooms,
            min_area: policy.min_area,
            min_price: policy.min_price,
            default_rooms: policy.default_rooms,
            default_area: policy.default_area,
            default_price: policy.default_price,
            max_days_left_for_tenant_change: policy.max_days_left_for_tenant_change,
            lease_years: policy.lease_years,
        }
    }
}

impl TryFrom<RentalPolicyWireFormat> for RentalPolicy {
    type Error = DomainError;

    fn try_from(wire: RentalPolicyWireFormat) -> Result<Self, Self::Error> {
        let policy = Self {
            min_rooms: wire.min_rooms,
            min_area: wire.min_area,
            min_price: wire.min_price,
            default_rooms: wire.default_rooms,
            default_area: wire.default_area,
            default_price: wire.default_price,
            max_days_left_for_tenant_change: wire.max_days_left_for_tenant_change,
            lease_years: wire.lease_years,
        };
        policy.validate()?;
        Ok(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_valid() {
        let policy = RentalPolicy::default();
        assert!(policy.validate().is_ok());
        assert_eq!(policy.default_rooms(), 3);
        assert_eq!(policy.default_area(), 80.0);
        assert_eq!(policy.default_price(), 5000.0);
        assert_eq!(policy.max_days_left_for_tenant_change(), 90);
        assert_eq!(policy.lease_years(), 1);
    }

    #[test]
    fn validate_rejects_default_below_minimum() {
        let policy = RentalPolicy::default().with_rooms(4, 3);
        assert!(matches!(policy.validate(), Err(DomainError::Validation(_))));

        let policy = RentalPolicy::default().with_price(10.0, f64::NAN);
        assert!(policy.validate().is_err());
    }

    #[test]
    fn validate_rejects_lease_out_of_range() {
        assert!(RentalPolicy::default().with_lease_years(0).validate().is_err());
        assert!(RentalPolicy::default().with_lease_years(-3).validate().is_err());
        assert!(RentalPolicy::default().with_lease_years(2).validate().is_ok());
        assert!(RentalPolicy::default()
            .with_lease_years(MAX_LEASE_YEARS)
            .validate()
            .is_ok());
        assert!(RentalPolicy::default()
            .with_lease_years(MAX_LEASE_YEARS + 1)
            .validate()
            .is_err());
    }

    mod serde {
        use super::*;

        #[test]
        fn missing_fields_use_defaults() {
            let policy: RentalPolicy =
                serde_json::from_str(r#"{"maxDaysLeftForTenantChange":30}"#).unwrap();
            assert_eq!(policy.max_days_left_for_tenant_change(), 30);
            assert_eq!(policy.default_price(), 5000.0);
            assert_eq!(policy.min_rooms(), 1);
        }

        #[test]
        fn empty_object_is_default_policy() {
            let policy: RentalPolicy = serde_json::from_str("{}").unwrap();
            assert_eq!(policy, RentalPolicy::default());
        }

        #[test]
        fn invalid_policy_is_rejected() {
            let result: Result<RentalPolicy, _> = serde_json::from_str(r#"{"leaseYears":0}"#);
            assert!(result.is_err());
        }

        #[test]
        fn serialize_produces_camel_case() {
            let json = serde_json::to_string(&RentalPolicy::default()).unwrap();
            assert!(json.contains("minRooms"));
            assert!(json.contains("defaultPrice"));
            assert!(json.contains("maxDaysLeftForTenantChange"));
        }
    }
}

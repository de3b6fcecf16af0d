//! Per-customer load ceilings
//!
//! Limits are loaded once before any request is evaluated and stay read-only
//! for the lifetime of the validator.

use super::error::LimitsError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Load ceilings applied to every customer
///
/// All ceilings are exclusive: a running total or count must stay strictly
/// below its ceiling once the new request is included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Maximum amount that can be loaded per calendar day
    pub daily_amount: u64,

    /// Maximum number of load attempts per calendar day
    pub daily_transactions: u32,

    /// Maximum amount that can be loaded per week (starting Monday)
    pub weekly_amount: u64,
}

impl Limits {
    /// Check that every ceiling is set
    ///
    /// A zero ceiling would reject every request, which is treated as a
    /// configuration mistake rather than a policy.
    ///
    /// # Errors
    ///
    /// Returns `LimitsError::InvalidLimits` naming the first zero ceiling.
    pub fn validate(&self) -> Result<(), LimitsError> {
        if self.daily_amount == 0 {
            return Err(LimitsError::invalid_limits("daily_amount"));
        }
        if self.daily_transactions == 0 {
            return Err(LimitsError::invalid_limits("daily_transactions"));
        }
        if self.weekly_amount == 0 {
            return Err(LimitsError::invalid_limits("weekly_amount"));
        }
        Ok(())
    }

    /// Daily amount ceiling as a decimal
    pub fn daily_amount_ceiling(&self) -> Decimal {
        Decimal::from(self.daily_amount)
    }

    /// Weekly amount ceiling as a decimal
    pub fn weekly_amount_ceiling(&self) -> Decimal {
        Decimal::from(self.weekly_amount)
    }
}

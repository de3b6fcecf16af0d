//! Load request types for the load limits engine
//!
//! This module defines the identifiers and the immutable request record that
//! the ingestion layer hands to the validator, one per input line.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Customer identifier
pub type CustomerId = u64;

/// Load (transaction) identifier
///
/// Intended to be unique per customer, but the input does not guarantee it.
/// Duplicates are caught by the uniqueness rule.
pub type LoadId = u64;

/// A single customer load request
///
/// Produced by the ingestion layer from one input record. The engine assumes
/// every request it receives is well-formed: the amount is non-negative and
/// the timestamp is a valid UTC instant.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadRequest {
    /// Load identifier
    pub id: LoadId,

    /// The customer loading funds
    pub customer_id: CustomerId,

    /// Amount being loaded
    pub load_amount: Decimal,

    /// When the load was requested
    ///
    /// Not necessarily monotonic across the input stream.
    pub time: DateTime<Utc>,
}

//! Decision types for the load limits engine
//!
//! A `Decision` is produced exactly once per `LoadRequest` and then stored in
//! the customer's history, where it feeds the windowed rules of later requests.

use super::request::{CustomerId, LoadId, LoadRequest};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;

/// Why a load request was rejected
///
/// Each variant corresponds to one rule of the validation chain. The display
/// strings are the human-readable reasons emitted in debug output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionReason {
    /// The customer already has a decision with the same load id
    DuplicateId,

    /// The customer reached the daily number of load attempts
    DailyCountExceeded,

    /// The load would bring the day's accepted total to or over the ceiling
    DailyAmountExceeded,

    /// The load would bring the week's accepted total to or over the ceiling
    WeeklyAmountExceeded,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            RejectionReason::DuplicateId => "transaction id is not unique for customer, ignoring",
            RejectionReason::DailyCountExceeded => "daily load limit exceeded",
            RejectionReason::DailyAmountExceeded => "daily amount limit exceeded",
            RejectionReason::WeeklyAmountExceeded => "weekly amount limit exceeded",
        };
        f.write_str(reason)
    }
}

/// Outcome of evaluating a load request
///
/// Carries the request's amount and time so that later requests can aggregate
/// over it. Decisions are never modified after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    /// Load identifier, copied from the request
    pub id: LoadId,

    /// Customer identifier, copied from the request
    pub customer_id: CustomerId,

    /// Rejection reason, `None` when the load was accepted
    pub reason: Option<RejectionReason>,

    /// Amount of the load, kept for later aggregation
    pub load_amount: Decimal,

    /// Time of the load, kept for later windowing
    pub time: DateTime<Utc>,
}

impl Decision {
    /// Build an accepted decision for a request
    pub fn accepted(request: &LoadRequest) -> Self {
        Self::from_request(request, None)
    }

    /// Build a rejected decision for a request
    pub fn rejected(request: &LoadRequest, reason: RejectionReason) -> Self {
        Self::from_request(request, Some(reason))
    }

    fn from_request(request: &LoadRequest, reason: Option<RejectionReason>) -> Self {
        Decision {
            id: request.id,
            customer_id: request.customer_id,
            reason,
            load_amount: request.load_amount,
            time: request.time,
        }
    }

    /// Whether the load was accepted
    pub fn is_accepted(&self) -> bool {
        self.reason.is_none()
    }
}

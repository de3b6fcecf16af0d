//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `request`: Load requests and identifiers
//! - `decision`: Decisions and rejection reasons
//! - `limits`: Per-customer load ceilings
//! - `error`: Error types for the load limits engine

pub mod decision;
pub mod error;
pub mod limits;
pub mod request;

pub use decision::{Decision, RejectionReason};
pub use error::LimitsError;
pub use limits::Limits;
pub use request::{CustomerId, LoadId, LoadRequest};

//! Load Limits Engine Library
//! # Overview
//!
//! This library validates a stream of customer load (deposit) requests against
//! per-customer daily and weekly limits, with a sequential and a
//! customer-parallel async strategy that produce identical output.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (LoadRequest, Decision, Limits, LimitsError)
//! - [`config`] - JSON configuration and limit overrides
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::window`] - Day and week window boundaries
//!   - [`core::history_store`] - Per-customer decision history
//!   - [`core::rules`] - The ordered rule chain
//!   - [`core::validator`] - Evaluate and commit orchestration
//! - [`io`] - Line-delimited JSON input and output
//! - [`strategy`] - Complete processing pipelines
//!
//! # Rules
//!
//! Each request runs through four rules in order; the first failure rejects it:
//!
//! - **Unique id**: The customer has not used this load id before
//! - **Daily count**: Fewer than `daily_transactions` attempts earlier that day
//! - **Daily amount**: Accepted loads that day plus this one stay below `daily_amount`
//! - **Weekly amount**: Accepted loads that week plus this one stay below `weekly_amount`
//!
//! Every decision, accepted or rejected, is recorded in the customer's history
//! after it is made.

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use config::{Config, LimitOverrides};
pub use core::{HistoryStore, Validator};
pub use io::write_decisions;
pub use types::{
    CustomerId, Decision, Limits, LimitsError, LoadId, LoadRequest, RejectionReason,
};

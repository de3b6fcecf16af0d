//! Asynchronous implementations of core components
//!
//! This module provides thread-safe counterparts of the core validation
//! components, using DashMap for per-customer locking.
//!
//! # Architecture
//!
//! - **AsyncHistoryStore**: Customer histories in a `DashMap`
//! - **AsyncValidator**: Evaluate and commit under the customer's entry lock
//! - **BatchProcessor**: One task per customer, results back in input order
//!
//! # Thread Safety
//!
//! Requests of different customers proceed in parallel. Requests of the same
//! customer are serialized and must be submitted in arrival order, which the
//! batch processor guarantees.

pub mod batch_processor;
pub mod history_store;
pub mod validator;

pub use batch_processor::{BatchProcessor, SequencedDecision, SequencedRequest};
pub use history_store::AsyncHistoryStore;
pub use validator::AsyncValidator;

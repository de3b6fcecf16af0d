//! Thread-safe decision history for async batch processing
//!
//! This module provides the `AsyncHistoryStore`, the concurrent counterpart of
//! `HistoryStore`. Customer histories live in a `DashMap`, so tasks working on
//! different customers never wait on each other.
//!
//! # Thread Safety
//!
//! `update` holds the customer's entry lock for the whole closure. The async
//! validator runs evaluate and commit inside one `update` call, which makes the
//! pair atomic with respect to any other request for the same customer.

use crate::core::history_store::CustomerHistory;
use crate::types::CustomerId;
use dashmap::DashMap;

/// Thread-safe per-customer decision history
///
/// Multiple threads can read and write different customers' histories at the
/// same time. Access to a single customer is serialized.
#[derive(Debug, Default)]
pub struct AsyncHistoryStore {
    /// Concurrent map of customer ID to that customer's history
    customers: DashMap<CustomerId, CustomerHistory>,
}

impl AsyncHistoryStore {
    /// Create a new empty AsyncHistoryStore
    pub fn new() -> Self {
        Self {
            customers: DashMap::new(),
        }
    }

    /// Run a closure with exclusive access to a customer's history
    ///
    /// The history is created empty on first use. The entry stays locked until
    /// the closure returns.
    ///
    /// # Arguments
    ///
    /// * `customer_id` - The customer whose history to lock
    /// * `f` - Closure receiving the mutable history
    ///
    /// # Returns
    ///
    /// Whatever the closure returns
    pub fn update<F, R>(&self, customer_id: CustomerId, f: F) -> R
    where
        F: FnOnce(&mut CustomerHistory) -> R,
    {
        let mut entry = self
            .customers
            .entry(customer_id)
            .or_insert_with(CustomerHistory::new);
        f(entry.value_mut())
    }

    /// Snapshot of a customer's history
    ///
    /// Returns a clone; later commits are not reflected in it.
    pub fn get(&self, customer_id: CustomerId) -> Option<CustomerHistory> {
        self.customers
            .get(&customer_id)
            .map(|entry| entry.value().clone())
    }

    /// Number of customers with a history
    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    /// Total number of stored decisions across all customers
    pub fn decision_count(&self) -> usize {
        self.customers.iter().map(|entry| entry.value().len()).sum()
    }
}

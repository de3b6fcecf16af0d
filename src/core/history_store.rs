//! Per-customer decision history
//!
//! This module provides the `HistoryStore` that keeps every decision the
//! validator has produced, grouped by customer. The windowed rules read a
//! customer's history to count attempts and sum accepted amounts.
//!
//! # Layout
//!
//! Each customer's history is an append-only log in commit order plus an index
//! of log positions kept sorted by decision time, most recent first. Commits
//! insert into the index with a binary search instead of re-sorting, and window
//! scans locate their bounds the same way.
//!
//! # Lifecycle
//!
//! The store starts empty and only grows. Nothing is evicted; the whole store
//! is dropped with the validator that owns it.

use crate::types::{CustomerId, Decision, LoadId};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

/// Decision history for a single customer
#[derive(Debug, Clone, Default)]
pub struct CustomerHistory {
    /// Decisions in commit order
    log: Vec<Decision>,

    /// Positions into `log`, ordered by decision time, most recent first
    ///
    /// Decisions with equal timestamps keep their commit order.
    by_time: Vec<usize>,

    /// Every load id seen for this customer, accepted or not
    ids: HashSet<LoadId>,
}

impl CustomerHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored decisions
    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// Whether no decision has been stored yet
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Whether a decision with this load id was already stored
    pub fn contains_id(&self, id: LoadId) -> bool {
        self.ids.contains(&id)
    }

    /// Append a decision
    ///
    /// The decision is added to the end of the log and its position is
    /// inserted into the time index so the index stays most-recent-first.
    pub fn push(&mut self, decision: Decision) {
        let time = decision.time;
        let position = self
            .by_time
            .partition_point(|&index| self.log[index].time >= time);

        self.ids.insert(decision.id);
        self.log.push(decision);
        self.by_time.insert(position, self.log.len() - 1);
    }

    /// Decisions ordered by time, most recent first
    pub fn iter(&self) -> impl Iterator<Item = &Decision> + '_ {
        self.by_time.iter().map(move |&index| &self.log[index])
    }

    /// Decisions in the order they were committed
    pub fn log(&self) -> &[Decision] {
        &self.log
    }

    /// Decisions strictly after `after` and strictly before `before`
    ///
    /// Both bounds are exclusive. Yields most recent first. An empty or
    /// inverted interval yields nothing.
    pub fn within(
        &self,
        after: DateTime<Utc>,
        before: DateTime<Utc>,
    ) -> impl Iterator<Item = &Decision> + '_ {
        let start = self
            .by_time
            .partition_point(|&index| self.log[index].time >= before);
        let end = self
            .by_time
            .partition_point(|&index| self.log[index].time > after)
            .max(start);

        self.by_time[start..end]
            .iter()
            .map(move |&index| &self.log[index])
    }
}

/// Decision history for all customers
///
/// Owned by a single `Validator`, which is the only writer.
#[derive(Debug, Default)]
pub struct HistoryStore {
    /// Map of customer ID to that customer's history
    customers: HashMap<CustomerId, CustomerHistory>,
}

impl HistoryStore {
    /// Create a new empty history store
    pub fn new() -> Self {
        HistoryStore {
            customers: HashMap::new(),
        }
    }

    /// Get a customer's history
    ///
    /// # Returns
    ///
    /// * `Some(&CustomerHistory)` - If the customer has at least one decision
    /// * `None` - If the customer has never been seen
    pub fn get(&self, customer_id: CustomerId) -> Option<&CustomerHistory> {
        self.customers.get(&customer_id)
    }

    /// Store a decision in its customer's history
    ///
    /// Creates the customer's history on first use.
    pub fn commit(&mut self, decision: Decision) {
        self.customers
            .entry(decision.customer_id)
            .or_default()
            .push(decision);
    }

    /// Number of customers with at least one decision
    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    /// Total number of stored decisions across all customers
    pub fn decision_count(&self) -> usize {
        self.customers.values().map(CustomerHistory::len).sum()
    }
}

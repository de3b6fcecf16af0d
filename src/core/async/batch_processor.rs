//! Batch processing with customer-based partitioning
//!
//! This module provides the `BatchProcessor`, which processes a batch of load
//! requests with one task per customer. Requests of different customers run
//! in parallel while each customer's requests keep their arrival order.
//!
//! # Design
//!
//! Every request carries its sequence number in the input. Partitioning keeps
//! the per-customer order; after all tasks finish, results are sorted back by
//! sequence number so output follows the input file.
//!
//! ```text
//! batch ──partition_by_customer──> customer 1: [r0, r3] ──task──┐
//!                                  customer 2: [r1]     ──task──┼──> sort by seq
//!                                  customer 3: [r2, r4] ──task──┘
//! ```

use std::collections::HashMap;

use super::AsyncValidator;
use crate::types::{CustomerId, Decision, LimitsError, LoadRequest};
use tracing::error;

/// A request tagged with its position in the input
pub type SequencedRequest = (u64, LoadRequest);

/// The decision for one sequenced request
#[derive(Debug, Clone, PartialEq)]
pub struct SequencedDecision {
    /// Position of the request in the input
    pub seq: u64,

    /// The decision produced for it
    pub decision: Decision,
}

/// Customer-partitioned batch processor
///
/// Cloning is cheap; clones share the validator's history.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    validator: AsyncValidator,
}

impl BatchProcessor {
    /// Create a new BatchProcessor
    pub fn new(validator: AsyncValidator) -> Self {
        Self { validator }
    }

    /// The validator shared by every task of this processor
    pub fn validator(&self) -> &AsyncValidator {
        &self.validator
    }

    /// Split a batch into per-customer lists, keeping arrival order in each
    pub fn partition_by_customer(
        &self,
        batch: Vec<SequencedRequest>,
    ) -> HashMap<CustomerId, Vec<SequencedRequest>> {
        let mut customer_batches: HashMap<CustomerId, Vec<SequencedRequest>> = HashMap::new();

        for item in batch {
            customer_batches.entry(item.1.customer_id).or_default().push(item);
        }

        customer_batches
    }

    /// Process one customer's requests in order
    pub fn process_customer_requests(
        &self,
        requests: Vec<SequencedRequest>,
    ) -> Vec<SequencedDecision> {
        requests
            .into_iter()
            .map(|(seq, request)| SequencedDecision {
                seq,
                decision: self.validator.process(&request),
            })
            .collect()
    }

    /// Process a batch with one task per customer
    ///
    /// # Returns
    ///
    /// Decisions for every request of the batch, sorted by sequence number
    ///
    /// # Errors
    ///
    /// Returns `LimitsError::RuntimeError` if a customer task panicked. The
    /// affected customer's decisions would otherwise be silently missing.
    pub async fn process_batch(
        &self,
        batch: Vec<SequencedRequest>,
    ) -> Result<Vec<SequencedDecision>, LimitsError> {
        let expected = batch.len();
        let customer_batches = self.partition_by_customer(batch);

        let mut tasks = Vec::with_capacity(customer_batches.len());
        for (customer_id, requests) in customer_batches {
            let processor = self.clone();
            let task =
                tokio::spawn(async move { processor.process_customer_requests(requests) });
            tasks.push((customer_id, task));
        }

        let mut results = Vec::with_capacity(expected);
        for (customer_id, task) in tasks {
            match task.await {
                Ok(customer_results) => results.extend(customer_results),
                Err(e) => {
                    error!(customer_id, error = %e, "customer task failed");
                    return Err(LimitsError::RuntimeError {
                        message: format!("task for customer {} failed: {}", customer_id, e),
                    });
                }
            }
        }

        results.sort_unstable_by_key(|result| result.seq);
        Ok(results)
    }
}

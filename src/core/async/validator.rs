//! Async load request validator
//!
//! `AsyncValidator` applies the same rule chain as `Validator`, but can be
//! shared between tasks. Each call to `process` evaluates and commits under
//! the customer's entry lock in the shared `AsyncHistoryStore`.
//!
//! Callers must still submit a given customer's requests in arrival order; the
//! lock only guarantees that two requests for one customer never interleave.

use std::sync::Arc;

use super::AsyncHistoryStore;
use crate::core::validator::evaluate;
use crate::types::{Decision, Limits, LimitsError, LoadRequest};
use tracing::debug;

/// Thread-safe load request validator
#[derive(Debug, Clone)]
pub struct AsyncValidator {
    limits: Limits,
    history: Arc<AsyncHistoryStore>,
}

impl AsyncValidator {
    /// Create a new AsyncValidator with empty history
    ///
    /// # Errors
    ///
    /// Returns `LimitsError::InvalidLimits` if any ceiling is zero.
    pub fn new(limits: Limits) -> Result<Self, LimitsError> {
        Self::with_history(limits, Arc::new(AsyncHistoryStore::new()))
    }

    /// Create an AsyncValidator over an existing shared history
    pub fn with_history(
        limits: Limits,
        history: Arc<AsyncHistoryStore>,
    ) -> Result<Self, LimitsError> {
        limits.validate()?;
        Ok(Self { limits, history })
    }

    /// The shared history store
    pub fn history(&self) -> &Arc<AsyncHistoryStore> {
        &self.history
    }

    /// Evaluate a request and commit the decision atomically
    pub fn process(&self, request: &LoadRequest) -> Decision {
        let decision = self.history.update(request.customer_id, |history| {
            let decision = evaluate(request, &self.limits, history);
            history.push(decision.clone());
            decision
        });

        if let Some(reason) = decision.reason {
            debug!(
                id = decision.id,
                customer_id = decision.customer_id,
                %reason,
                "load rejected"
            );
        }
        decision
    }
}

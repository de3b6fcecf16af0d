//! Processing strategy module for load request processing
//!
//! This module defines the Strategy pattern for complete processing pipelines,
//! covering input parsing, validation and output. Different implementations
//! (synchronous, asynchronous batch) can be selected at runtime and produce the
//! same output for the same input.

use crate::cli::StrategyType;
use crate::io::EmitOptions;
use crate::types::{Decision, Limits, LimitsError};
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Counts of a completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingSummary {
    /// Requests read and decided
    pub processed: u64,

    /// Requests accepted
    pub accepted: u64,

    /// Requests rejected
    pub rejected: u64,
}

impl ProcessingSummary {
    /// Count one decision
    pub fn record(&mut self, decision: &Decision) {
        self.processed += 1;
        if decision.is_accepted() {
            self.accepted += 1;
        } else {
            self.rejected += 1;
        }
    }
}

/// A complete processing pipeline
///
/// Reads load requests from `input_path`, validates them in input order and
/// writes one decision line per request to `output`.
pub trait ProcessingStrategy: Send + Sync {
    /// Run the pipeline
    ///
    /// # Errors
    ///
    /// Returns the first input, validation setup or output error. Decisions
    /// produced before the error may already have been written.
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, LimitsError>;
}

/// Build the strategy selected on the command line
///
/// `config` only applies to the async strategy; `None` uses the defaults.
pub fn create_strategy(
    strategy_type: StrategyType,
    limits: Limits,
    config: Option<BatchConfig>,
    emit: EmitOptions,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(limits, emit)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(limits, config, emit))
        }
    }
}

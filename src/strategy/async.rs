//! Asynchronous batch processing strategy
//!
//! This module provides a multi-threaded implementation of the
//! ProcessingStrategy trait. It processes requests in batches, with the
//! customers of a batch handled in parallel.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batched line reading)
//!     └── BatchProcessor (customer partitioning + tasks)
//!         └── AsyncValidator
//!             └── AsyncHistoryStore (DashMap, one entry lock per customer)
//! ```
//!
//! # Ordering
//!
//! - Batches are processed one after another, so a customer whose requests
//!   span several batches still sees them in file order
//! - Within a batch, each customer's requests run in order on one task
//! - Decisions are written in file order after each batch

use crate::core::r#async::{AsyncValidator, BatchProcessor};
use crate::io::async_reader::AsyncReader;
use crate::io::json_format::{write_decision, EmitOptions};
use crate::strategy::{ProcessingStrategy, ProcessingSummary};
use crate::types::{Limits, LimitsError};
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Configuration for batch processing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of requests read and processed per batch
    pub batch_size: usize,

    /// Number of runtime worker threads
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a BatchConfig, replacing zero values with defaults
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = default.batch_size,
                "invalid batch_size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                max_concurrent_batches,
                default = default.max_concurrent_batches,
                "invalid max_concurrent_batches, using default"
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Batched, customer-parallel processing
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    limits: Limits,
    config: BatchConfig,
    emit: EmitOptions,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy
    pub fn new(limits: Limits, config: BatchConfig, emit: EmitOptions) -> Self {
        Self {
            limits,
            config,
            emit,
        }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, LimitsError> {
        let validator = AsyncValidator::new(self.limits)?;
        let processor = BatchProcessor::new(validator);

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| LimitsError::RuntimeError {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        runtime.block_on(async {
            let mut reader = AsyncReader::open(input_path).await?;
            let mut summary = ProcessingSummary::default();

            loop {
                let batch = reader.read_batch(self.config.batch_size).await?;
                if batch.is_empty() {
                    break;
                }

                // The next batch is read only after this one is fully decided
                let results = processor.process_batch(batch).await?;
                for result in &results {
                    summary.record(&result.decision);
                    write_decision(&result.decision, output, self.emit)?;
                }
                debug!(size = results.len(), "batch processed");
            }

            output.flush()?;
            debug!(
                customers = processor.validator().history().customer_count(),
                decisions = processor.validator().history().decision_count(),
                "async processing finished"
            );

            Ok::<_, LimitsError>(summary)
        })
    }
}

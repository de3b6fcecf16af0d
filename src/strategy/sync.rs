//! Synchronous processing strategy
//!
//! This module provides the reference, single-threaded implementation of the
//! ProcessingStrategy trait. It replays the input strictly in file order.
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - Input parsing to `SyncReader` (iterator interface)
//! - Rule evaluation and history to `Validator`
//! - Output to `json_format::write_decision`
//!
//! # Memory Efficiency
//!
//! Requests are read and decided one at a time and each decision is written
//! as soon as it is made. Memory grows with the decision history only.

use crate::core::Validator;
use crate::io::json_format::{write_decision, EmitOptions};
use crate::io::sync_reader::SyncReader;
use crate::strategy::{ProcessingStrategy, ProcessingSummary};
use crate::types::{Limits, LimitsError};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Sequential processing with a single `Validator`
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy {
    limits: Limits,
    emit: EmitOptions,
}

impl SyncProcessingStrategy {
    /// Create a new SyncProcessingStrategy
    pub fn new(limits: Limits, emit: EmitOptions) -> Self {
        Self { limits, emit }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, LimitsError> {
        let mut validator = Validator::new(self.limits)?;
        let reader = SyncReader::open(input_path)?;
        let mut summary = ProcessingSummary::default();

        for result in reader {
            let request = result?;
            let decision = validator.process(&request);
            summary.record(&decision);
            write_decision(&decision, output, self.emit)?;
        }

        output.flush()?;
        debug!(
            customers = validator.history().customer_count(),
            decisions = validator.history().decision_count(),
            "sync processing finished"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const LIMITS: Limits = Limits {
        daily_amount: 5000,
        daily_transactions: 3,
        weekly_amount: 20000,
    };

    fn create_temp_input(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn line(id: u64, customer_id: u64, amount: &str, time: &str) -> String {
        format!(
            r#"{{"id":"{}","customer_id":"{}","load_amount":"{}","time":"{}"}}"#,
            id, customer_id, amount, time
        )
    }

    #[test]
    fn test_sync_strategy_first_request_baseline() {
        let content = [
            line(1, 1, "$1750.00", "2000-01-01T00:00:00Z"),
            line(2, 2, "$3600.00", "2000-01-01T00:00:00Z"),
            line(3, 3, "$5001.00", "2000-01-01T00:00:00Z"),
        ]
        .join("\n");
        let file = create_temp_input(&content);

        let strategy = SyncProcessingStrategy::new(LIMITS, EmitOptions::default());
        let mut output = Vec::new();
        let summary = strategy.process(file.path(), &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "{\"id\":\"1\",\"customer_id\":\"1\",\"accepted\":true}\n\
             {\"id\":\"2\",\"customer_id\":\"2\",\"accepted\":true}\n\
             {\"id\":\"3\",\"customer_id\":\"3\",\"accepted\":false}\n"
        );
        assert_eq!(
            summary,
            ProcessingSummary {
                processed: 3,
                accepted: 2,
                rejected: 1
            }
        );
    }

    #[test]
    fn test_sync_strategy_includes_reason_when_asked() {
        let content = [
            line(1, 1, "$100.00", "2000-01-01T00:00:00Z"),
            line(1, 1, "$100.00", "2000-01-01T01:00:00Z"),
        ]
        .join("\n");
        let file = create_temp_input(&content);

        let strategy = SyncProcessingStrategy::new(
            LIMITS,
            EmitOptions {
                include_reason: true,
            },
        );
        let mut output = Vec::new();
        strategy.process(file.path(), &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], r#"{"id":"1","customer_id":"1","accepted":true}"#);
        assert_eq!(
            lines[1],
            r#"{"id":"1","customer_id":"1","accepted":false,"reason":"transaction id is not unique for customer, ignoring"}"#
        );
    }

    #[test]
    fn test_sync_strategy_handles_missing_file() {
        let strategy = SyncProcessingStrategy::new(LIMITS, EmitOptions::default());
        let mut output = Vec::new();

        let result = strategy.process(Path::new("nonexistent.txt"), &mut output);
        assert!(matches!(result, Err(LimitsError::FileNotFound { .. })));
    }

    #[test]
    fn test_sync_strategy_stops_at_malformed_line() {
        let content = format!(
            "{}\n{}\n{}\n",
            line(1, 1, "$100.00", "2000-01-01T00:00:00Z"),
            line(2, 1, "$100.00", "yesterday"),
            line(3, 1, "$100.00", "2000-01-01T02:00:00Z"),
        );
        let file = create_temp_input(&content);

        let strategy = SyncProcessingStrategy::new(LIMITS, EmitOptions::default());
        let mut output = Vec::new();
        let result = strategy.process(file.path(), &mut output);

        assert!(matches!(
            result,
            Err(LimitsError::ParseError { line: Some(2), .. })
        ));
        assert_eq!(String::from_utf8(output).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_sync_strategy_rejects_zero_limits() {
        let file = create_temp_input("");
        let limits = Limits {
            weekly_amount: 0,
            ..LIMITS
        };

        let strategy = SyncProcessingStrategy::new(limits, EmitOptions::default());
        let mut output = Vec::new();

        assert_eq!(
            strategy.process(file.path(), &mut output).unwrap_err(),
            LimitsError::invalid_limits("weekly_amount")
        );
    }
}

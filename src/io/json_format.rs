//! JSON format handling for load requests and decisions
//!
//! This module centralizes all line-delimited JSON concerns, providing:
//! - JsonRecord structure for deserialization
//! - Conversion from JSON records to domain types
//! - Decision output serialization
//!
//! Conversion functions are pure (no I/O) for easy testing.

use crate::types::{CustomerId, Decision, LimitsError, LoadId, LoadRequest};
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;

/// Timestamp layout of the `time` field
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Longest accepted input line in bytes, line terminator excluded
pub const MAX_LINE_LENGTH: usize = 4 * 1024;

/// Raw input line as found in the file
///
/// Every field is a string; conversion to domain types happens in
/// `convert_json_record`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct JsonRecord {
    pub id: String,
    pub customer_id: String,
    pub load_amount: String,
    pub time: String,
}

/// Output options chosen on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitOptions {
    /// Add the rejection reason to rejected decisions
    pub include_reason: bool,
}

/// One line of output
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct OutputRecord {
    pub id: String,
    pub customer_id: String,
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl OutputRecord {
    /// Build the output line for a decision
    pub fn from_decision(decision: &Decision, options: EmitOptions) -> Self {
        let reason = if options.include_reason {
            decision.reason.map(|reason| reason.to_string())
        } else {
            None
        };

        OutputRecord {
            id: decision.id.to_string(),
            customer_id: decision.customer_id.to_string(),
            accepted: decision.is_accepted(),
            reason,
        }
    }
}

/// Parse one input line into a load request
///
/// # Errors
///
/// Returns `LimitsError::ParseError` for invalid JSON and the conversion
/// errors of `convert_json_record`. No line number is attached here.
pub fn parse_line(line: &str) -> Result<LoadRequest, LimitsError> {
    let record: JsonRecord = serde_json::from_str(line)?;
    convert_json_record(record)
}

/// Convert a JsonRecord into a LoadRequest
///
/// - `id` and `customer_id` must be unsigned integers
/// - `load_amount` may carry a single leading `$` and must not be negative
/// - `time` must be `YYYY-MM-DDTHH:MM:SSZ`
///
/// Surrounding whitespace in any field is ignored.
///
/// # Errors
///
/// Returns `LimitsError::InvalidField` or `LimitsError::InvalidTimestamp`
/// naming the first field that fails to convert.
pub fn convert_json_record(record: JsonRecord) -> Result<LoadRequest, LimitsError> {
    let id: LoadId = parse_id("id", &record.id)?;
    let customer_id: CustomerId = parse_id("customer_id", &record.customer_id)?;
    let load_amount = parse_amount(&record.load_amount)?;
    let time = parse_time(&record.time)?;

    Ok(LoadRequest {
        id,
        customer_id,
        load_amount,
        time,
    })
}

fn parse_id(field: &str, value: &str) -> Result<u64, LimitsError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| LimitsError::invalid_field(field, value))
}

fn parse_amount(value: &str) -> Result<Decimal, LimitsError> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);

    match Decimal::from_str(digits) {
        Ok(amount) if !amount.is_sign_negative() => Ok(amount),
        _ => Err(LimitsError::invalid_field("load_amount", value)),
    }
}

fn parse_time(value: &str) -> Result<DateTime<Utc>, LimitsError> {
    NaiveDateTime::parse_from_str(value.trim(), TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| LimitsError::invalid_timestamp(value))
}

/// Write one decision as a JSON line
///
/// Does not flush.
pub fn write_decision(
    decision: &Decision,
    output: &mut dyn Write,
    options: EmitOptions,
) -> Result<(), LimitsError> {
    let record = OutputRecord::from_decision(decision, options);
    serde_json::to_writer(&mut *output, &record).map_err(|e| LimitsError::IoError {
        message: format!("Failed to write decision {}: {}", decision.id, e),
    })?;
    output.write_all(b"\n")?;
    Ok(())
}

/// Write decisions as JSON lines
///
/// One object per decision, in the order given, then flush.
///
/// # Errors
///
/// Returns `LimitsError::IoError` if writing or flushing fails.
pub fn write_decisions(
    decisions: &[Decision],
    output: &mut dyn Write,
    options: EmitOptions,
) -> Result<(), LimitsError> {
    for decision in decisions {
        write_decision(decision, output, options)?;
    }

    output.flush()?;
    Ok(())
}

//! I/O module
//!
//! Handles line-delimited JSON parsing and output.
//!
//! # Components
//!
//! - `json_format` - JSON format handling (record conversion, output serialization)
//! - `sync_reader` - Synchronous reader with iterator interface
//! - `async_reader` - Asynchronous reader with batch reading interface

pub mod async_reader;
pub mod json_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use json_format::{
    convert_json_record, write_decision, write_decisions, EmitOptions, JsonRecord, OutputRecord,
};
pub use sync_reader::SyncReader;

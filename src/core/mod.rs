//! Core business logic module
//!
//! This module contains the load validation components:
//! - `window` - Day and week window boundaries
//! - `history_store` - Per-customer decision history
//! - `rules` - The ordered rule chain
//! - `validator` - Evaluate and commit orchestration
//! - `async` - Thread-safe implementations for batched processing

pub mod r#async;
pub mod history_store;
pub mod rules;
pub mod validator;
pub mod window;

pub use history_store::{CustomerHistory, HistoryStore};
pub use r#async::{AsyncHistoryStore, AsyncValidator, BatchProcessor};
pub use rules::{Rule, RULE_CHAIN};
pub use validator::Validator;

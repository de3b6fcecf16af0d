//! Run configuration
//!
//! The configuration is a JSON file naming the input and output files and the
//! load limits:
//!
//! ```json
//! {
//!   "name": "load-limits",
//!   "desc": "Customer load validation",
//!   "input": "input.txt",
//!   "output": "output.txt",
//!   "limits": { "daily_amount": 5000, "daily_transactions": 3, "weekly_amount": 20000 }
//! }
//! ```
//!
//! Every field is optional in the file. Limits given on the command line
//! override the file; a run needs all three ceilings from one source or the
//! other.

use crate::types::{Limits, LimitsError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file read when none is given on the command line
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Contents of the configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Display name of the run
    pub name: Option<String>,

    /// Free-form description
    pub desc: Option<String>,

    /// Input file, used when none is given on the command line
    pub input: Option<PathBuf>,

    /// Output file, used when none is given on the command line
    pub output: Option<PathBuf>,

    /// Load ceilings
    pub limits: Option<Limits>,

    /// Version string of the configuration
    pub version: Option<String>,
}

/// Individual ceilings given on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LimitOverrides {
    pub daily_amount: Option<u64>,
    pub daily_transactions: Option<u32>,
    pub weekly_amount: Option<u64>,
}

impl LimitOverrides {
    fn is_empty(&self) -> bool {
        self.daily_amount.is_none()
            && self.daily_transactions.is_none()
            && self.weekly_amount.is_none()
    }
}

impl Config {
    /// Load a configuration file
    ///
    /// # Errors
    ///
    /// - `LimitsError::FileNotFound` if the file does not exist
    /// - `LimitsError::ConfigError` if it cannot be read or is not valid JSON
    pub fn load(path: &Path) -> Result<Self, LimitsError> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LimitsError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => LimitsError::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            )),
        })?;

        serde_json::from_str(&content).map_err(|e| {
            LimitsError::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Load the configuration for a run
    ///
    /// An explicitly given file must exist. Without one, `config.json` in the
    /// working directory is read if present, otherwise an empty configuration
    /// is used.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, LimitsError> {
        match explicit {
            Some(path) => Self::load(path),
            None => match Self::load(Path::new(DEFAULT_CONFIG_FILE)) {
                Err(LimitsError::FileNotFound { .. }) => {
                    debug!(path = DEFAULT_CONFIG_FILE, "no config file, using defaults");
                    Ok(Self::default())
                }
                result => result,
            },
        }
    }

    /// Apply command line ceilings on top of the file
    ///
    /// Without limits in the file, overrides only take effect when all three
    /// ceilings are given.
    pub fn apply_overrides(&mut self, overrides: LimitOverrides) {
        if overrides.is_empty() {
            return;
        }

        match self.limits.as_mut() {
            Some(limits) => {
                if let Some(daily_amount) = overrides.daily_amount {
                    limits.daily_amount = daily_amount;
                }
                if let Some(daily_transactions) = overrides.daily_transactions {
                    limits.daily_transactions = daily_transactions;
                }
                if let Some(weekly_amount) = overrides.weekly_amount {
                    limits.weekly_amount = weekly_amount;
                }
            }
            None => {
                if let LimitOverrides {
                    daily_amount: Some(daily_amount),
                    daily_transactions: Some(daily_transactions),
                    weekly_amount: Some(weekly_amount),
                } = overrides
                {
                    self.limits = Some(Limits {
                        daily_amount,
                        daily_transactions,
                        weekly_amount,
                    });
                }
            }
        }
    }

    /// The effective limits
    ///
    /// # Errors
    ///
    /// - `LimitsError::ConfigError` if no limits are configured
    /// - `LimitsError::InvalidLimits` if a ceiling is zero
    pub fn limits(&self) -> Result<Limits, LimitsError> {
        let limits = self.limits.ok_or_else(|| {
            LimitsError::config(
                "no limits configured; set `limits` in the config file or pass all three limit flags",
            )
        })?;
        limits.validate()?;
        Ok(limits)
    }
}

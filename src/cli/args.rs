use crate::config::LimitOverrides;
use crate::io::EmitOptions;
use crate::strategy::BatchConfig;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Validate customer load requests against daily and weekly limits
#[derive(Parser, Debug)]
#[command(name = "load-limits", version)]
#[command(about = "Validate customer load requests against daily and weekly limits", long_about = None)]
pub struct CliArgs {
    /// Configuration file (JSON)
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to the JSON configuration file (default: config.json if present)"
    )]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Process a file of load requests and print one decision per line
    Process(ProcessArgs),

    /// Print the effective load limits
    Limits(LimitArgs),

    /// Print the tool name and the configured version
    Version,
}

/// Arguments of the `process` subcommand
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessArgs {
    /// Input file with one JSON load request per line
    #[arg(value_name = "INPUT", help = "Path to the input file (default: `input` from config)")]
    pub input_file: Option<PathBuf>,

    /// Output file for decisions
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Write decisions to FILE (default: `output` from config, else stdout)"
    )]
    pub output_file: Option<PathBuf>,

    /// Processing strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Processing strategy: 'sync' for sequential or 'async' for customer-parallel batches"
    )]
    pub strategy: StrategyType,

    /// Number of requests per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of requests per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of worker threads (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Number of worker threads (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Add the rejection reason to rejected decisions
    #[arg(long = "include-reason")]
    pub include_reason: bool,

    #[command(flatten)]
    pub limits: LimitArgs,
}

/// Ceiling overrides shared by every subcommand
#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LimitArgs {
    /// Override the daily amount ceiling
    #[arg(long = "daily-amount", value_name = "AMOUNT")]
    pub daily_amount: Option<u64>,

    /// Override the daily number of loads
    #[arg(long = "daily-transactions", value_name = "COUNT")]
    pub daily_transactions: Option<u32>,

    /// Override the weekly amount ceiling
    #[arg(long = "weekly-amount", value_name = "AMOUNT")]
    pub weekly_amount: Option<u64>,
}

/// Available processing strategies
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    #[default]
    Sync,
    Async,
}

impl CliArgs {
    /// The subcommand to run
    ///
    /// No subcommand means `process` with default arguments.
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Process(ProcessArgs::default()))
    }
}

impl ProcessArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values use the defaults; zero values fall back to the defaults
    /// with a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    /// Output options selected by flags
    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            include_reason: self.include_reason,
        }
    }
}

impl LimitArgs {
    /// Convert to config overrides
    pub fn to_overrides(&self) -> LimitOverrides {
        LimitOverrides {
            daily_amount: self.daily_amount,
            daily_transactions: self.daily_transactions,
            weekly_amount: self.weekly_amount,
        }
    }
}

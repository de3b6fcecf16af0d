//! Load Limits Engine CLI
//!
//! Command-line interface for validating customer load requests against
//! daily and weekly limits.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- process input.txt > output.txt
//! cargo run -- -c config.json process input.txt --strategy async --batch-size 2000
//! cargo run -- process input.txt --include-reason --daily-amount 6000
//! cargo run -- limits
//! cargo run -- -c config.json version
//! ```
//!
//! Decisions are written to stdout (or `--output`), one JSON object per line,
//! in input order. Logs go to stderr and are filtered with `RUST_LOG`
//! (default `info`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing configuration, file not found, malformed input, etc.)

use load_limits_engine::cli::{self, CliArgs, Command, ProcessArgs, StrategyType};
use load_limits_engine::config::Config;
use load_limits_engine::strategy;
use load_limits_engine::types::LimitsError;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = cli::parse_args();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<(), LimitsError> {
    let mut config = Config::resolve(args.config.as_deref())?;

    match args.command() {
        Command::Limits(limit_args) => {
            config.apply_overrides(limit_args.to_overrides());
            let limits = config.limits()?;
            cli::write_limits(&limits, &mut io::stdout().lock())?;
            Ok(())
        }
        Command::Version => {
            cli::write_version(&config, &mut io::stdout().lock())?;
            Ok(())
        }
        Command::Process(process_args) => process_requests(config, &process_args),
    }
}

fn process_requests(mut config: Config, args: &ProcessArgs) -> Result<(), LimitsError> {
    config.apply_overrides(args.limits.to_overrides());
    let limits = config.limits()?;

    let input = args
        .input_file
        .clone()
        .or_else(|| config.input.clone())
        .ok_or_else(|| {
            LimitsError::config("no input file; pass INPUT or set `input` in the config file")
        })?;

    let mut output: Box<dyn Write> = match args.output_file.as_ref().or(config.output.as_ref()) {
        Some(path) => {
            let file = File::create(path).map_err(|e| LimitsError::IoError {
                message: format!("Failed to create output file '{}': {}", path.display(), e),
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let batch_config = match args.strategy {
        StrategyType::Async => Some(args.to_batch_config()),
        StrategyType::Sync => None,
    };
    let strategy =
        strategy::create_strategy(args.strategy, limits, batch_config, args.emit_options());

    info!(
        input = %input.display(),
        strategy = ?args.strategy,
        daily_amount = limits.daily_amount,
        daily_transactions = limits.daily_transactions,
        weekly_amount = limits.weekly_amount,
        "processing load requests"
    );

    let summary = strategy.process(&input, &mut output)?;

    info!(
        processed = summary.processed,
        accepted = summary.accepted,
        rejected = summary.rejected,
        "processing complete"
    );
    Ok(())
}

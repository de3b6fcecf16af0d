// CLI module
// Command-line interface, argument parsing and limits display

mod args;

pub use args::{CliArgs, Command, LimitArgs, ProcessArgs, StrategyType};

use crate::config::Config;
use crate::types::Limits;
use clap::Parser;
use std::io::{self, Write};

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, unknown subcommand, or `--help` /
/// `--version`), clap prints the message and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Name shown when the config file does not set one
pub const DEFAULT_NAME: &str = "load-limits";

/// Print the tool name and version, then the description if configured
///
/// Name and version come from the config file, falling back to the package
/// name and version.
pub fn write_version(config: &Config, output: &mut dyn Write) -> io::Result<()> {
    let name = config.name.as_deref().unwrap_or(DEFAULT_NAME);
    let version = config
        .version
        .as_deref()
        .unwrap_or(env!("CARGO_PKG_VERSION"));
    writeln!(output, "{} v{}", name, version)?;
    if let Some(desc) = &config.desc {
        writeln!(output, "{}", desc)?;
    }
    output.flush()
}

/// Print limits in human readable form
pub fn write_limits(limits: &Limits, output: &mut dyn Write) -> io::Result<()> {
    writeln!(output, "Customer load limits:")?;
    writeln!(
        output,
        "\tMax of ${} can be loaded per day.",
        limits.daily_amount
    )?;
    writeln!(
        output,
        "\tMax of ${} can be loaded per week.",
        limits.weekly_amount
    )?;
    writeln!(
        output,
        "\tMax of {} loads per day.",
        limits.daily_transactions
    )?;
    output.flush()
}

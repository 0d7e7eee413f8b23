//! CLI argument definitions for the MedDRA autofill batch driver.

use std::path::PathBuf;

use autofill_core::DEFAULT_MAX_ATTEMPTS;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "meddra-autofill",
    version,
    about = "Validate adverse-event cases and submit them to a case-entry form",
    long_about = "Load adverse-event cases from a CSV file, validate them against MedDRA\n\
                  coding rules, and submit valid cases one at a time with bounded retries.\n\n\
                  Exits with status 1 when any case could not be submitted."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include case field values in logs (contains patient data).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a case file and submit valid cases.
    Run(RunArgs),

    /// Validate a case file and report issues without submitting.
    Validate(InputArgs),
}

/// Arguments shared by every subcommand that reads a case file.
#[derive(Args)]
pub struct InputArgs {
    /// CSV file of adverse-event cases.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Date used as "today" for the onset-date check (YYYY-MM-DD).
    #[arg(long = "reference-date", value_name = "DATE")]
    pub reference_date: Option<NaiveDate>,

    /// MedDRA level filled in when a row has none.
    #[arg(long = "default-meddra-level", value_name = "LEVEL", default_value = "PT")]
    pub default_meddra_level: String,

    /// MedDRA version filled in when a row has none.
    #[arg(
        long = "default-meddra-version",
        value_name = "VERSION",
        default_value = "MOCK-1.0"
    )]
    pub default_meddra_version: String,
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Log intended form fills instead of submitting.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Form endpoint receiving one JSON POST per case (required unless --dry-run).
    #[arg(long = "target-url", value_name = "URL", required_unless_present = "dry_run")]
    pub target_url: Option<String>,

    /// Attempts per case before it is dead-lettered.
    #[arg(
        long = "max-attempts",
        value_name = "N",
        default_value_t = DEFAULT_MAX_ATTEMPTS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_attempts: u32,

    /// Per-request timeout in seconds for the HTTP worker.
    #[arg(long = "timeout-secs", value_name = "SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// JSON file overriding the field → selector mapping.
    #[arg(long = "mapping", value_name = "FILE")]
    pub mapping: Option<PathBuf>,

    /// Write the batch report as JSON.
    #[arg(long = "report-json", value_name = "PATH")]
    pub report_json: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_requires_target_url_without_dry_run() {
        let parsed = Cli::try_parse_from(["meddra-autofill", "run", "cases.csv"]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from(["meddra-autofill", "run", "cases.csv", "--dry-run"]);
        assert!(parsed.is_ok());
    }

    #[test]
    fn max_attempts_must_be_positive() {
        let parsed = Cli::try_parse_from([
            "meddra-autofill",
            "run",
            "cases.csv",
            "--dry-run",
            "--max-attempts",
            "0",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn reference_date_is_parsed() {
        let cli = Cli::try_parse_from([
            "meddra-autofill",
            "validate",
            "cases.csv",
            "--reference-date",
            "2025-06-30",
        ])
        .unwrap();
        let Command::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.reference_date, NaiveDate::from_ymd_opt(2025, 6, 30));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

// piiguard/src/cli.rs
//! This file defines the command-line interface (CLI) for the piiguard application,
//! including all available commands and their arguments.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "piiguard",
    version = env!("CARGO_PKG_VERSION"),
    about = "Detect, score and redact PII in OCR text and images",
    long_about = "PiiGuard scans text produced by OCR for personally identifiable information (Aadhaar, PAN, GSTIN, phone numbers, emails, names, places, organizations and dates), computes a risk assessment, and produces a masked transcript and, given OCR word boxes, a blurred copy of the source image.",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Suppress all log output.
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG).
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Path to a custom configuration file (YAML), merged over the defaults.
    #[arg(long = "config", value_name = "FILE", global = true, env = "PIIGUARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable entity recognition and use pattern rules only.
    #[arg(long = "no-entities", global = true)]
    pub no_entities: bool,

    /// Explicitly enable only these pattern names (comma-separated).
    #[arg(long, short = 'e', value_delimiter = ',', global = true)]
    pub enable: Vec<String>,

    /// Explicitly disable these pattern names (comma-separated).
    #[arg(long, short = 'x', value_delimiter = ',', global = true)]
    pub disable: Vec<String>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `piiguard` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scans text for PII and prints a report.
    Scan(ScanCommand),

    /// Writes the redacted text and, optionally, a blurred image.
    Redact(RedactCommand),

    /// Scans many files concurrently, one JSON report per line.
    Batch(BatchCommand),

    /// Lists configured patterns and risk weights.
    Rules,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Json,
    Table,
}

/// Arguments for the `scan` command.
#[derive(Args, Debug)]
pub struct ScanCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input_file: Option<PathBuf>,

    /// Output format for the report.
    #[arg(long, short = 'f', value_enum, default_value = "json")]
    pub format: ReportFormat,
}

/// Arguments for the `redact` command.
#[derive(Args, Debug)]
pub struct RedactCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input_file: Option<PathBuf>,

    /// Write redacted text to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Source image to blur.
    #[arg(long, value_name = "IMAGE", requires = "image_out")]
    pub image: Option<PathBuf>,

    /// OCR word boxes for the image (JSON array or Tesseract TSV).
    #[arg(long, value_name = "FILE", requires = "image")]
    pub boxes: Option<PathBuf>,

    /// Where to write the redacted image.
    #[arg(long = "image-out", value_name = "FILE", requires = "image")]
    pub image_out: Option<PathBuf>,
}

/// Arguments for the `batch` command.
#[derive(Args, Debug)]
pub struct BatchCommand {
    /// Text files to scan.
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

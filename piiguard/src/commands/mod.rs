// piiguard/src/commands/mod.rs
//! Command implementations and the shared setup they run on.

pub mod batch;
pub mod redact;
pub mod rules;
pub mod scan;

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::info;
use std::io;

use piiguard_core::{GuardConfig, Pipeline};

use crate::cli::Cli;
use crate::ui::output_format;

/// Loads defaults, merges the discovered user file and applies the
/// `--enable` / `--disable` filters.
pub fn load_config(cli: &Cli) -> Result<GuardConfig> {
    let mut config = GuardConfig::discover(cli.config.as_deref()).context("Failed to load configuration")?;
    if !cli.enable.is_empty() || !cli.disable.is_empty() {
        config.set_active_patterns(&cli.enable, &cli.disable);
    }
    if cli.no_entities {
        config.entities.enabled = Some(false);
    }
    Ok(config)
}

/// Builds the process-wide pipeline. Model and pattern failures are fatal.
pub fn build_pipeline(config: &GuardConfig) -> Result<Pipeline> {
    let pipeline = Pipeline::from_config(config).context("Failed to initialize the PII pipeline")?;
    info!("Pipeline initialized.");
    Ok(pipeline)
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), supports_color);
}

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), supports_color);
}

// piiguard/src/main.rs
//! PiiGuard entry point.
//!
//! Loads configuration once, builds the shared pipeline and dispatches the
//! selected command.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use piiguard::cli::{Cli, Commands};
use piiguard::commands::{self, batch, redact, rules, scan};
use piiguard::logger;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_logger(logger::level_for_flags(cli.quiet, cli.debug));

    let config = commands::load_config(&cli)?;

    if let Commands::Rules = cli.command {
        return rules::run_rules(&config);
    }

    let pipeline = Arc::new(commands::build_pipeline(&config)?);

    match &cli.command {
        Commands::Scan(cmd) => scan::run_scan(&pipeline, cmd),
        Commands::Redact(cmd) => redact::run_redact(&pipeline, cmd, cli.quiet),
        Commands::Batch(cmd) => batch::run_batch(Arc::clone(&pipeline), cmd).await,
        Commands::Rules => rules::run_rules(&config),
    }
}

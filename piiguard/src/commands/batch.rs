// piiguard/src/commands/batch.rs
//! `piiguard batch`: one full pipeline run per file, concurrently, over a
//! single shared pipeline.

use anyhow::{anyhow, Context, Result};
use log::{debug, error};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use piiguard_core::{PiiReport, Pipeline};

use crate::cli::BatchCommand;
use crate::commands::error_msg;

fn scan_file(pipeline: &Pipeline, path: &PathBuf) -> Result<PiiReport> {
    let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let analysis = pipeline.analyze_text(&text);
    Ok(PiiReport::new(path.display().to_string(), text, analysis))
}

/// Reports are printed as JSON lines in argument order.
pub async fn run_batch(pipeline: Arc<Pipeline>, cmd: &BatchCommand) -> Result<()> {
    let handles: Vec<_> = cmd
        .files
        .iter()
        .cloned()
        .map(|path| {
            let pipeline = Arc::clone(&pipeline);
            tokio::task::spawn_blocking(move || {
                let result = scan_file(&pipeline, &path);
                (path, result)
            })
        })
        .collect();
    debug!("Spawned {} scan task(s).", handles.len());

    let mut failures = 0usize;
    let stdout = io::stdout();
    for handle in handles {
        let (path, result) = handle.await.context("Scan task panicked")?;
        match result {
            Ok(report) => {
                let line = report.to_json().context("Failed to serialize report")?;
                let mut writer = stdout.lock();
                writeln!(writer, "{}", line)?;
            }
            Err(e) => {
                failures += 1;
                error!("Batch item {} failed: {:#}", path.display(), e);
                error_msg(format!("{:#}", e));
            }
        }
    }

    if failures > 0 {
        return Err(anyhow!("{} of {} file(s) failed", failures, cmd.files.len()));
    }
    Ok(())
}

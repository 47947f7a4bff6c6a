// piiguard/src/commands/scan.rs
//! `piiguard scan`: report PII and risk for one text.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::debug;
use std::io::{self, Write};

use piiguard_core::{PiiReport, Pipeline};

use crate::cli::{ReportFormat, ScanCommand};
use crate::ui::output_format;
use crate::utils::input::{read_input, source_name};

pub fn run_scan(pipeline: &Pipeline, cmd: &ScanCommand) -> Result<()> {
    let path = cmd.input_file.as_deref();
    let text = read_input(path)?;
    let analysis = pipeline.analyze_text(&text);
    debug!("Scan found {} match(es).", analysis.matches.len());

    let report = PiiReport::new(source_name(path), text, analysis);

    let stdout = io::stdout();
    let supports_color = stdout.is_terminal();
    let mut writer = stdout.lock();
    match cmd.format {
        ReportFormat::Json => {
            let json = report.to_json_pretty().context("Failed to serialize report")?;
            writeln!(writer, "{}", json)?;
        }
        ReportFormat::Table => output_format::print_report_table(&mut writer, &report, supports_color)?,
    }
    Ok(())
}

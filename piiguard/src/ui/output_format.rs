// piiguard/src/ui/output_format.rs
//! Console rendering for reports and messages.
//!
//! Colors are applied only when the caller says the target stream supports
//! them, so redirected output stays plain.

use std::io::{self, Write};

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use owo_colors::{AnsiColors, OwoColorize};

use piiguard_core::{PiiReport, RiskLevel, WeightTable};
use piiguard_core::config::PatternRule;

fn paint(text: &str, color: AnsiColors, enable_colors: bool) -> String {
    if enable_colors {
        text.color(color).to_string()
    } else {
        text.to_string()
    }
}

pub fn risk_color(level: RiskLevel) -> AnsiColors {
    match level {
        RiskLevel::High => AnsiColors::BrightRed,
        RiskLevel::Medium => AnsiColors::Yellow,
        RiskLevel::Low => AnsiColors::Green,
    }
}

pub fn print_info_message<W: Write>(writer: &mut W, message: &str, enable_colors: bool) -> io::Result<()> {
    writeln!(writer, "{}", paint(message, AnsiColors::Cyan, enable_colors))
}

pub fn print_warn_message<W: Write>(writer: &mut W, message: &str, enable_colors: bool) -> io::Result<()> {
    writeln!(writer, "{}", paint(&format!("Warning: {}", message), AnsiColors::Yellow, enable_colors))
}

pub fn print_error_message<W: Write>(writer: &mut W, message: &str, enable_colors: bool) -> io::Result<()> {
    writeln!(writer, "{}", paint(&format!("Error: {}", message), AnsiColors::Red, enable_colors))
}

/// One-line risk summary, e.g. `Risk: Medium (score 14, 2 item(s))`.
pub fn format_risk_line(report: &PiiReport, enable_colors: bool) -> String {
    let risk = &report.risk_assessment;
    format!(
        "Risk: {} (score {}, {} item(s))",
        paint(risk.level.as_str(), risk_color(risk.level), enable_colors),
        risk.score,
        risk.count
    )
}

/// Renders a report as a table of matches followed by the risk line.
pub fn print_report_table<W: Write>(writer: &mut W, report: &PiiReport, enable_colors: bool) -> io::Result<()> {
    writeln!(writer, "Source: {}", report.source)?;

    if report.detected_pii.is_empty() {
        writeln!(writer, "No PII detected.")?;
    } else {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["#", "Type", "Value", "Start", "End"]);
        for (idx, m) in report.detected_pii.iter().enumerate() {
            table.add_row(vec![
                Cell::new(idx + 1),
                Cell::new(m.kind.as_str()),
                Cell::new(&m.value),
                Cell::new(m.start),
                Cell::new(m.end),
            ]);
        }
        writeln!(writer, "{table}")?;
    }

    writeln!(writer, "{}", format_risk_line(report, enable_colors))
}

/// Renders the configured patterns and the weight table. `active` is the
/// number of rules that compiled into the running pattern set.
pub fn print_rules_table<W: Write>(
    writer: &mut W,
    rules: &[PatternRule],
    weights: &WeightTable,
    active: usize,
) -> io::Result<()> {
    let mut patterns = Table::new();
    patterns
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Pattern", "Kind", "Weight", "Enabled", "Validated", "Description"]);
    for rule in rules {
        let kind = rule.resolved_kind();
        patterns.add_row(vec![
            Cell::new(&rule.name),
            Cell::new(kind.as_str()),
            Cell::new(weights.weight(&kind)),
            Cell::new(if rule.is_enabled() { "yes" } else { "no" }),
            Cell::new(if rule.programmatic_validation { "yes" } else { "no" }),
            Cell::new(rule.description.as_deref().unwrap_or("")),
        ]);
    }
    writeln!(writer, "{patterns}")?;

    let mut weight_table = Table::new();
    weight_table.load_preset(UTF8_FULL).set_header(vec!["Kind", "Weight"]);
    for (kind, weight) in weights.iter() {
        weight_table.add_row(vec![Cell::new(kind.as_str()), Cell::new(weight)]);
    }
    writeln!(writer, "{weight_table}")?;

    writeln!(writer, "{} of {} pattern(s) active.", active, rules.len())
}

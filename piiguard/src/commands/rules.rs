// piiguard/src/commands/rules.rs
//! `piiguard rules`: list patterns and weights.

use anyhow::Result;
use std::io;

use piiguard_core::{compile_patterns, GuardConfig, WeightTable};

use crate::ui::output_format;

pub fn run_rules(config: &GuardConfig) -> Result<()> {
    let weights = WeightTable::from_config(config);
    let active = compile_patterns(&config.patterns)?.len();
    let stdout = io::stdout();
    let mut writer = stdout.lock();
    output_format::print_rules_table(&mut writer, &config.patterns, &weights, active)?;
    Ok(())
}

// piiguard/src/lib.rs
//! # PiiGuard CLI
//!
//! Command-line host for `piiguard-core`: loads configuration once, builds a
//! single shared pipeline and runs `scan`, `redact`, `batch` and `rules`
//! requests against it.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
pub mod utils;

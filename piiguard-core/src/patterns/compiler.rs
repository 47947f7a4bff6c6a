//! compiler.rs - Compiles pattern rules into ready-to-run regular expressions.
//!
//! Compilation happens once, when a `PatternMatcher` is built. The result is
//! owned by the matcher and shared through the pipeline, so there is no
//! process-wide cache.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, warn};
use regex::{Regex, RegexBuilder};

use crate::config::{PatternRule, MAX_PATTERN_LENGTH};
use crate::errors::PiiGuardError;
use crate::pii_match::PiiKind;

/// Size limit for a single compiled regex.
const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// A single compiled pattern rule.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// The compiled regular expression used for matching.
    pub regex: Regex,
    /// The unique name of the rule (`aadhaar`, `pan`, ...).
    pub name: String,
    /// The PII kind reported for every hit of this rule.
    pub kind: PiiKind,
    /// Whether hits must also pass the checksum/structure validator for `kind`.
    pub programmatic_validation: bool,
}

/// All compiled rules, in registry order.
#[derive(Debug, Clone, Default)]
pub struct CompiledPatterns {
    pub patterns: Vec<CompiledPattern>,
}

impl CompiledPatterns {
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledPattern> {
        self.patterns.iter()
    }
}

fn compile_one(rule: &PatternRule, pattern: &str) -> Result<CompiledPattern, PiiGuardError> {
    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(PiiGuardError::PatternLengthExceeded(
            rule.name.clone(),
            pattern.len(),
            MAX_PATTERN_LENGTH,
        ));
    }

    let regex = RegexBuilder::new(pattern)
        .multi_line(rule.multiline)
        .case_insensitive(rule.case_insensitive)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map_err(|source| PiiGuardError::InvalidPattern {
            name: rule.name.clone(),
            source,
        })?;

    Ok(CompiledPattern {
        regex,
        name: rule.name.clone(),
        kind: rule.resolved_kind(),
        programmatic_validation: rule.programmatic_validation,
    })
}

/// Compiles the enabled rules, preserving their order.
///
/// Rules without a pattern are skipped with a warning. If any rule fails to
/// compile the whole set is rejected: a single failure is returned as-is,
/// several are folded into one `Fatal` report.
pub fn compile_patterns(rules: &[PatternRule]) -> Result<CompiledPatterns, PiiGuardError> {
    debug!("Starting compilation of {} pattern rules.", rules.len());

    let mut compiled = Vec::with_capacity(rules.len());
    let mut errors = Vec::new();

    for rule in rules.iter().filter(|r| r.is_enabled()) {
        let Some(pattern) = rule.pattern.as_deref() else {
            warn!("Skipping rule '{}' because its pattern is missing.", rule.name);
            continue;
        };

        match compile_one(rule, pattern) {
            Ok(p) => {
                debug!("Rule '{}' compiled successfully.", rule.name);
                compiled.push(p);
            }
            Err(e) => errors.push(e),
        }
    }

    match errors.len() {
        0 => {
            debug!("Finished compiling rules. Total compiled: {}.", compiled.len());
            Ok(CompiledPatterns { patterns: compiled })
        }
        1 => Err(errors.remove(0)),
        n => {
            let message = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<String>>()
                .join("\n");
            Err(PiiGuardError::Fatal(format!("Failed to compile {} rule(s):\n{}", n, message)))
        }
    }
}

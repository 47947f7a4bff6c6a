//! Configuration management for `piiguard-core`.
//!
//! This module defines the pattern registry, the risk-weight table, the risk
//! thresholds and the entity/image settings. It handles YAML
//! (de)serialization and provides utilities for loading, merging, discovering
//! and validating configurations. Everything here is validated once at
//! startup; an invalid pattern is a fatal configuration error.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use log::{debug, info, warn};
use regex::RegexBuilder;

use crate::pii_match::PiiKind;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Environment variable naming a configuration file to load.
pub const CONFIG_ENV_VAR: &str = "PIIGUARD_CONFIG";

pub const DEFAULT_HIGH_THRESHOLD: u32 = 15;
pub const DEFAULT_MEDIUM_THRESHOLD: u32 = 8;
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.5;
/// Gaussian sigma equivalent to a 25x25 kernel.
pub const DEFAULT_BLUR_SIGMA: f32 = 4.1;

/// A single named pattern in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PatternRule {
    /// Unique identifier for the pattern (e.g., "aadhaar").
    pub name: String,
    /// PII kind emitted for matches. Derived from `name` when omitted.
    pub kind: Option<PiiKind>,
    /// Human-readable description of what the pattern targets.
    pub description: Option<String>,
    /// The regex pattern string.
    pub pattern: Option<String>,
    /// Explicit override for enabling/disabling the pattern.
    pub enabled: Option<bool>,
    /// If true, enables multiline mode for the regex engine.
    pub multiline: bool,
    /// If true, matching ignores case.
    pub case_insensitive: bool,
    /// If true, matches must also pass a checksum/structure validator.
    pub programmatic_validation: bool,
    /// Metadata tags for categorization.
    pub tags: Option<Vec<String>>,
}

impl PatternRule {
    pub fn resolved_kind(&self) -> PiiKind {
        self.kind.clone().unwrap_or_else(|| PiiKind::from(self.name.as_str()))
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

/// How the aggregator treats overlapping matches from different detectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Concatenate detector outputs unchanged; overlaps are counted and masked twice.
    #[default]
    Preserve,
    /// Drop matches that overlap a kept match of higher weight.
    PreferHigherWeight,
}

/// Score boundaries for the risk levels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThresholdConfig {
    pub high: Option<u32>,
    pub medium: Option<u32>,
}

/// Resolved thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskThresholds {
    pub high: u32,
    pub medium: u32,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high: DEFAULT_HIGH_THRESHOLD,
            medium: DEFAULT_MEDIUM_THRESHOLD,
        }
    }
}

/// Extra gazetteer terms for the built-in recognizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GazetteerTerms {
    pub person: Vec<String>,
    pub location: Vec<String>,
    pub organization: Vec<String>,
}

impl GazetteerTerms {
    pub fn is_empty(&self) -> bool {
        self.person.is_empty() && self.location.is_empty() && self.organization.is_empty()
    }
}

/// Settings for the entity recognizer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EntityConfig {
    pub enabled: Option<bool>,
    /// Spans scored under this confidence are dropped (default: 0.5).
    pub min_confidence: Option<f64>,
    pub gazetteer: GazetteerTerms,
}

/// Settings for the image redactor.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Gaussian blur sigma applied to marked regions (default: 4.1).
    pub blur_sigma: Option<f32>,
}

/// Represents the top-level configuration structure for PiiGuard.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Ordered pattern registry.
    pub patterns: Vec<PatternRule>,
    /// Risk weight per PII kind. Kinds not listed weigh 1.
    pub weights: BTreeMap<PiiKind, u32>,
    pub thresholds: ThresholdConfig,
    pub overlap_policy: Option<OverlapPolicy>,
    pub entities: EntityConfig,
    pub image: ImageConfig,
}

impl GuardConfig {
    /// Loads a configuration from a YAML file and validates it on its own.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::read_file(path.as_ref())?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Reads and parses a YAML file without validating it.
    fn read_file(path: &Path) -> Result<Self> {
        info!("Loading configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("Loaded {} patterns from file {}.", config.patterns.len(), path.display());
        Ok(config)
    }

    /// Parses a YAML document without validating it.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: GuardConfig = serde_yml::from_str(text)?;
        Ok(config)
    }

    /// Loads the built-in configuration embedded in the library.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default configuration from embedded string...");
        let default_yaml = include_str!("../config/default_config.yaml");
        let config = Self::from_yaml_str(default_yaml)
            .context("Failed to parse default configuration")?;

        debug!("Loaded {} default patterns.", config.patterns.len());
        Ok(config)
    }

    /// Loads defaults and merges the first configuration file found by
    /// [`config_candidate_paths`], or `explicit` when given.
    ///
    /// Only the merged result is validated, so a user file may adjust a
    /// built-in pattern by name without restating its regex.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        let defaults = Self::load_default()?;

        let user_path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => config_candidate_paths().into_iter().find(|p| p.is_file()),
        };

        match user_path {
            Some(path) => {
                let user = Self::read_file(&path)?;
                let merged = merge_config(defaults, Some(user));
                validate_config(&merged)
                    .with_context(|| format!("Invalid configuration in {}", path.display()))?;
                Ok(merged)
            }
            None => {
                debug!("No user configuration found, using defaults.");
                validate_config(&defaults)?;
                Ok(defaults)
            }
        }
    }

    /// Filters active patterns based on enable/disable lists provided via CLI.
    /// A non-empty `enable` list keeps only the named patterns.
    pub fn set_active_patterns(&mut self, enable: &[String], disable: &[String]) {
        let enable_set: HashSet<&str> = enable.iter().map(String::as_str).collect();
        let disable_set: HashSet<&str> = disable.iter().map(String::as_str).collect();
        let all_names: HashSet<&str> = self.patterns.iter().map(|r| r.name.as_str()).collect();

        for name in enable_set.difference(&all_names) {
            warn!("Pattern '{}' in `enable` list does not exist.", name);
        }
        for name in disable_set.difference(&all_names) {
            warn!("Pattern '{}' in `disable` list does not exist.", name);
        }

        self.patterns.retain(|rule| {
            let name = rule.name.as_str();
            !disable_set.contains(name) && (enable_set.is_empty() || enable_set.contains(name))
        });

        debug!("Active patterns after filtering: {}", self.patterns.len());
    }

    pub fn risk_thresholds(&self) -> RiskThresholds {
        RiskThresholds {
            high: self.thresholds.high.unwrap_or(DEFAULT_HIGH_THRESHOLD),
            medium: self.thresholds.medium.unwrap_or(DEFAULT_MEDIUM_THRESHOLD),
        }
    }

    pub fn overlap_policy(&self) -> OverlapPolicy {
        self.overlap_policy.unwrap_or_default()
    }

    pub fn entities_enabled(&self) -> bool {
        self.entities.enabled.unwrap_or(true)
    }

    pub fn min_confidence(&self) -> f64 {
        self.entities.min_confidence.unwrap_or(DEFAULT_MIN_CONFIDENCE)
    }

    pub fn blur_sigma(&self) -> f32 {
        self.image.blur_sigma.unwrap_or(DEFAULT_BLUR_SIGMA)
    }
}

/// Locations searched for a user configuration file, in order.
pub fn config_candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(p) = std::env::var(CONFIG_ENV_VAR) {
        if !p.trim().is_empty() {
            paths.push(PathBuf::from(p));
        }
    }
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("piiguard").join("config.yaml"));
    }
    paths
}

/// Merges a user configuration over defaults.
///
/// Patterns with an existing name replace the default in place, new patterns
/// are appended. A same-named user pattern without a `pattern` field only
/// adjusts the default: its `enabled`, `kind`, `description` and `tags`
/// apply when set, and the regex and flags are kept. Weights and thresholds override key by key; scalar settings
/// override when the user sets them. Gazetteer terms accumulate.
pub fn merge_config(default_config: GuardConfig, user_config: Option<GuardConfig>) -> GuardConfig {
    debug!("merge_config called. Default patterns: {}", default_config.patterns.len());

    let mut merged = default_config;
    let Some(user) = user_config else {
        return merged;
    };

    debug!("User config provided. Merging {} user patterns.", user.patterns.len());
    for user_rule in user.patterns {
        match merged.patterns.iter_mut().find(|r| r.name == user_rule.name) {
            Some(existing) if user_rule.pattern.is_none() => {
                debug!("Adjusting built-in pattern '{}'.", existing.name);
                if user_rule.enabled.is_some() {
                    existing.enabled = user_rule.enabled;
                }
                if user_rule.kind.is_some() {
                    existing.kind = user_rule.kind;
                }
                if user_rule.description.is_some() {
                    existing.description = user_rule.description;
                }
                if user_rule.tags.is_some() {
                    existing.tags = user_rule.tags;
                }
            }
            Some(existing) => *existing = user_rule,
            None => merged.patterns.push(user_rule),
        }
    }

    for (kind, weight) in user.weights {
        debug!("Overriding weight for '{}' with {}", kind, weight);
        merged.weights.insert(kind, weight);
    }

    if let Some(high) = user.thresholds.high {
        merged.thresholds.high = Some(high);
    }
    if let Some(medium) = user.thresholds.medium {
        merged.thresholds.medium = Some(medium);
    }
    if user.overlap_policy.is_some() {
        merged.overlap_policy = user.overlap_policy;
    }
    if user.entities.enabled.is_some() {
        merged.entities.enabled = user.entities.enabled;
    }
    if user.entities.min_confidence.is_some() {
        merged.entities.min_confidence = user.entities.min_confidence;
    }
    merged.entities.gazetteer.person.extend(user.entities.gazetteer.person);
    merged.entities.gazetteer.location.extend(user.entities.gazetteer.location);
    merged.entities.gazetteer.organization.extend(user.entities.gazetteer.organization);
    if user.image.blur_sigma.is_some() {
        merged.image.blur_sigma = user.image.blur_sigma;
    }

    debug!("Final total patterns after merge: {}", merged.patterns.len());
    merged
}

/// Validates pattern integrity, thresholds and numeric settings.
pub fn validate_config(config: &GuardConfig) -> Result<()> {
    let mut names = HashSet::new();
    let mut errors = Vec::new();

    for rule in &config.patterns {
        if rule.name.is_empty() {
            errors.push("A pattern has an empty `name` field.".to_string());
        } else if !names.insert(rule.name.clone()) {
            errors.push(format!("Duplicate pattern name found: '{}'.", rule.name));
        }

        let pattern = match &rule.pattern {
            Some(p) => p,
            None => {
                errors.push(format!("Pattern '{}' is missing the `pattern` field.", rule.name));
                continue;
            }
        };

        if pattern.is_empty() {
            errors.push(format!("Pattern '{}' has an empty `pattern` field.", rule.name));
            continue;
        }

        if pattern.len() > MAX_PATTERN_LENGTH {
            errors.push(format!(
                "Pattern '{}': length ({}) exceeds maximum allowed ({}).",
                rule.name,
                pattern.len(),
                MAX_PATTERN_LENGTH
            ));
            continue;
        }

        if let Err(e) = RegexBuilder::new(pattern).multi_line(rule.multiline).build() {
            errors.push(format!("Pattern '{}' has an invalid regex: {}", rule.name, e));
        }
    }

    let thresholds = config.risk_thresholds();
    if thresholds.medium > thresholds.high {
        errors.push(format!(
            "Threshold `medium` ({}) must not exceed `high` ({}).",
            thresholds.medium, thresholds.high
        ));
    }

    let min_confidence = config.min_confidence();
    if !(0.0..=1.0).contains(&min_confidence) {
        errors.push(format!("`entities.min_confidence` ({}) must be within 0.0..=1.0.", min_confidence));
    }

    let sigma = config.blur_sigma();
    if !(sigma.is_finite() && sigma > 0.0) {
        errors.push(format!("`image.blur_sigma` ({}) must be a positive number.", sigma));
    }

    if !errors.is_empty() {
        let full_error_message = format!("Configuration validation failed:\n{}", errors.join("\n"));
        Err(anyhow!(full_error_message))
    } else {
        Ok(())
    }
}

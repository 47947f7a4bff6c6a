// piiguard-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use piiguard_core::config::{self, GuardConfig, OverlapPolicy, PatternRule};
use piiguard_core::PiiKind;

fn write_yaml(content: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    Ok(file)
}

#[test]
fn test_load_default_config() {
    let config = GuardConfig::load_default().unwrap();
    assert_eq!(config.patterns.len(), 5);
    let email = config.patterns.iter().find(|r| r.name == "email").unwrap();
    assert_eq!(email.resolved_kind(), PiiKind::Email);
    assert!(!email.programmatic_validation);
    assert_eq!(config.overlap_policy(), OverlapPolicy::Preserve);
    assert!(config.entities_enabled());
}

#[test]
fn test_load_from_file() -> Result<()> {
    let file = write_yaml(
        r#"
patterns:
  - name: passport
    kind: passport
    pattern: '[A-Z][0-9]{7}'
    description: "Indian passport number"
    programmatic_validation: false
weights:
  passport: 9
thresholds:
  high: 20
overlap_policy: prefer_higher_weight
"#,
    )?;
    let config = GuardConfig::load_from_file(file.path())?;
    assert_eq!(config.patterns.len(), 1);
    assert_eq!(config.patterns[0].resolved_kind(), PiiKind::Other("passport".to_string()));
    assert_eq!(config.weights.get(&PiiKind::from("passport")), Some(&9));
    assert_eq!(config.risk_thresholds().high, 20);
    assert_eq!(config.risk_thresholds().medium, config::DEFAULT_MEDIUM_THRESHOLD);
    assert_eq!(config.overlap_policy(), OverlapPolicy::PreferHigherWeight);
    Ok(())
}

#[test]
fn test_load_from_file_rejects_invalid_regex() -> Result<()> {
    let file = write_yaml(
        r#"
patterns:
  - name: broken
    pattern: '([A-Z'
"#,
    )?;
    let err = GuardConfig::load_from_file(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("broken"));
    Ok(())
}

#[test]
fn test_load_from_file_rejects_unknown_threshold() -> Result<()> {
    let file = write_yaml("thresholds:\n  critical: 30\n")?;
    assert!(GuardConfig::load_from_file(file.path()).is_err());
    Ok(())
}

#[test]
fn test_merge_replaces_in_place_and_appends() -> Result<()> {
    let defaults = GuardConfig::load_default()?;
    let user = GuardConfig {
        patterns: vec![
            PatternRule {
                name: "phone".to_string(),
                kind: Some(PiiKind::Phone),
                pattern: Some(r"\d{10}".to_string()),
                ..Default::default()
            },
            PatternRule {
                name: "voter_id".to_string(),
                pattern: Some("[A-Z]{3}[0-9]{7}".to_string()),
                ..Default::default()
            },
        ],
        weights: [(PiiKind::Email, 9)].into_iter().collect(),
        ..Default::default()
    };

    let merged = config::merge_config(defaults, Some(user));
    let names: Vec<&str> = merged.patterns.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["aadhaar", "pan", "phone", "email", "gst", "voter_id"]);
    assert_eq!(merged.patterns[2].pattern.as_deref(), Some(r"\d{10}"));
    assert_eq!(merged.weights.get(&PiiKind::Email), Some(&9));
    assert_eq!(merged.weights.get(&PiiKind::NationalId), Some(&10));
    assert_eq!(merged.risk_thresholds().high, 15);
    config::validate_config(&merged)?;
    Ok(())
}

#[test]
fn test_discover_with_explicit_path() -> Result<()> {
    let file = write_yaml(
        r#"
entities:
  enabled: false
  gazetteer:
    organization: ["Acme Fintech"]
image:
  blur_sigma: 6.0
"#,
    )?;
    let config = GuardConfig::discover(Some(file.path()))?;
    assert_eq!(config.patterns.len(), 5);
    assert!(!config.entities_enabled());
    assert_eq!(config.entities.gazetteer.organization, vec!["Acme Fintech".to_string()]);
    assert_eq!(config.blur_sigma(), 6.0);
    Ok(())
}

#[test]
fn test_discover_allows_disabling_builtin_by_name() -> Result<()> {
    let file = write_yaml(
        r#"
patterns:
  - name: phone
    enabled: false
  - name: email
    description: "Work email"
"#,
    )?;
    let config = GuardConfig::discover(Some(file.path()))?;
    assert_eq!(config.patterns.len(), 5);

    let phone = config.patterns.iter().find(|r| r.name == "phone").unwrap();
    assert!(!phone.is_enabled());
    assert!(phone.pattern.is_some());

    let email = config.patterns.iter().find(|r| r.name == "email").unwrap();
    assert!(email.is_enabled());
    assert_eq!(email.description.as_deref(), Some("Work email"));
    assert!(email.pattern.as_deref().unwrap_or("").contains('@'));

    // On its own the file is incomplete.
    assert!(GuardConfig::load_from_file(file.path()).is_err());
    Ok(())
}

#[test]
fn test_discover_rejects_new_rule_without_pattern() -> Result<()> {
    let file = write_yaml("patterns:\n  - name: voter_id\n    enabled: true\n")?;
    let err = GuardConfig::discover(Some(file.path())).unwrap_err();
    assert!(format!("{:#}", err).contains("voter_id"));
    Ok(())
}

#[test]
fn test_validate_collects_all_errors() {
    let config = GuardConfig {
        patterns: vec![
            PatternRule { name: "".to_string(), pattern: Some("a".to_string()), ..Default::default() },
            PatternRule { name: "dup".to_string(), pattern: Some("a".to_string()), ..Default::default() },
            PatternRule { name: "dup".to_string(), pattern: Some("b".to_string()), ..Default::default() },
            PatternRule { name: "nopattern".to_string(), ..Default::default() },
        ],
        ..Default::default()
    };
    let message = config::validate_config(&config).unwrap_err().to_string();
    assert!(message.contains("empty `name`"));
    assert!(message.contains("Duplicate pattern name found: 'dup'"));
    assert!(message.contains("'nopattern' is missing"));
}

// piiguard/tests/cli_integration_tests.rs
//! Command-line integration tests for the `piiguard` binary.
//!
//! Each test runs the compiled binary with `assert_cmd`, feeding stdin or
//! temporary files from `tempfile`, and asserts on stdout, stderr and the exit
//! status. Entity recognition is disabled where exact match lists matter.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::{Cursor, Write};
use tempfile::{NamedTempFile, TempDir};

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

fn piiguard() -> Command {
    let mut cmd = Command::cargo_bin("piiguard").unwrap();
    cmd.env_remove("PIIGUARD_CONFIG");
    cmd.env("RUST_LOG", "debug");
    cmd
}

fn run_piiguard_command(input: &str, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = piiguard();
    cmd.args(args);
    cmd.write_stdin(input.as_bytes());
    cmd.assert()
}

fn write_temp(content: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    Ok(file)
}

#[test]
fn test_scan_json_report() -> Result<()> {
    let assert = run_piiguard_command("Contact me at a@b.com", &["--no-entities", "scan"]).success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let report: serde_json::Value = serde_json::from_str(&stdout)?;

    assert_eq!(report["source"], "stdin");
    assert_eq!(report["extracted_text"], "Contact me at a@b.com");
    assert_eq!(report["redacted_text"], "Contact me at *******");
    assert_eq!(
        report["detected_pii"],
        serde_json::json!([{"type": "email", "value": "a@b.com", "start": 14, "end": 21}])
    );
    assert_eq!(
        report["risk_assessment"],
        serde_json::json!({"level": "Low", "score": 4, "count": 1})
    );
    Ok(())
}

#[test]
fn test_scan_table_report() {
    run_piiguard_command(
        "Aadhaar 2345 6789 0123, mail a@b.com",
        &["--no-entities", "scan", "--format", "table"],
    )
    .success()
    .stdout(predicate::str::contains("national_id"))
    .stdout(predicate::str::contains("Risk: Medium (score 14, 2 item(s))"));
}

#[test]
fn test_debug_logs_do_not_leak_values() {
    run_piiguard_command("mail someone@example.org", &["--no-entities", "--debug", "scan"])
        .success()
        .stderr(predicate::str::contains("Detected email"))
        .stderr(predicate::str::contains("someone@example.org").not());
}

#[test]
fn test_redact_stdin_to_stdout() {
    run_piiguard_command("Contact me at a@b.com", &["--no-entities", "redact"])
        .success()
        .stdout(predicate::eq("Contact me at *******"));
}

#[test]
fn test_redact_file_to_file() -> Result<()> {
    let input = write_temp("PAN ABCPE1234F\nphone 9876543210\n")?;
    let dir = TempDir::new()?;
    let out_path = dir.path().join("out.txt");

    piiguard()
        .args(["--no-entities", "--quiet", "redact", "-i"])
        .arg(input.path())
        .arg("-o")
        .arg(&out_path)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&out_path)?, "PAN **********\nphone **********\n");
    Ok(())
}

#[test]
fn test_enable_filter_limits_patterns() {
    run_piiguard_command("a@b.com 9876543210", &["--no-entities", "--enable", "phone", "redact"])
        .success()
        .stdout(predicate::eq("a@b.com **********"));
}

#[test]
fn test_redact_image_with_boxes() -> Result<()> {
    let dir = TempDir::new()?;
    let image_path = dir.path().join("scan.png");
    let boxes_path = dir.path().join("boxes.json");
    let out_path = dir.path().join("scan.redacted.png");

    let img = RgbImage::from_fn(48, 16, |x, _| if x % 2 == 0 { Rgb([255, 255, 255]) } else { Rgb([0, 0, 0]) });
    let mut png = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img).write_to(&mut png, ImageFormat::Png)?;
    fs::write(&image_path, png.get_ref())?;
    fs::write(
        &boxes_path,
        r#"[{"text": "Contact", "x": 0, "y": 0, "width": 24, "height": 16, "confidence": 95.0},
            {"text": "a@b.com", "x": 24, "y": 0, "width": 24, "height": 16, "confidence": 91.0}]"#,
    )?;

    let mut cmd = piiguard();
    cmd.args(["--no-entities", "redact", "--image"])
        .arg(&image_path)
        .arg("--boxes")
        .arg(&boxes_path)
        .arg("--image-out")
        .arg(&out_path)
        .write_stdin("Contact a@b.com");
    cmd.assert().success().stdout(predicate::eq("Contact *******"));

    let bytes = fs::read(&out_path)?;
    assert_eq!(image::guess_format(&bytes)?, ImageFormat::Png);
    let out = image::load_from_memory(&bytes)?.to_rgb8();
    assert_eq!(out.dimensions(), (48, 16));
    assert_eq!(out.get_pixel(2, 8).0, [255, 255, 255]);
    let blurred = out.get_pixel(36, 8).0[0];
    assert!(blurred > 40 && blurred < 215);
    Ok(())
}

#[test]
fn test_redact_image_requires_output_path() -> Result<()> {
    let image = write_temp("irrelevant")?;
    piiguard()
        .args(["redact", "--image"])
        .arg(image.path())
        .write_stdin("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--image-out"));
    Ok(())
}

#[test]
fn test_redact_image_decode_failure() -> Result<()> {
    let dir = TempDir::new()?;
    let image_path = dir.path().join("broken.png");
    let boxes_path = dir.path().join("boxes.json");
    fs::write(&image_path, b"not an image")?;
    fs::write(&boxes_path, r#"[{"text":"a@b.com","x":0,"y":0,"width":4,"height":4,"confidence":90}]"#)?;

    piiguard()
        .args(["--no-entities", "redact", "--image"])
        .arg(&image_path)
        .arg("--boxes")
        .arg(&boxes_path)
        .arg("--image-out")
        .arg(dir.path().join("out.png"))
        .write_stdin("a@b.com")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to decode image"));
    assert!(!dir.path().join("out.png").exists());
    Ok(())
}

#[test]
fn test_batch_reports_in_argument_order() -> Result<()> {
    let first = write_temp("mail a@b.com")?;
    let second = write_temp("nothing here")?;

    let assert = piiguard()
        .args(["--no-entities", "batch"])
        .arg(first.path())
        .arg(second.path())
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["source"], first.path().display().to_string());
    assert_eq!(lines[0]["risk_assessment"]["count"], 1);
    assert_eq!(lines[1]["risk_assessment"]["count"], 0);
    assert_eq!(lines[1]["risk_assessment"]["level"], "Low");
    Ok(())
}

#[test]
fn test_batch_missing_file_fails() -> Result<()> {
    let good = write_temp("mail a@b.com")?;
    piiguard()
        .args(["--no-entities", "batch"])
        .arg(good.path())
        .arg("/definitely/not/here.txt")
        .assert()
        .failure()
        .stdout(predicate::str::contains("a@b.com"))
        .stderr(predicate::str::contains("1 of 2 file(s) failed"));
    Ok(())
}

#[test]
fn test_rules_table() {
    piiguard()
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("aadhaar"))
        .stdout(predicate::str::contains("national_id"))
        .stdout(predicate::str::contains("5 of 5 pattern(s) active."));
}

#[test]
fn test_custom_config_adds_pattern() -> Result<()> {
    let config = write_temp(
        r#"
patterns:
  - name: voter_id
    kind: voter_id
    pattern: '[A-Z]{3}[0-9]{7}'
weights:
  voter_id: 9
"#,
    )?;

    let assert = piiguard()
        .args(["--no-entities", "--config"])
        .arg(config.path())
        .arg("scan")
        .write_stdin("EPIC ABC1234567")
        .assert()
        .success();
    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(report["detected_pii"][0]["type"], "voter_id");
    assert_eq!(report["risk_assessment"]["score"], 9);
    Ok(())
}

#[test]
fn test_config_can_disable_builtin_pattern() -> Result<()> {
    let config = write_temp("patterns:\n  - name: phone\n    enabled: false\n")?;
    piiguard()
        .args(["--no-entities", "--config"])
        .arg(config.path())
        .arg("redact")
        .write_stdin("call 9876543210 or a@b.com")
        .assert()
        .success()
        .stdout(predicate::eq("call 9876543210 or *******"));
    Ok(())
}

#[test]
fn test_invalid_config_is_fatal() -> Result<()> {
    let config = write_temp("patterns:\n  - name: broken\n    pattern: '([A-Z'\n")?;
    piiguard()
        .arg("--config")
        .arg(config.path())
        .arg("scan")
        .write_stdin("anything")
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken"));
    Ok(())
}

#[test]
fn test_entities_detected_by_default() -> Result<()> {
    let assert = run_piiguard_command("Mr. Rahul Sharma lives in Mumbai.", &["scan"]).success();
    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    let kinds: Vec<&str> = report["detected_pii"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|m| m["type"].as_str())
        .collect();
    assert!(kinds.contains(&"name"));
    assert!(kinds.contains(&"location"));
    assert_eq!(report["redacted_text"], "Mr. ************ lives in ******.");
    Ok(())
}

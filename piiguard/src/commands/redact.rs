// piiguard/src/commands/redact.rs
//! `piiguard redact`: write the masked transcript and, optionally, the
//! blurred image.

use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::io::{self, Write};

use piiguard_core::{load_word_boxes, Pipeline, WordBox};

use crate::cli::RedactCommand;
use crate::commands::{info_msg, warn_msg};
use crate::utils::input::read_input;

pub fn run_redact(pipeline: &Pipeline, cmd: &RedactCommand, quiet: bool) -> Result<()> {
    let text = read_input(cmd.input_file.as_deref())?;

    let redacted_text = match (&cmd.image, &cmd.image_out) {
        (Some(image_path), Some(image_out)) => {
            let image_bytes = fs::read(image_path)
                .with_context(|| format!("Failed to read image {}", image_path.display()))?;
            let boxes: Vec<WordBox> = match &cmd.boxes {
                Some(path) => load_word_boxes(path)?,
                None => {
                    if !quiet {
                        warn_msg("No --boxes given; the image is copied unchanged.");
                    }
                    Vec::new()
                }
            };

            let analysis = pipeline
                .analyze_image(&image_bytes, &text, &boxes)
                .with_context(|| format!("Failed to redact image {}", image_path.display()))?;

            fs::write(image_out, &analysis.redacted_image)
                .with_context(|| format!("Failed to write image {}", image_out.display()))?;
            info!("Wrote redacted image to {}", image_out.display());
            if !quiet {
                info_msg(format!("Redacted image written to {}", image_out.display()));
            }
            analysis.text.redacted_text
        }
        _ => pipeline.analyze_text(&text).redacted_text,
    };

    match &cmd.output {
        Some(path) => {
            fs::write(path, &redacted_text)
                .with_context(|| format!("Failed to write output file {}", path.display()))?;
            if !quiet {
                info_msg(format!("Redacted text written to {}", path.display()));
            }
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write!(writer, "{}", redacted_text)?;
            writer.flush()?;
        }
    }
    Ok(())
}

//! Ease command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::config::BackabitConfig;
use crate::document::Document;
use crate::sequence::{ease_each, EaseParams};

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the ease command
pub fn run_ease(
    input: &Path,
    dx: f64,
    dy: f64,
    angle: f64,
    config: &BackabitConfig,
    all: bool,
    output: Option<&Path>,
) -> ExitCode {
    if ![dx, dy, angle].iter().all(|v| v.is_finite()) {
        eprintln!("Error: --dx, --dy and --angle must be finite numbers");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let mut doc = match Document::load(input) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error: {}: {}", input.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let items = if all { doc.all_items() } else { doc.selection() };
    if items.is_empty() {
        eprintln!("Error: nothing to transform (no items selected; use --all for every item)");
        return ExitCode::from(EXIT_ERROR);
    }

    let params = EaseParams {
        delta_x: dx,
        delta_y: dy,
        angle,
        ease: config.ease.ease,
        anchor: config.ease.anchor,
    };

    let steps = match ease_each(&mut doc, &items, &params) {
        Ok(steps) => steps,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    for step in &steps {
        println!(
            "{}/{}  {:.4}  dx={:.3} dy={:.3} angle={:.3}",
            step.index + 1,
            step.total,
            step.progress,
            dx * step.progress,
            dy * step.progress,
            angle * step.progress
        );
    }

    let target = output.unwrap_or(input);
    if let Err(e) = doc.save(target) {
        eprintln!("Error: {}: {}", target.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    ExitCode::from(EXIT_SUCCESS)
}

//! Info command implementations (artboards, eases)

use std::path::Path;
use std::process::ExitCode;

use serde::Serialize;

use crate::document::Document;
use crate::easing::Ease;
use crate::geometry::Bounds;

use super::{EXIT_ERROR, EXIT_SUCCESS};

#[derive(Serialize)]
struct ArtboardEntry<'a> {
    number: usize,
    name: &'a str,
    bounds: Bounds,
}

/// Execute the artboards command
pub fn run_artboards(input: &Path, json: bool) -> ExitCode {
    let doc = match Document::load(input) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error: {}: {}", input.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let entries: Vec<ArtboardEntry<'_>> = doc
        .artboards
        .iter()
        .enumerate()
        .map(|(i, a)| ArtboardEntry { number: i + 1, name: &a.name, bounds: a.bounds })
        .collect();

    if json {
        match serde_json::to_string_pretty(&entries) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
        return ExitCode::from(EXIT_SUCCESS);
    }

    for entry in &entries {
        println!(
            "{:>3}  {}  ({} x {})",
            entry.number,
            entry.name,
            entry.bounds.width(),
            entry.bounds.height()
        );
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the eases command
pub fn run_eases() -> ExitCode {
    for ease in Ease::ALL {
        println!("{:<16} {:.4}", ease.name(), ease.apply(0.5));
    }
    ExitCode::from(EXIT_SUCCESS)
}

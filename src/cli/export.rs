//! Export command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::config::BackabitConfig;
use crate::document::Document;
use crate::export::{export_artboards, ExportSettings};

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Execute the export command
pub fn run_export(input: &Path, config: &BackabitConfig) -> ExitCode {
    let mut doc = match Document::load(input) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error: {}: {}", input.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let settings = config.export.apply(ExportSettings::for_document(&doc, input));

    match export_artboards(&mut doc, &settings) {
        Ok(written) => {
            for path in &written {
                println!("{}", path.display());
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

//! Multi-scale artboard export
//!
//! Exports every selected artboard once per target scale. Artwork is assumed
//! to be designed at `source_scale` (2 for "@2x" artwork), so exporting at
//! scale 3 renders at 150% and names the file `...@3x.png`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::document::Document;
use crate::host::{ExportHost, HostError, PngExportOptions};
use crate::range::expand_range;

/// Scale the artwork is designed at unless configured otherwise.
pub const DEFAULT_SOURCE_SCALE: f64 = 2.0;

/// Target scales exported unless configured otherwise.
pub const DEFAULT_SCALES: &str = "2,3";

/// Resolutions offered by the fixed `@1x`..`@8x` preset.
pub const PRESET_RESOLUTIONS: [u32; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

/// Everything one export run needs. Built fresh for each run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Scale the artwork was designed at
    pub source_scale: f64,
    /// Range expression of target scales (`"2,3"`)
    pub scales: String,
    /// Range expression of 1-based artboard numbers (`"1-4"`)
    pub artboards: String,
    /// Prepended to every file name
    pub prefix: String,
    /// Destination directory
    pub folder: PathBuf,
}

impl ExportSettings {
    /// Defaults for a document loaded from `doc_path`.
    ///
    /// The prefix replaces a trailing `.ai` in the document name with `_`
    /// (`hero.ai` gives `hero_`); other names are used as they are. Files
    /// land next to the document.
    pub fn for_document(doc: &Document, doc_path: &Path) -> Self {
        let prefix = match doc.name.strip_suffix(".ai") {
            Some(stem) => format!("{}_", stem),
            None => doc.name.clone(),
        };

        Self {
            source_scale: DEFAULT_SOURCE_SCALE,
            scales: DEFAULT_SCALES.to_string(),
            artboards: doc.default_artboard_range(),
            prefix,
            folder: doc_path.parent().map(Path::to_path_buf).unwrap_or_default(),
        }
    }

    /// Replace the scales with a selection from [`PRESET_RESOLUTIONS`].
    ///
    /// Resolutions outside the preset are ignored; order follows the preset.
    pub fn with_preset_resolutions(mut self, selected: &[i64]) -> Self {
        let chosen: Vec<String> = PRESET_RESOLUTIONS
            .iter()
            .filter(|r| selected.contains(&i64::from(**r)))
            .map(|r| r.to_string())
            .collect();
        self.scales = chosen.join(",");
        self
    }

    /// Export options for a target `scale`.
    pub fn options_for(&self, scale: i64) -> PngExportOptions {
        PngExportOptions::at_scale(scale as f64 / self.source_scale * 100.0)
    }
}

/// Output file for one artboard at one scale.
///
/// `@{scale}x` is appended whenever `scale > 1`, whatever the source scale.
pub fn output_path(folder: &Path, prefix: &str, artboard: &str, scale: i64) -> PathBuf {
    let suffix = if scale > 1 { format!("@{}x", scale) } else { String::new() };
    folder.join(format!("{}{}{}.png", prefix, artboard, suffix))
}

/// Export the configured artboards at every configured scale.
///
/// Artboards form the outer loop and scales the inner one. The first failure
/// aborts the run; files already written stay on disk. Returns the written
/// paths in export order.
pub fn export_artboards<H: ExportHost>(
    host: &mut H,
    settings: &ExportSettings,
) -> Result<Vec<PathBuf>, HostError> {
    let scales = expand_range(&settings.scales);
    let numbers = expand_range(&settings.artboards);
    let names = host.artboards();
    let mut written = Vec::with_capacity(scales.len() * numbers.len());

    debug!(?numbers, ?scales, source_scale = settings.source_scale, "starting export");

    for number in numbers {
        let (index, name) = number
            .checked_sub(1)
            .and_then(|i| usize::try_from(i).ok())
            .and_then(|i| names.get(i).map(|name| (i, name)))
            .ok_or(HostError::ArtboardNotFound { number, count: names.len() })?;

        for &scale in &scales {
            let path = output_path(&settings.folder, &settings.prefix, name, scale);
            host.export_png(index, &path, &settings.options_for(scale))?;
            written.push(path);
        }
    }

    info!(files = written.len(), "export finished");
    Ok(written)
}

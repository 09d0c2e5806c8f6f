//! Host capability traits
//!
//! The sequencer and exporter never touch a document directly. They drive a
//! host through these traits, which expose only the primitives the tools
//! actually call. [`crate::document::Document`] is the bundled host.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::geometry::{Anchor, Bounds};
use crate::output::OutputError;

/// Failure reported by a host primitive.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HostError {
    /// Artboard number (1-based) does not exist in the document
    #[error("artboard {number} does not exist (document has {count})")]
    ArtboardNotFound { number: i64, count: usize },
    /// Item handle does not refer to an item
    #[error("item #{0} does not exist")]
    ItemNotFound(usize),
    /// Export scale is not a positive finite percentage
    #[error("invalid export scale {0}%")]
    InvalidScale(f64),
    /// Export would need a canvas larger than the renderer allows
    #[error("export canvas {width}x{height} pixels is too large")]
    CanvasTooLarge { width: f64, height: f64 },
    /// Writing the exported file failed
    #[error("failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: OutputError,
    },
}

/// Options for a single PNG export, mirroring the host's PNG24 settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PngExportOptions {
    /// Horizontal scale in percent (100 = 1 pixel per point)
    pub horizontal_scale: f64,
    /// Vertical scale in percent
    pub vertical_scale: f64,
    /// Leave the background transparent instead of white
    pub transparency: bool,
    /// Clip output to the artboard instead of the artwork bounds
    pub artboard_clipping: bool,
    /// Smooth shape edges
    pub anti_aliasing: bool,
}

impl PngExportOptions {
    /// Options the exporter always uses: transparent, clipped, anti-aliased.
    pub fn at_scale(percent: f64) -> Self {
        Self {
            horizontal_scale: percent,
            vertical_scale: percent,
            transparency: true,
            artboard_clipping: true,
            anti_aliasing: true,
        }
    }
}

/// Primitives needed by the ease-each sequencer.
pub trait TransformHost {
    /// Handle for an item in the host document.
    type Item: Copy;

    /// Current bounding box of an item.
    fn bounds(&self, item: Self::Item) -> Result<Bounds, HostError>;

    /// Move an item by `(dx, dy)` page units.
    fn translate(&mut self, item: Self::Item, dx: f64, dy: f64) -> Result<(), HostError>;

    /// Rotate an item counter-clockwise by `degrees` about an anchor of its bounds.
    fn rotate(&mut self, item: Self::Item, degrees: f64, anchor: Anchor) -> Result<(), HostError>;
}

/// Primitives needed by the artboard exporter.
pub trait ExportHost {
    /// Artboard names, in document order.
    fn artboards(&self) -> Vec<String>;

    /// Export artboard `index` (0-based) to a PNG file at `path`.
    fn export_png(
        &mut self,
        index: usize,
        path: &Path,
        options: &PngExportOptions,
    ) -> Result<(), HostError>;
}

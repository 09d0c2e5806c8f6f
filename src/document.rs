//! Vector documents
//!
//! A [`Document`] is a small JSON scene: named artboards plus polygon items,
//! some of which are selected. It is the bundled host for both tools: it
//! moves and rotates its own items and rasterizes artboards to PNG.
//!
//! ```json
//! {
//!   "name": "hero.ai",
//!   "artboards": [{ "name": "idle", "bounds": { "left": 0, "top": 32, "right": 32, "bottom": 0 } }],
//!   "items": [
//!     { "name": "body", "fill": "#3366ff", "selected": true,
//!       "points": [{ "x": 8, "y": 24 }, { "x": 24, "y": 24 }, { "x": 24, "y": 8 }, { "x": 8, "y": 8 }] }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use image::Rgba;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::color::parse_color;
use crate::geometry::{Anchor, Bounds, Point};
use crate::host::{ExportHost, HostError, PngExportOptions, TransformHost};
use crate::output::save_png;
use crate::render::{rasterize, Shape};

/// Error loading or saving a document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DocumentError {
    #[error("Failed to read document: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Document validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// A named export region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artboard {
    pub name: String,
    pub bounds: Bounds,
}

/// A filled closed polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default)]
    pub name: String,
    pub points: Vec<Point>,
    /// Fill color; black when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub selected: bool,
}

impl PathItem {
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.points)
    }
}

/// A document with artboards and items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    #[serde(default)]
    pub artboards: Vec<Artboard>,
    #[serde(default)]
    pub items: Vec<PathItem>,
}

/// Handle to an item of a [`Document`] (its index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(pub usize);

impl Document {
    /// Load and validate a document from a JSON file.
    pub fn load(path: &Path) -> Result<Document, DocumentError> {
        let contents = fs::read_to_string(path)?;
        Document::from_json(&contents)
    }

    /// Parse and validate a document from JSON text.
    pub fn from_json(json: &str) -> Result<Document, DocumentError> {
        let doc: Document = serde_json::from_str(json)?;

        let errors = doc.validate();
        if !errors.is_empty() {
            return Err(DocumentError::Validation(errors));
        }
        Ok(doc)
    }

    /// Write the document as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json + "\n")?;
        Ok(())
    }

    /// Check structural rules, returning one message per problem.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for (i, artboard) in self.artboards.iter().enumerate() {
            if !seen.insert(artboard.name.as_str()) {
                errors.push(format!("artboards[{}]: duplicate name '{}'", i, artboard.name));
            }
            let b = &artboard.bounds;
            if !(b.width() > 0.0 && b.height() > 0.0) {
                errors.push(format!(
                    "artboards[{}] '{}': width and height must be positive (got {}x{})",
                    i,
                    artboard.name,
                    b.width(),
                    b.height()
                ));
            }
        }

        for (i, item) in self.items.iter().enumerate() {
            if item.points.len() < 3 {
                errors.push(format!(
                    "items[{}] '{}': a path needs at least 3 points (got {})",
                    i,
                    item.name,
                    item.points.len()
                ));
            }
            if let Some(fill) = &item.fill {
                if let Err(e) = parse_color(fill) {
                    errors.push(format!("items[{}] '{}': bad fill '{}': {}", i, item.name, fill, e));
                }
            }
        }

        errors
    }

    /// Handles of the selected items, in document order.
    pub fn selection(&self) -> Vec<ItemId> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.selected)
            .map(|(i, _)| ItemId(i))
            .collect()
    }

    /// Handles of every item, in document order.
    pub fn all_items(&self) -> Vec<ItemId> {
        (0..self.items.len()).map(ItemId).collect()
    }

    /// Default artboard range: `"1"` for one artboard, `"1-N"` for several.
    pub fn default_artboard_range(&self) -> String {
        if self.artboards.len() > 1 {
            format!("1-{}", self.artboards.len())
        } else {
            "1".to_string()
        }
    }

    fn item_mut(&mut self, id: ItemId) -> Result<&mut PathItem, HostError> {
        self.items.get_mut(id.0).ok_or(HostError::ItemNotFound(id.0))
    }

    /// Page region covered by the artwork on every artboard and item.
    fn artwork_bounds(&self, artboard: &Bounds) -> Bounds {
        self.items.iter().filter_map(PathItem::bounds).fold(*artboard, |acc, b| acc.union(&b))
    }
}

impl TransformHost for Document {
    type Item = ItemId;

    fn bounds(&self, item: ItemId) -> Result<Bounds, HostError> {
        self.items
            .get(item.0)
            .and_then(PathItem::bounds)
            .ok_or(HostError::ItemNotFound(item.0))
    }

    fn translate(&mut self, item: ItemId, dx: f64, dy: f64) -> Result<(), HostError> {
        let path = self.item_mut(item)?;
        for p in &mut path.points {
            *p = p.translated(dx, dy);
        }
        Ok(())
    }

    fn rotate(&mut self, item: ItemId, degrees: f64, anchor: Anchor) -> Result<(), HostError> {
        let origin = self.bounds(item)?.anchor_point(anchor);
        let path = self.item_mut(item)?;
        for p in &mut path.points {
            *p = p.rotated_about(origin, degrees);
        }
        Ok(())
    }
}

impl ExportHost for Document {
    fn artboards(&self) -> Vec<String> {
        self.artboards.iter().map(|a| a.name.clone()).collect()
    }

    fn export_png(
        &mut self,
        index: usize,
        path: &Path,
        options: &PngExportOptions,
    ) -> Result<(), HostError> {
        let artboard = self.artboards.get(index).ok_or(HostError::ArtboardNotFound {
            number: index as i64 + 1,
            count: self.artboards.len(),
        })?;

        for scale in [options.horizontal_scale, options.vertical_scale] {
            if !(scale.is_finite() && scale > 0.0) {
                return Err(HostError::InvalidScale(scale));
            }
        }

        let region = if options.artboard_clipping {
            artboard.bounds
        } else {
            self.artwork_bounds(&artboard.bounds)
        };

        // Fills were checked on load; anything unparseable paints black.
        let shapes: Vec<Shape<'_>> = self
            .items
            .iter()
            .map(|item| Shape {
                points: &item.points,
                color: item
                    .fill
                    .as_deref()
                    .and_then(|f| parse_color(f).ok())
                    .unwrap_or(Rgba([0, 0, 0, 255])),
            })
            .collect();

        let image = rasterize(&region, &shapes, options)?;
        save_png(&image, path)
            .map_err(|source| HostError::Output { path: path.to_path_buf(), source })?;

        info!(
            artboard = %artboard.name,
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "exported artboard"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SAMPLE: &str = r##"{
        "name": "sample.ai",
        "artboards": [
            { "name": "one", "bounds": { "left": 0, "top": 10, "right": 10, "bottom": 0 } },
            { "name": "two", "bounds": { "left": 20, "top": 10, "right": 40, "bottom": 0 } }
        ],
        "items": [
            { "name": "a", "fill": "#ff0000", "selected": true,
              "points": [{"x":0,"y":10},{"x":5,"y":10},{"x":5,"y":5},{"x":0,"y":5}] },
            { "name": "b",
              "points": [{"x":20,"y":10},{"x":30,"y":10},{"x":30,"y":0}] }
        ]
    }"##;

    fn sample() -> Document {
        Document::from_json(SAMPLE).unwrap()
    }

    #[test]
    fn test_parse_sample() {
        let doc = sample();
        assert_eq!(doc.artboards.len(), 2);
        assert_eq!(doc.items[1].fill, None);
        assert!(!doc.items[1].selected);
    }

    #[test]
    fn test_selection_and_all_items() {
        let doc = sample();
        assert_eq!(doc.selection(), vec![ItemId(0)]);
        assert_eq!(doc.all_items(), vec![ItemId(0), ItemId(1)]);
    }

    #[test]
    fn test_default_artboard_range() {
        let mut doc = sample();
        assert_eq!(doc.default_artboard_range(), "1-2");
        doc.artboards.truncate(1);
        assert_eq!(doc.default_artboard_range(), "1");
    }

    #[test]
    fn test_validation_errors() {
        let json = r##"{
            "name": "bad",
            "artboards": [
                { "name": "x", "bounds": { "left": 0, "top": 0, "right": 10, "bottom": 10 } },
                { "name": "x", "bounds": { "left": 0, "top": 10, "right": 10, "bottom": 0 } }
            ],
            "items": [ { "points": [{"x":0,"y":0},{"x":1,"y":1}], "fill": "#zz" } ]
        }"##;
        match Document::from_json(json) {
            Err(DocumentError::Validation(errors)) => {
                assert_eq!(errors.len(), 4, "{:?}", errors);
                assert!(errors.iter().any(|e| e.contains("duplicate name 'x'")));
                assert!(errors.iter().any(|e| e.contains("at least 3 points")));
                assert!(errors.iter().any(|e| e.contains("bad fill")));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_translate_moves_every_point() {
        let mut doc = sample();
        doc.translate(ItemId(0), 2.0, -1.0).unwrap();
        assert_eq!(doc.items[0].points[0], Point::new(2.0, 9.0));
        assert_eq!(doc.bounds(ItemId(0)).unwrap(), Bounds::new(2.0, 9.0, 7.0, 4.0));
    }

    #[test]
    fn test_rotate_about_center_keeps_square_bounds() {
        let mut doc = sample();
        doc.rotate(ItemId(0), 90.0, Anchor::Center).unwrap();
        let b = doc.bounds(ItemId(0)).unwrap();
        assert!((b.left - 0.0).abs() < 1e-9);
        assert!((b.top - 10.0).abs() < 1e-9);
        assert!((b.right - 5.0).abs() < 1e-9);
        assert!((b.bottom - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotate_about_corner_moves_item() {
        let mut doc = sample();
        doc.rotate(ItemId(0), 90.0, Anchor::TopLeft).unwrap();
        let b = doc.bounds(ItemId(0)).unwrap();
        // Counter-clockwise about the top-left corner swings it upward.
        assert!((b.left - 0.0).abs() < 1e-9);
        assert!((b.top - 15.0).abs() < 1e-9);
        assert!((b.bottom - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_item() {
        let mut doc = sample();
        assert!(matches!(doc.translate(ItemId(9), 1.0, 1.0), Err(HostError::ItemNotFound(9))));
    }

    #[test]
    fn test_export_png_writes_scaled_artboard() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("one@2x.png");
        let mut doc = sample();

        doc.export_png(0, &path, &PngExportOptions::at_scale(200.0)).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (20, 20));
        assert_eq!(*img.get_pixel(2, 2), Rgba([255, 0, 0, 255]));
        assert_eq!(img.get_pixel(15, 15)[3], 0);
    }

    #[test]
    fn test_export_png_without_clipping_covers_all_art() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("unclipped.png");
        let mut doc = sample();
        let options = PngExportOptions { artboard_clipping: false, ..PngExportOptions::at_scale(100.0) };

        doc.export_png(0, &path, &options).unwrap();

        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (30, 10));
    }

    #[test]
    fn test_export_png_rejects_bad_scale() {
        let dir = tempdir().unwrap();
        let mut doc = sample();
        let result = doc.export_png(0, &dir.path().join("x.png"), &PngExportOptions::at_scale(-50.0));
        assert!(matches!(result, Err(HostError::InvalidScale(s)) if s == -50.0));
    }

    #[test]
    fn test_export_png_refuses_oversized_canvas() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("huge.png");
        let mut doc = sample();
        let result = doc.export_png(0, &path, &PngExportOptions::at_scale(1e12));
        assert!(matches!(result, Err(HostError::CanvasTooLarge { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn test_export_png_unknown_artboard() {
        let dir = tempdir().unwrap();
        let mut doc = sample();
        let result = doc.export_png(5, &dir.path().join("x.png"), &PngExportOptions::at_scale(100.0));
        assert!(matches!(result, Err(HostError::ArtboardNotFound { number: 6, count: 2 })));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.json");
        let doc = sample();
        doc.save(&path).unwrap();
        assert_eq!(Document::load(&path).unwrap(), doc);
    }
}

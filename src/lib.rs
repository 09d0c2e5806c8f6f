//! Backabit - progressive transforms and multi-scale export for vector artwork
//!
//! This library provides functionality to:
//! - Expand range expressions like `"1,3-5"` into integer lists
//! - Ease a translate/rotate across items ordered by page position
//! - Export artboards to PNG once per target pixel density
//!
//! Host applications plug in through [`host::TransformHost`] and
//! [`host::ExportHost`]; [`document::Document`] is the bundled JSON host.

pub mod cli;
pub mod color;
pub mod config;
pub mod document;
pub mod easing;
pub mod export;
pub mod geometry;
pub mod host;
pub mod output;
pub mod range;
pub mod render;
pub mod sequence;

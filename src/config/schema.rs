//! Configuration schema types for `backabit.toml`
//!
//! Every field is optional; a missing file behaves like an empty one.
//!
//! ```toml
//! [export]
//! source_scale = 2
//! scales = "1-3"
//! artboards = "1,4-6"
//! prefix = "hero_"
//! out = "build/sprites"
//!
//! [ease]
//! ease = "easeInOutQuad"
//! anchor = "bottom"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::easing::Ease;
use crate::export::{ExportSettings, DEFAULT_SCALES, DEFAULT_SOURCE_SCALE};
use crate::geometry::Anchor;
use crate::range::expand_range;

/// `[export]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Scale the artwork is designed at
    #[serde(default = "default_source_scale")]
    pub source_scale: f64,
    /// Target scales as a range expression
    #[serde(default = "default_scales")]
    pub scales: String,
    /// Artboard numbers as a range expression (default: every artboard)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artboards: Option<String>,
    /// File name prefix (default: document name with `.ai` replaced by `_`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Output directory (default: next to the document)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out: Option<PathBuf>,
    /// Pick scales from the fixed @1x..@8x preset instead of `scales`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolutions: Option<String>,
}

fn default_source_scale() -> f64 {
    DEFAULT_SOURCE_SCALE
}

fn default_scales() -> String {
    DEFAULT_SCALES.to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            source_scale: default_source_scale(),
            scales: default_scales(),
            artboards: None,
            prefix: None,
            out: None,
            resolutions: None,
        }
    }
}

impl ExportConfig {
    /// Layer these values over document-derived defaults.
    pub fn apply(&self, base: ExportSettings) -> ExportSettings {
        let mut settings = ExportSettings {
            source_scale: self.source_scale,
            scales: self.scales.clone(),
            artboards: self.artboards.clone().unwrap_or(base.artboards),
            prefix: self.prefix.clone().unwrap_or(base.prefix),
            folder: self.out.clone().unwrap_or(base.folder),
        };

        if let Some(resolutions) = &self.resolutions {
            settings = settings.with_preset_resolutions(&expand_range(resolutions));
        }
        settings
    }
}

/// `[ease]` section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct EaseConfig {
    #[serde(default)]
    pub ease: Ease,
    #[serde(default)]
    pub anchor: Anchor,
}

/// Complete `backabit.toml` configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BackabitConfig {
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub ease: EaseConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "export.scales")
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "backabit.toml: '{}' {}", self.field, self.message)
    }
}

/// A top-level table of `backabit.toml`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Export,
    Ease,
}

impl BackabitConfig {
    /// Validate every section and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        [ConfigSection::Export, ConfigSection::Ease]
            .into_iter()
            .flat_map(|section| self.validate_section(section))
            .collect()
    }

    /// Validate one section only
    pub fn validate_section(&self, section: ConfigSection) -> Vec<ConfigValidationError> {
        match section {
            ConfigSection::Export => self.export.validate(),
            // Every `[ease]` value is typed; bad names fail at parse time.
            ConfigSection::Ease => Vec::new(),
        }
    }
}

impl ExportConfig {
    /// Validate the `[export]` section and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if !(self.source_scale.is_finite() && self.source_scale > 0.0) {
            errors.push(ConfigValidationError {
                field: "export.source_scale".to_string(),
                message: "must be a positive number".to_string(),
            });
        }

        if expand_range(&self.scales).is_empty() {
            errors.push(ConfigValidationError {
                field: "export.scales".to_string(),
                message: format!("'{}' selects no scales", self.scales),
            });
        }

        if let Some(artboards) = &self.artboards {
            if expand_range(artboards).is_empty() {
                errors.push(ConfigValidationError {
                    field: "export.artboards".to_string(),
                    message: format!("'{}' selects no artboards", artboards),
                });
            }
        }

        if let Some(resolutions) = &self.resolutions {
            let picked = expand_range(resolutions);
            if !picked.iter().any(|r| (1..=8).contains(r)) {
                errors.push(ConfigValidationError {
                    field: "export.resolutions".to_string(),
                    message: format!("'{}' selects none of 1-8", resolutions),
                });
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> ExportSettings {
        ExportSettings {
            source_scale: 2.0,
            scales: "2,3".to_string(),
            artboards: "1-3".to_string(),
            prefix: "doc_".to_string(),
            folder: PathBuf::from("art"),
        }
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: BackabitConfig = toml::from_str("").unwrap();
        assert_eq!(config, BackabitConfig::default());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_unknown_ease_is_parse_error() {
        let result = toml::from_str::<BackabitConfig>("[ease]\nease = \"easeOutBack\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_full_config() {
        let config: BackabitConfig = toml::from_str(
            r#"
[export]
source_scale = 1.0
scales = "1-4"
artboards = "2"

[ease]
ease = "easeInOutQuad"
anchor = "bottom-left"
"#,
        )
        .unwrap();
        assert_eq!(config.export.source_scale, 1.0);
        assert_eq!(config.export.artboards.as_deref(), Some("2"));
        assert_eq!(config.ease.ease, Ease::EaseInOutQuad);
        assert_eq!(config.ease.anchor, Anchor::BottomLeft);
    }

    #[test]
    fn test_apply_keeps_document_defaults() {
        let settings = ExportConfig::default().apply(base());
        assert_eq!(settings, base());
    }

    #[test]
    fn test_apply_overrides() {
        let config = ExportConfig {
            source_scale: 1.0,
            scales: "1".to_string(),
            artboards: Some("2".to_string()),
            prefix: Some(String::new()),
            out: Some(PathBuf::from("dist")),
            resolutions: None,
        };
        let settings = config.apply(base());
        assert_eq!(settings.source_scale, 1.0);
        assert_eq!(settings.scales, "1");
        assert_eq!(settings.artboards, "2");
        assert_eq!(settings.prefix, "");
        assert_eq!(settings.folder, PathBuf::from("dist"));
    }

    #[test]
    fn test_apply_resolutions_replace_scales() {
        let config = ExportConfig { resolutions: Some("3,1".to_string()), ..Default::default() };
        assert_eq!(config.apply(base()).scales, "1,3");
    }

    #[test]
    fn test_validate_section_ignores_other_sections() {
        let mut config = BackabitConfig::default();
        config.export.scales = "none".to_string();

        assert!(config.validate_section(ConfigSection::Ease).is_empty());
        assert_eq!(config.validate_section(ConfigSection::Export).len(), 1);
        assert_eq!(config.validate().len(), 1);
    }

    #[test]
    fn test_validate_reports_each_field() {
        let config = BackabitConfig {
            export: ExportConfig {
                source_scale: 0.0,
                scales: "nope".to_string(),
                artboards: Some("3-1".to_string()),
                prefix: None,
                out: None,
                resolutions: Some("9-12".to_string()),
            },
            ease: EaseConfig::default(),
        };
        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["export.source_scale", "export.scales", "export.artboards", "export.resolutions"]
        );
    }
}

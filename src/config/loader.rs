//! Configuration loading and discovery for `backabit.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::{BackabitConfig, ConfigSection};
use crate::easing::Ease;
use crate::geometry::Anchor;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File name searched for when discovering configuration.
pub const CONFIG_FILE_NAME: &str = "backabit.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse backabit.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override source scale
    pub source_scale: Option<f64>,
    /// Override target scales
    pub scales: Option<String>,
    /// Override artboard selection
    pub artboards: Option<String>,
    /// Override file name prefix
    pub prefix: Option<String>,
    /// Override output directory
    pub out: Option<PathBuf>,
    /// Use preset resolutions
    pub resolutions: Option<String>,
    /// Override easing function
    pub ease: Option<Ease>,
    /// Override rotation anchor
    pub anchor: Option<Anchor>,
}

/// Find backabit.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for backabit.toml
/// 2. Check XDG_CONFIG_HOME/backabit/backabit.toml (or ~/.config/backabit/backabit.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find backabit.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("backabit").join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find backabit.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a backabit.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the default
/// configuration.
///
/// A relative `export.out` is resolved against the directory holding the file.
///
/// # Example
/// ```ignore
/// let config = load_config(None)?;
/// let config = load_config(Some(Path::new("art/backabit.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<BackabitConfig, ConfigError> {
    load_config_sections(path, &[ConfigSection::Export, ConfigSection::Ease])
}

/// Like [`load_config`], but only validates the listed sections.
///
/// Commands use this so a broken `[export]` table does not block `bab ease`.
pub fn load_config_sections(
    path: Option<&Path>,
    sections: &[ConfigSection],
) -> Result<BackabitConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p, sections),
        None => Ok(default_config()),
    }
}

fn load_config_file(path: &Path, sections: &[ConfigSection]) -> Result<BackabitConfig, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let contents = fs::read_to_string(path)?;
    let mut config: BackabitConfig = toml::from_str(&contents)?;

    let errors: Vec<String> = sections
        .iter()
        .flat_map(|&section| config.validate_section(section))
        .map(|e| e.to_string())
        .collect();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors));
    }

    if let (Some(root), Some(out)) = (project_root(path), config.export.out.as_deref()) {
        config.export.out = Some(resolve_path(root, out));
    }

    Ok(config)
}

/// Configuration used when no backabit.toml is found.
pub fn default_config() -> BackabitConfig {
    BackabitConfig::default()
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
///
/// # Example
/// ```ignore
/// let mut config = load_config(None)?;
/// let overrides = CliOverrides {
///     scales: Some("1-4".to_string()),
///     ..Default::default()
/// };
/// merge_cli_overrides(&mut config, &overrides);
/// ```
pub fn merge_cli_overrides(config: &mut BackabitConfig, overrides: &CliOverrides) {
    if let Some(source_scale) = overrides.source_scale {
        config.export.source_scale = source_scale;
    }

    if let Some(ref scales) = overrides.scales {
        config.export.scales = scales.clone();
    }

    if let Some(ref artboards) = overrides.artboards {
        config.export.artboards = Some(artboards.clone());
    }

    if let Some(ref prefix) = overrides.prefix {
        config.export.prefix = Some(prefix.clone());
    }

    if let Some(ref out) = overrides.out {
        config.export.out = Some(out.clone());
    }

    // Explicit scales on the command line win over configured presets.
    match (&overrides.resolutions, &overrides.scales) {
        (Some(resolutions), _) => config.export.resolutions = Some(resolutions.clone()),
        (None, Some(_)) => config.export.resolutions = None,
        (None, None) => {}
    }

    if let Some(ease) = overrides.ease {
        config.ease.ease = ease;
    }

    if let Some(anchor) = overrides.anchor {
        config.ease.anchor = anchor;
    }
}

/// Get the project root directory from a config file path.
pub fn project_root(config_path: &Path) -> Option<&Path> {
    config_path.parent()
}

/// Resolve a path relative to the project root.
///
/// If the path is absolute, returns it unchanged.
pub fn resolve_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &[u8]) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE_NAME);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(contents)
            .expect("should write config content");
        config_path
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[export]\nscales = \"1\"");

        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"");

        let subdir = temp.path().join("art").join("icons");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        let found = find_config_from(subdir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let temp = TempDir::new().expect("should create temp dir");
        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, None);
    }

    #[test]
    #[serial]
    fn test_find_xdg_config() {
        let temp = TempDir::new().expect("should create temp dir");
        let dir = temp.path().join("backabit");
        fs::create_dir_all(&dir).expect("should create xdg dir");
        let config_path = write_config(&dir, b"");

        let previous = env::var_os("XDG_CONFIG_HOME");
        env::set_var("XDG_CONFIG_HOME", temp.path());
        let found = find_xdg_config();
        match previous {
            Some(v) => env::set_var("XDG_CONFIG_HOME", v),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }

        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(
            temp.path(),
            br#"
[export]
source_scale = 1.0
scales = "1-3"
prefix = "ui_"
out = "build"

[ease]
ease = "easeOutCubic"
anchor = "top"
"#,
        );

        let config = load_config(Some(&config_path)).expect("should load valid config");
        assert_eq!(config.export.source_scale, 1.0);
        assert_eq!(config.export.scales, "1-3");
        assert_eq!(config.export.prefix.as_deref(), Some("ui_"));
        assert_eq!(config.export.out, Some(temp.path().join("build")));
        assert_eq!(config.ease.ease, Ease::EaseOutCubic);
        assert_eq!(config.ease.anchor, Anchor::Top);
    }

    #[test]
    fn test_load_config_keeps_absolute_out() {
        let temp = TempDir::new().expect("should create temp dir");
        let out = temp.path().join("elsewhere");
        let contents = format!("[export]\nout = {:?}\n", out.display().to_string());
        let config_path = write_config(temp.path(), contents.as_bytes());

        let config = load_config(Some(&config_path)).expect("should load valid config");
        assert_eq!(config.export.out, Some(out));
    }

    #[test]
    fn test_load_config_missing_file_errors() {
        let temp = TempDir::new().expect("should create temp dir");
        let result = load_config(Some(&temp.path().join("nonexistent.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"this is not valid toml {{{");

        let result = load_config(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_validation_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[export]\nsource_scale = -1.0\n");

        let result = load_config(Some(&config_path));
        let Err(ConfigError::Validation(messages)) = result else {
            panic!("expected validation error");
        };
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("export.source_scale"));
    }

    #[test]
    fn test_load_config_sections_skips_unused_sections() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(
            temp.path(),
            b"[export]\nscales = \"none\"\n\n[ease]\nease = \"easeInSine\"\n",
        );

        let config = load_config_sections(Some(&config_path), &[ConfigSection::Ease])
            .expect("ease section is valid");
        assert_eq!(config.ease.ease, Ease::EaseInSine);

        let result = load_config_sections(Some(&config_path), &[ConfigSection::Export]);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_merge_cli_overrides_export() {
        let mut config = default_config();
        let overrides = CliOverrides {
            source_scale: Some(1.0),
            scales: Some("4".to_string()),
            artboards: Some("2-3".to_string()),
            prefix: Some("p_".to_string()),
            out: Some(PathBuf::from("dist")),
            ..Default::default()
        };
        merge_cli_overrides(&mut config, &overrides);

        assert_eq!(config.export.source_scale, 1.0);
        assert_eq!(config.export.scales, "4");
        assert_eq!(config.export.artboards.as_deref(), Some("2-3"));
        assert_eq!(config.export.prefix.as_deref(), Some("p_"));
        assert_eq!(config.export.out, Some(PathBuf::from("dist")));
    }

    #[test]
    fn test_merge_cli_scales_clear_configured_resolutions() {
        let mut config = default_config();
        config.export.resolutions = Some("1-8".to_string());

        let overrides = CliOverrides { scales: Some("3".to_string()), ..Default::default() };
        merge_cli_overrides(&mut config, &overrides);
        assert_eq!(config.export.resolutions, None);
    }

    #[test]
    fn test_merge_cli_overrides_ease() {
        let mut config = default_config();
        let overrides = CliOverrides {
            ease: Some(Ease::EaseInSine),
            anchor: Some(Anchor::BottomRight),
            ..Default::default()
        };
        merge_cli_overrides(&mut config, &overrides);
        assert_eq!(config.ease.ease, Ease::EaseInSine);
        assert_eq!(config.ease.anchor, Anchor::BottomRight);
    }

    #[test]
    fn test_merge_empty_overrides_is_noop() {
        let mut config = default_config();
        merge_cli_overrides(&mut config, &CliOverrides::default());
        assert_eq!(config, default_config());
    }

    #[test]
    fn test_resolve_path() {
        let root = Path::new("/project");
        assert_eq!(resolve_path(root, Path::new("build")), PathBuf::from("/project/build"));
        assert_eq!(resolve_path(root, Path::new("/abs/out")), PathBuf::from("/abs/out"));
    }
}

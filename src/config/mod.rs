//! Configuration for the `bab` CLI
//!
//! Provides types and parsing for `backabit.toml` project configuration.

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_sections, merge_cli_overrides, CliOverrides, ConfigError};
pub use schema::*;

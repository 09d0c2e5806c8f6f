//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod ease;
mod export;
mod info;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{
    load_config_sections, merge_cli_overrides, BackabitConfig, CliOverrides, ConfigSection,
};
use crate::easing::Ease;
use crate::geometry::Anchor;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Backabit - ease transforms across a selection and export artboards at multiple scales
#[derive(Parser)]
#[command(name = "bab")]
#[command(about = "Backabit - progressive transforms and multi-scale artboard export for vector documents")]
#[command(version)]
pub struct Cli {
    /// Path to a backabit.toml (default: search upward from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Move and rotate items progressively, following an easing curve
    Ease {
        /// Document to transform (.json)
        input: PathBuf,

        /// Horizontal offset applied in full to the last item
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        dx: f64,

        /// Vertical offset applied in full to the last item
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        dy: f64,

        /// Rotation in degrees (counter-clockwise) applied in full to the last item
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        angle: f64,

        /// Easing curve (see `bab eases`)
        #[arg(long)]
        ease: Option<Ease>,

        /// Rotation anchor: top-left, top, top-right, left, center, right,
        /// bottom-left, bottom, bottom-right
        #[arg(long)]
        anchor: Option<Anchor>,

        /// Transform every item instead of the selection
        #[arg(long)]
        all: bool,

        /// Write the result here instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export artboards to PNG at several scales
    Export {
        /// Document to export (.json)
        input: PathBuf,

        /// Scale the artwork is designed at (default: 2)
        #[arg(long)]
        source_scale: Option<f64>,

        /// Target scales as a range expression (default: "2,3")
        #[arg(long)]
        scales: Option<String>,

        /// Artboard numbers as a range expression, 1-based (default: all)
        #[arg(long)]
        artboards: Option<String>,

        /// File name prefix (default: document name with a trailing ".ai" replaced by "_")
        #[arg(long)]
        prefix: Option<String>,

        /// Output directory (default: next to the document)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Pick scales from the @1x..@8x preset, as a range expression
        #[arg(long, conflicts_with = "scales")]
        resolutions: Option<String>,
    },

    /// List the artboards of a document
    Artboards {
        /// Document to inspect (.json)
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the available easing curves
    Eases,
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "backabit=debug" } else { "backabit=warn" };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Load configuration and apply command-line overrides, or report the error.
///
/// Only `section`, the table the running command reads, is validated.
pub(crate) fn resolve_config(
    path: Option<&Path>,
    overrides: &CliOverrides,
    section: ConfigSection,
) -> Result<BackabitConfig, ExitCode> {
    let mut config = load_config_sections(path, &[section]).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_ERROR)
    })?;
    merge_cli_overrides(&mut config, overrides);

    let errors = config.validate_section(section);
    if !errors.is_empty() {
        for error in errors {
            eprintln!("Error: '{}' {}", error.field, error.message);
        }
        return Err(ExitCode::from(EXIT_INVALID_ARGS));
    }
    Ok(config)
}

/// Main CLI entry point
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Ease { input, dx, dy, angle, ease, anchor, all, output } => {
            let overrides = CliOverrides { ease, anchor, ..Default::default() };
            let config = match resolve_config(config_path, &overrides, ConfigSection::Ease) {
                Ok(config) => config,
                Err(code) => return code,
            };
            ease::run_ease(&input, dx, dy, angle, &config, all, output.as_deref())
        }
        Commands::Export { input, source_scale, scales, artboards, prefix, out, resolutions } => {
            let overrides = CliOverrides {
                source_scale,
                scales,
                artboards,
                prefix,
                out,
                resolutions,
                ..Default::default()
            };
            let config = match resolve_config(config_path, &overrides, ConfigSection::Export) {
                Ok(config) => config,
                Err(code) => return code,
            };
            export::run_export(&input, &config)
        }
        Commands::Artboards { input, json } => info::run_artboards(&input, json),
        Commands::Eases => info::run_eases(),
    }
}

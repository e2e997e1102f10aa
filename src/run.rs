//! Application execution logic.
//!
//! Gathers the resolver inputs from the command line, resolves the
//! configuration and prints it.

use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;

use layerseg_config::config::{Cli, ConfigError, ConfigResolver, RawConfig, ResolvedConfig, field};
use layerseg_config::loader::{FileEntry, LoaderRegistry, TextMatrixLoader};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Loader identifier under which the built-in text loader is registered.
pub const TEXT_LOADER: &str = "text";

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The configuration could not be loaded or resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Failed to list the input files.
    #[error("Failed to list input files in '{}': {source}", path.display())]
    ListFiles {
        /// Directory being listed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to render the resolved configuration as JSON.
    #[error("Failed to render configuration: {0}")]
    Render(#[source] serde_json::Error),
}

impl RunError {
    /// Returns `true` for errors caused by the configuration itself.
    ///
    /// Loader failures while probing are runtime errors, not configuration errors.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(e) if !matches!(e, ConfigError::ProbeLoadFailure(_)))
    }
}

/// Resolver inputs gathered from the command line.
#[derive(Debug)]
struct Inputs {
    raw: RawConfig,
    overrides: RawConfig,
    data_dir: PathBuf,
    label_dir: PathBuf,
    files: Vec<FileEntry>,
}

impl Inputs {
    fn from_cli(cli: &Cli) -> Result<Self, RunError> {
        let data_dir = cli.data_dir.clone().ok_or_else(|| {
            ConfigError::missing(field::DATA_DIR, "Use --data-dir to point at the scans")
        })?;
        let label_dir = cli.label_dir.clone().unwrap_or_else(|| data_dir.clone());

        let raw = load_optional(cli.config.as_deref())?;
        let overrides = load_optional(cli.overrides.as_deref())?;

        let files = if cli.files.is_empty() {
            list_files(&data_dir)?
        } else {
            cli.files.iter().map(FileEntry::new).collect()
        };

        Ok(Self {
            raw,
            overrides,
            data_dir,
            label_dir,
            files,
        })
    }
}

/// Resolves the configuration described by `cli` and prints it to stdout.
///
/// # Errors
///
/// Returns an error if:
/// - A configuration file cannot be read or parsed
/// - The data directory cannot be listed
/// - Resolution fails (including loader failures on the probe file)
pub fn execute(cli: &Cli) -> Result<(), RunError> {
    let inputs = Inputs::from_cli(cli)?;
    tracing::debug!(
        files = inputs.files.len(),
        data_dir = %inputs.data_dir.display(),
        label_dir = %inputs.label_dir.display(),
        "Resolving configuration"
    );

    let resolver = ConfigResolver::new(builtin_registry());
    let started = Instant::now();
    let config = resolver.resolve(
        &inputs.raw,
        &inputs.overrides,
        &inputs.files,
        &inputs.data_dir,
        &inputs.label_dir,
    )?;
    let elapsed = started.elapsed();

    tracing::info!("{config}");
    if config.print_timings {
        tracing::info!("Resolved in {:.3} ms", elapsed.as_secs_f64() * 1000.0);
    }

    println!("{}", render(&config, cli.json)?);
    Ok(())
}

/// Registry with the built-in text loader for both scans and labels.
#[must_use]
pub fn builtin_registry() -> LoaderRegistry {
    LoaderRegistry::new()
        .with_data_loader(TEXT_LOADER, TextMatrixLoader)
        .with_label_loader(TEXT_LOADER, TextMatrixLoader)
}

fn render(config: &ResolvedConfig, json: bool) -> Result<String, RunError> {
    if json {
        serde_json::to_string_pretty(config).map_err(RunError::Render)
    } else {
        Ok(config.to_string())
    }
}

fn load_optional(path: Option<&Path>) -> Result<RawConfig, ConfigError> {
    path.map_or_else(|| Ok(RawConfig::default()), RawConfig::load)
}

/// Lists regular, non-hidden files in `dir`, sorted by name.
fn list_files(dir: &Path) -> Result<Vec<FileEntry>, RunError> {
    let list_error = |source| RunError::ListFiles {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(list_error)? {
        let entry = entry.map_err(list_error)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with('.') && entry.file_type().map_err(list_error)?.is_file() {
            names.push(name);
        }
    }
    names.sort();

    Ok(names.into_iter().map(FileEntry::new).collect())
}

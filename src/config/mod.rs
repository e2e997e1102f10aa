//! Configuration layer for patch collection.
//!
//! This module provides:
//! - Partial configuration from TOML ([`RawConfig`], [`OverrideParams`])
//! - Default resolution with one probe read ([`ConfigResolver`])
//! - The resolved configuration read by collectors ([`ResolvedConfig`])
//! - CLI argument parsing for the resolver tool ([`Cli`], [`Command`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Every user-settable field is resolved with the following priority
//! (highest to lowest):
//!
//! 1. **Override parameters** - Values set by a parameter sweep
//! 2. **Raw configuration** - The caller's base configuration
//! 3. **Built-in defaults** - Constants, or values derived from the probe scan
//!
//! Neither input is modified, so a sweep can reuse one base configuration
//! for every parameter combination.
//!
//! # Derived Fields
//!
//! Scan width and height, boundary and layer counts, the number of B-scan
//! regions and the compute data type are never taken from the inputs. They are
//! recomputed on every resolution from the first input file, which is read
//! once with the data loader and once with the label loader.
//!
//! # Tiers
//!
//! Defaults that depend on other fields are resolved after them:
//!
//! 1. Scalars and flags, then loader lookup
//! 2. `regions_per_volume` and `label_ids`
//! 3. `clip` and `clip_range`
//! 4. Probe: scan geometry and boundary count
//! 5. Boundary and layer ranges
//! 6. B-scan regions and column sampling
//!
//! # Preconditions
//!
//! `patch_width` must be odd. This is not checked.

mod cli;
pub mod defaults;
mod error;
mod geometry;
mod layers;
mod preprocessing;
mod raw;
mod resolved;
mod resolver;

#[cfg(test)]
mod cli_tests;
#[cfg(test)]
mod resolved_tests;

use std::path::Path;

pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use geometry::{ClipRange, RegionBounds, one_based, subsample_columns};
pub use layers::{Layers, first_present};
pub use preprocessing::{Preprocessing, PreprocessingStep};
pub use raw::{OverrideParams, RawConfig, default_config_template};
pub use resolved::{ComputeDataType, PatchPosition, ResolvedConfig, ResolvedLoaders};
pub use resolver::ConfigResolver;

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

//! Error types for configuration parsing and resolution.

use std::path::PathBuf;

use thiserror::Error;

use crate::loader::{LoadError, LoaderKind};

/// Error type for configuration operations.
///
/// Covers errors from parsing, resolution, and file operations.
/// Any error aborts resolution; no partially resolved configuration is returned.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Missing required field that must be provided on the command line.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// No input file is available to probe.
    #[error("File list is empty: at least one input file is needed to probe scan geometry")]
    EmptyFileList,

    /// Clipping is enabled but neither source supplies a clip range.
    #[error("Missing required field: clip_range. Clipping is enabled, so a clip range must be given")]
    MissingClipRange,

    /// The clip range is unordered or exceeds the probe scan.
    #[error("Invalid clip range [{left}, {right}]: expected 1 <= left < right <= {width}")]
    InvalidClipRange {
        /// Requested first column
        left: usize,
        /// Requested last column
        right: usize,
        /// Native width of the probe scan
        width: usize,
    },

    /// A scalar field has an unusable value.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// The label-id matrix does not match the file list or region count.
    #[error("Invalid label_ids: {reason}")]
    InvalidLabelIds {
        /// Reason for invalidity
        reason: String,
    },

    /// A B-scan region lies outside the resolved scan width.
    #[error("Invalid B-scan region [{left}, {right}]: expected 1 <= left <= right <= {width}")]
    InvalidRegionBounds {
        /// First column of the region
        left: usize,
        /// Last column of the region
        right: usize,
        /// Resolved scan width
        width: usize,
    },

    /// No loader is registered under the configured identifier.
    #[error("Unknown {kind} loader '{name}'")]
    UnknownLoader {
        /// Data or label loader
        kind: LoaderKind,
        /// The identifier that was looked up
        name: String,
    },

    /// The probe scan has no rows or no columns.
    #[error("Probe scan '{file}' is empty ({rows}x{cols})")]
    EmptyProbeScan {
        /// File that was probed
        file: String,
        /// Row count of the loaded scan
        rows: usize,
        /// Column count of the loaded scan
        cols: usize,
    },

    /// A loader failed while reading the probe file.
    #[error(transparent)]
    ProbeLoadFailure(#[from] LoadError),
}

/// Well-known field names for `InvalidValue` and `MissingRequired` errors.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The data directory.
    pub const DATA_DIR: &str = "data_dir";
    /// The patch width field.
    pub const PATCH_WIDTH: &str = "patch_width";
    /// The patch height field.
    pub const PATCH_HEIGHT: &str = "patch_height";
    /// The verbosity field.
    pub const VERBOSITY: &str = "verbosity";
    /// The patches-per-class field.
    pub const NUM_PATCHES_PER_CLASS: &str = "num_patches_per_class";
    /// The regions-per-volume field.
    pub const REGIONS_PER_VOLUME: &str = "regions_per_volume";
    /// The training boundaries field.
    pub const EDGES_TRAIN: &str = "edges_train";
    /// The training layers field.
    pub const LAYERS_TRAIN: &str = "layers_train";
    /// The prediction boundaries field.
    pub const EDGES_PRED: &str = "edges_pred";
    /// The prediction layers field.
    pub const LAYERS_PRED: &str = "layers_pred";
    /// The B-scan region bounds field.
    pub const BSCAN_REGION_BOUNDS: &str = "bscan_region_bounds";
    /// The shape-prior columns field.
    pub const COLUMNS_SHAPE: &str = "columns_shape";
    /// The prediction columns field.
    pub const COLUMNS_PRED: &str = "columns_pred";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }

    /// Creates an `InvalidValue` error for a field.
    #[must_use]
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }

    /// Creates an `InvalidLabelIds` error.
    #[must_use]
    pub fn label_ids(reason: impl Into<String>) -> Self {
        Self::InvalidLabelIds {
            reason: reason.into(),
        }
    }
}

//! Partially specified configuration, as written by users and sweep drivers.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::geometry::{ClipRange, RegionBounds};
use super::preprocessing::Preprocessing;
use super::{ConfigError, PatchPosition};

/// Partial configuration.
///
/// All fields are optional; absent fields are filled during resolution.
/// The same structure carries both the caller's base configuration and the
/// override parameters of a parameter sweep (see [`OverrideParams`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    /// Patch width in pixels; must be odd
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch_width: Option<usize>,

    /// Patch height in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch_height: Option<usize>,

    /// Verbosity level, 0 to 2
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbosity: Option<u8>,

    /// Scan loader identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_loader: Option<String>,

    /// Ground-truth loader identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_loader: Option<String>,

    /// Print timing information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_timings: Option<bool>,

    /// Save appearance terms computed during prediction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_appearance_terms: Option<bool>,

    /// Run computations on an accelerator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute_on_accelerator: Option<bool>,

    /// Patches collected per class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_patches_per_class: Option<usize>,

    /// Center patches on the sampled pixel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_patches: Option<bool>,

    /// Where patches are placed within a layer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch_position: Option<PatchPosition>,

    /// Patch- and scan-level preprocessing pipelines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preprocessing: Option<Preprocessing>,

    /// Regions per volume (columns of `label_ids`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions_per_volume: Option<usize>,

    /// Label ids, one row per file and one column per region
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_ids: Option<Vec<Vec<i64>>>,

    /// Clip scans to `clip_range`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip: Option<bool>,

    /// Columns kept when clipping, `[left, right]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip_range: Option<ClipRange>,

    /// Boundaries used for training
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edges_train: Option<Vec<usize>>,

    /// Layers used for training
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layers_train: Option<Vec<usize>>,

    /// Boundaries predicted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edges_pred: Option<Vec<usize>>,

    /// Layers predicted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layers_pred: Option<Vec<usize>>,

    /// Column bounds of each B-scan region, `[[left, right], ...]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bscan_region_bounds: Option<Vec<RegionBounds>>,

    /// Shape-prior columns, one list per region of the volume
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns_shape: Option<Vec<Vec<usize>>>,

    /// Columns used for prediction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns_pred: Option<Vec<usize>>,
}

/// Override parameters share the shape of the base configuration.
pub type OverrideParams = RawConfig;

impl RawConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# layerseg-config configuration file
#
# Every field is optional. Absent fields are filled in this order:
# override parameters, then this file, then built-in defaults.
# Scan width and height, boundary and layer counts are always
# derived from the first input file.

# Patch size in pixels (patch_width must be odd)
patch_width = 15
patch_height = 15

# 0 = quiet, 1 = normal, 2 = debug
# verbosity = 1

# Loader identifiers (must be registered with the resolver)
# data_loader = "spectralis"
# label_loader = "LabelsFromLabelingTool"

# print_timings = false
# save_appearance_terms = false
# compute_on_accelerator = false

# Patch sampling
# num_patches_per_class = 30
# center_patches = true
# Accepted values: "random" or "middle"
# patch_position = "middle"

# Label ids: one row per input file, one column per region of the volume.
# Omit for 2-D data (one region, all ids zero).
# label_ids = [[1, 2, 3], [1, 2, 3]]

# Clipping (clip_range is required when clip = true)
# clip = true
# clip_range = [5, 500]

# Boundary and layer subsets (default: all)
# edges_train = [1, 2, 3, 4, 5, 6, 7, 8]
# layers_train = [1, 2, 3, 4, 5, 6, 7, 8, 9]

# B-scan regions as [left, right] column pairs (default: full width)
# bscan_region_bounds = [[1, 384], [385, 768]]

# Columns for the shape prior (one list per region) and for prediction.
# Default: every second column across the scan.
# columns_pred = [1, 3, 5]

# Preprocessing steps, applied in order
[preprocessing]
scan_level = []

[[preprocessing.patch_level]]
op = "eigenspace_projection"
rank = 20
"#
    .to_string()
}

//! Fully resolved configuration handed to patch collectors.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use ndarray::Array2;
use serde::{Deserialize, Serialize, Serializer};

use crate::loader::{DataLoader, LabelLoader};

use super::geometry::{ClipRange, RegionBounds};
use super::preprocessing::Preprocessing;
use super::raw::RawConfig;

/// Where patches are placed within a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchPosition {
    /// Uniformly random rows inside the layer
    Random,
    /// The middle row of the layer
    Middle,
}

impl fmt::Display for PatchPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random => write!(f, "random"),
            Self::Middle => write!(f, "middle"),
        }
    }
}

/// Numeric representation used by downstream computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComputeDataType {
    /// Double precision in host memory
    CpuDouble,
    /// Buffers resident on the accelerator
    AcceleratorResident,
}

impl fmt::Display for ComputeDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CpuDouble => write!(f, "cpu-double"),
            Self::AcceleratorResident => write!(f, "accelerator-resident"),
        }
    }
}

/// Loader implementations selected for this configuration.
#[derive(Clone)]
pub struct ResolvedLoaders {
    /// Scan loader registered under `data_loader`
    pub data: Arc<dyn DataLoader>,
    /// Ground-truth loader registered under `label_loader`
    pub label: Arc<dyn LabelLoader>,
}

impl fmt::Debug for ResolvedLoaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedLoaders").finish_non_exhaustive()
    }
}

/// Fully resolved configuration for a collection session.
///
/// Every field is populated and the whole structure is internally
/// consistent:
///
/// - `layer_count == boundary_count + 1`
/// - `bscan_region_bounds.len() == regions_per_bscan`
/// - `columns_shape.len() == regions_per_volume`
/// - `label_ids` has one row per input file and `regions_per_volume` columns
/// - `clip_range` is set exactly when `clip` is true
///
/// # Construction
///
/// Use [`ConfigResolver::resolve`](super::ConfigResolver::resolve). Collectors
/// only read the result.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    /// Directory holding the scans
    pub data_dir: PathBuf,
    /// Directory holding the ground truth
    pub label_dir: PathBuf,

    /// Patch width in pixels (odd by caller contract)
    pub patch_width: usize,
    /// Patch height in pixels
    pub patch_height: usize,
    /// Verbosity level, 0 to 2
    pub verbosity: u8,
    /// Scan loader identifier
    pub data_loader: String,
    /// Ground-truth loader identifier
    pub label_loader: String,
    /// Print timing information
    pub print_timings: bool,
    /// Save appearance terms computed during prediction
    pub save_appearance_terms: bool,
    /// Run computations on an accelerator
    pub compute_on_accelerator: bool,
    /// Patches collected per class
    pub num_patches_per_class: usize,
    /// Center patches on the sampled pixel
    pub center_patches: bool,
    /// Where patches are placed within a layer
    pub patch_position: PatchPosition,
    /// Patch- and scan-level preprocessing pipelines
    pub preprocessing: Preprocessing,

    /// Regions per volume
    pub regions_per_volume: usize,
    /// Label ids, files × regions
    #[serde(serialize_with = "serialize_matrix")]
    pub label_ids: Array2<i64>,

    /// Clip scans to `clip_range`
    pub clip: bool,
    /// Columns kept when clipping
    pub clip_range: Option<ClipRange>,

    /// Scan width after clipping
    pub scan_width: usize,
    /// Scan height (rows of the probe scan)
    pub scan_height: usize,
    /// Boundaries in the ground truth
    pub boundary_count: usize,
    /// Layers between and around the boundaries
    pub layer_count: usize,
    /// Boundaries used for training
    pub edges_train: Vec<usize>,
    /// Layers used for training
    pub layers_train: Vec<usize>,
    /// Boundaries predicted
    pub edges_pred: Vec<usize>,
    /// Layers predicted
    pub layers_pred: Vec<usize>,

    /// Column bounds of each B-scan region
    pub bscan_region_bounds: Vec<RegionBounds>,
    /// Number of B-scan regions
    pub regions_per_bscan: usize,
    /// Shape-prior columns, one list per region of the volume
    pub columns_shape: Vec<Vec<usize>>,
    /// Columns used for prediction
    pub columns_pred: Vec<usize>,

    /// Numeric representation for downstream computations
    pub compute_data_type: ComputeDataType,
    /// Same as `layer_count`; kept for collectors that read this name
    pub num_layers: usize,

    /// Loaders selected by `data_loader` and `label_loader`
    #[serde(skip)]
    pub loaders: ResolvedLoaders,
}

impl ResolvedConfig {
    /// Label ids as nested rows.
    #[must_use]
    pub fn label_id_rows(&self) -> Vec<Vec<i64>> {
        matrix_rows(&self.label_ids)
    }
}

impl fmt::Display for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clip_str = self
            .clip_range
            .map_or_else(|| "none".to_string(), |r| r.to_string());

        write!(
            f,
            "Config {{ scan: {}x{}, clip: {}, boundaries: {}, layers: {}, patch: {}x{}, \
             patches_per_class: {}, position: {}, regions: {}/volume {}/bscan, \
             loaders: {}/{}, compute: {} }}",
            self.scan_width,
            self.scan_height,
            clip_str,
            self.boundary_count,
            self.layer_count,
            self.patch_width,
            self.patch_height,
            self.num_patches_per_class,
            self.patch_position,
            self.regions_per_volume,
            self.regions_per_bscan,
            self.data_loader,
            self.label_loader,
            self.compute_data_type,
        )
    }
}

impl From<&ResolvedConfig> for RawConfig {
    /// Every user-settable field, fully specified.
    ///
    /// Resolving the result again against the same files yields the same
    /// configuration.
    fn from(config: &ResolvedConfig) -> Self {
        Self {
            patch_width: Some(config.patch_width),
            patch_height: Some(config.patch_height),
            verbosity: Some(config.verbosity),
            data_loader: Some(config.data_loader.clone()),
            label_loader: Some(config.label_loader.clone()),
            print_timings: Some(config.print_timings),
            save_appearance_terms: Some(config.save_appearance_terms),
            compute_on_accelerator: Some(config.compute_on_accelerator),
            num_patches_per_class: Some(config.num_patches_per_class),
            center_patches: Some(config.center_patches),
            patch_position: Some(config.patch_position),
            preprocessing: Some(config.preprocessing.clone()),
            regions_per_volume: Some(config.regions_per_volume),
            label_ids: Some(config.label_id_rows()),
            clip: Some(config.clip),
            clip_range: config.clip_range,
            edges_train: Some(config.edges_train.clone()),
            layers_train: Some(config.layers_train.clone()),
            edges_pred: Some(config.edges_pred.clone()),
            layers_pred: Some(config.layers_pred.clone()),
            bscan_region_bounds: Some(config.bscan_region_bounds.clone()),
            columns_shape: Some(config.columns_shape.clone()),
            columns_pred: Some(config.columns_pred.clone()),
        }
    }
}

fn matrix_rows(matrix: &Array2<i64>) -> Vec<Vec<i64>> {
    matrix.rows().into_iter().map(|row| row.to_vec()).collect()
}

fn serialize_matrix<S: Serializer>(matrix: &Array2<i64>, serializer: S) -> Result<S::Ok, S::Error> {
    matrix_rows(matrix).serialize(serializer)
}

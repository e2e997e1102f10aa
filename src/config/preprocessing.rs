//! Preprocessing steps applied to scans and patches.

use serde::{Deserialize, Serialize};

use super::defaults;

/// A single preprocessing operation with its parameters.
///
/// Steps are applied in list order. In TOML each step is a table tagged by
/// `op`:
///
/// ```toml
/// [[preprocessing.patch_level]]
/// op = "eigenspace_projection"
/// rank = 20
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PreprocessingStep {
    /// Project onto the leading `rank` eigenvectors of the training patches.
    EigenspaceProjection {
        /// Number of eigenvectors kept
        rank: usize,
    },
    /// Subtract the mean.
    ZeroMean,
    /// Divide by the standard deviation.
    UnitVariance,
    /// Gaussian smoothing with standard deviation `sigma` (pixels).
    GaussianSmoothing {
        /// Kernel standard deviation
        sigma: f64,
    },
}

/// Ordered preprocessing pipelines for patches and whole scans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Preprocessing {
    /// Steps applied to every extracted patch
    #[serde(default)]
    pub patch_level: Vec<PreprocessingStep>,

    /// Steps applied to each scan before patch extraction
    #[serde(default)]
    pub scan_level: Vec<PreprocessingStep>,
}

impl Default for Preprocessing {
    /// Eigenspace projection on patches, nothing on scans.
    fn default() -> Self {
        Self {
            patch_level: vec![PreprocessingStep::EigenspaceProjection {
                rank: defaults::EIGENSPACE_RANK,
            }],
            scan_level: Vec::new(),
        }
    }
}

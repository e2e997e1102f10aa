//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.
//! Defaults that depend on the probe scan live in the resolver.

use super::{ComputeDataType, PatchPosition};

/// Default patch width in pixels (odd, so patches have a center column).
pub const PATCH_WIDTH: usize = 15;

/// Default patch height in pixels.
pub const PATCH_HEIGHT: usize = 15;

/// Default verbosity level.
pub const VERBOSITY: u8 = 1;

/// Highest accepted verbosity level.
pub const MAX_VERBOSITY: u8 = 2;

/// Default scan loader identifier.
pub const DATA_LOADER: &str = "spectralis";

/// Default ground-truth loader identifier.
pub const LABEL_LOADER: &str = "LabelsFromLabelingTool";

/// Default for printing timing information.
pub const PRINT_TIMINGS: bool = false;

/// Default for saving appearance terms.
pub const SAVE_APPEARANCE_TERMS: bool = false;

/// Default for computing on an accelerator.
pub const COMPUTE_ON_ACCELERATOR: bool = false;

/// Default number of patches collected per class.
pub const NUM_PATCHES_PER_CLASS: usize = 30;

/// Default for centering patches.
pub const CENTER_PATCHES: bool = true;

/// Default patch position.
pub const PATCH_POSITION: PatchPosition = PatchPosition::Middle;

/// Default eigenspace projection rank for patch-level preprocessing.
pub const EIGENSPACE_RANK: usize = 20;

/// Default for clipping scans.
pub const CLIP: bool = false;

/// Regions per volume when no label ids are given (2-D data).
pub const REGIONS_PER_VOLUME: usize = 1;

/// Label id used to fill a defaulted label-id matrix.
pub const LABEL_ID: i64 = 0;

/// Compute data type for the given accelerator setting.
#[must_use]
pub const fn compute_data_type(on_accelerator: bool) -> ComputeDataType {
    if on_accelerator {
        ComputeDataType::AcceleratorResident
    } else {
        ComputeDataType::CpuDouble
    }
}

//! Default resolution: partial configuration + overrides + one probe read.
//!
//! Fields are resolved tier by tier; later tiers read the values already
//! resolved by earlier ones. Nothing is assembled into a [`ResolvedConfig`]
//! until every tier has succeeded.

use std::path::Path;

use ndarray::Array2;

use crate::loader::{FileEntry, LoadContext, LoaderKind, LoaderRegistry};

use super::defaults;
use super::error::{ConfigError, field};
use super::geometry::{ClipRange, RegionBounds, one_based, subsample_columns};
use super::layers::Layers;
use super::preprocessing::Preprocessing;
use super::raw::{OverrideParams, RawConfig};
use super::resolved::{PatchPosition, ResolvedConfig, ResolvedLoaders};

/// Resolves partial configurations into [`ResolvedConfig`]s.
///
/// Holds the loader registry used to turn loader identifiers into
/// implementations. Each call to [`resolve`](Self::resolve) is independent;
/// the resolver keeps no state between calls.
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    registry: LoaderRegistry,
}

/// Independent scalars and flags.
struct Scalars {
    patch_width: usize,
    patch_height: usize,
    verbosity: u8,
    data_loader: String,
    label_loader: String,
    print_timings: bool,
    save_appearance_terms: bool,
    compute_on_accelerator: bool,
    num_patches_per_class: usize,
    center_patches: bool,
    patch_position: PatchPosition,
    preprocessing: Preprocessing,
}

/// Scan geometry and ground-truth structure learned from the first file.
struct Probe {
    scan_width: usize,
    scan_height: usize,
    boundary_count: usize,
}

/// Boundary and layer indices used for training and prediction.
struct Ranges {
    edges_train: Vec<usize>,
    layers_train: Vec<usize>,
    edges_pred: Vec<usize>,
    layers_pred: Vec<usize>,
}

/// Column sampling and region layout.
struct Columns {
    bscan_region_bounds: Vec<RegionBounds>,
    columns_shape: Vec<Vec<usize>>,
    columns_pred: Vec<usize>,
}

impl ConfigResolver {
    /// Creates a resolver that looks loaders up in `registry`.
    #[must_use]
    pub const fn new(registry: LoaderRegistry) -> Self {
        Self { registry }
    }

    /// Returns the loader registry.
    #[must_use]
    pub const fn registry(&self) -> &LoaderRegistry {
        &self.registry
    }

    /// Resolves a configuration.
    ///
    /// Each field takes the override value if present, else the raw value,
    /// else its default. Scan geometry and boundary count are always read
    /// from `files[0]`: the data loader and the label loader are each invoked
    /// exactly once.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `files` is empty
    /// - A scalar is out of range or `label_ids` does not fit the file list
    /// - A loader identifier is not registered
    /// - Clipping is enabled without a clip range, or the range exceeds the scan
    /// - A loader fails (the loader's error is passed through unchanged)
    /// - A boundary or layer index is not in the probed ground truth
    /// - Region bounds or column lists do not fit the resolved width
    pub fn resolve(
        &self,
        raw: &RawConfig,
        overrides: &OverrideParams,
        files: &[FileEntry],
        data_dir: &Path,
        label_dir: &Path,
    ) -> Result<ResolvedConfig, ConfigError> {
        let probe_file = files.first().ok_or(ConfigError::EmptyFileList)?;
        let layers = Layers::new(raw, overrides);

        let scalars = resolve_scalars(&layers)?;
        let loaders = self.resolve_loaders(&scalars)?;

        let (regions_per_volume, label_ids) = resolve_label_ids(&layers, files.len())?;

        let clip = layers.or(|c| &c.clip, defaults::CLIP);
        let clip_range = resolve_clip_range(&layers, clip)?;

        // Probe values live only in this call; the probe label id is not kept.
        let context = LoadContext {
            label_id: label_ids[[0, 0]],
            clip_range: None,
            data_dir,
            label_dir,
        };
        let probe = probe(&loaders, &probe_file.name, &context, clip_range)?;
        let layer_count = probe.boundary_count + 1;

        let ranges = resolve_ranges(&layers, probe.boundary_count, layer_count)?;
        let columns = resolve_columns(&layers, probe.scan_width, regions_per_volume)?;

        Ok(ResolvedConfig {
            data_dir: data_dir.to_path_buf(),
            label_dir: label_dir.to_path_buf(),
            patch_width: scalars.patch_width,
            patch_height: scalars.patch_height,
            verbosity: scalars.verbosity,
            data_loader: scalars.data_loader,
            label_loader: scalars.label_loader,
            print_timings: scalars.print_timings,
            save_appearance_terms: scalars.save_appearance_terms,
            compute_on_accelerator: scalars.compute_on_accelerator,
            num_patches_per_class: scalars.num_patches_per_class,
            center_patches: scalars.center_patches,
            patch_position: scalars.patch_position,
            preprocessing: scalars.preprocessing,
            regions_per_volume,
            label_ids,
            clip,
            clip_range,
            scan_width: probe.scan_width,
            scan_height: probe.scan_height,
            boundary_count: probe.boundary_count,
            layer_count,
            edges_train: ranges.edges_train,
            layers_train: ranges.layers_train,
            edges_pred: ranges.edges_pred,
            layers_pred: ranges.layers_pred,
            regions_per_bscan: columns.bscan_region_bounds.len(),
            bscan_region_bounds: columns.bscan_region_bounds,
            columns_shape: columns.columns_shape,
            columns_pred: columns.columns_pred,
            compute_data_type: defaults::compute_data_type(scalars.compute_on_accelerator),
            num_layers: layer_count,
            loaders,
        })
    }

    fn resolve_loaders(&self, scalars: &Scalars) -> Result<ResolvedLoaders, ConfigError> {
        let data = self
            .registry
            .data_loader(&scalars.data_loader)
            .ok_or_else(|| ConfigError::UnknownLoader {
                kind: LoaderKind::Data,
                name: scalars.data_loader.clone(),
            })?;

        let label = self
            .registry
            .label_loader(&scalars.label_loader)
            .ok_or_else(|| ConfigError::UnknownLoader {
                kind: LoaderKind::Label,
                name: scalars.label_loader.clone(),
            })?;

        Ok(ResolvedLoaders { data, label })
    }
}

fn resolve_scalars(layers: &Layers<'_>) -> Result<Scalars, ConfigError> {
    let patch_width =
        positive(field::PATCH_WIDTH, layers.or(|c| &c.patch_width, defaults::PATCH_WIDTH))?;
    let patch_height =
        positive(field::PATCH_HEIGHT, layers.or(|c| &c.patch_height, defaults::PATCH_HEIGHT))?;
    let num_patches_per_class = positive(
        field::NUM_PATCHES_PER_CLASS,
        layers.or(|c| &c.num_patches_per_class, defaults::NUM_PATCHES_PER_CLASS),
    )?;

    let verbosity = layers.or(|c| &c.verbosity, defaults::VERBOSITY);
    if verbosity > defaults::MAX_VERBOSITY {
        return Err(ConfigError::invalid(
            field::VERBOSITY,
            format!("{verbosity} is above the maximum of {}", defaults::MAX_VERBOSITY),
        ));
    }

    Ok(Scalars {
        patch_width,
        patch_height,
        verbosity,
        data_loader: layers.or_else(|c| &c.data_loader, || defaults::DATA_LOADER.to_string()),
        label_loader: layers.or_else(|c| &c.label_loader, || defaults::LABEL_LOADER.to_string()),
        print_timings: layers.or(|c| &c.print_timings, defaults::PRINT_TIMINGS),
        save_appearance_terms: layers
            .or(|c| &c.save_appearance_terms, defaults::SAVE_APPEARANCE_TERMS),
        compute_on_accelerator: layers
            .or(|c| &c.compute_on_accelerator, defaults::COMPUTE_ON_ACCELERATOR),
        num_patches_per_class,
        center_patches: layers.or(|c| &c.center_patches, defaults::CENTER_PATCHES),
        patch_position: layers.or(|c| &c.patch_position, defaults::PATCH_POSITION),
        preprocessing: layers.or_else(|c| &c.preprocessing, Preprocessing::default),
    })
}

fn positive(name: &'static str, value: usize) -> Result<usize, ConfigError> {
    if value == 0 {
        return Err(ConfigError::invalid(name, "must be greater than 0"));
    }
    Ok(value)
}

/// Regions per volume and the label-id matrix.
///
/// The region count follows the user-supplied `label_ids` if there is one;
/// only without it does the default of one region (2-D data) apply.
fn resolve_label_ids(
    layers: &Layers<'_>,
    num_files: usize,
) -> Result<(usize, Array2<i64>), ConfigError> {
    let explicit_regions = layers.get(|c| &c.regions_per_volume).copied();
    if explicit_regions == Some(0) {
        return Err(ConfigError::invalid(field::REGIONS_PER_VOLUME, "must be greater than 0"));
    }

    let Some(rows) = layers.get(|c| &c.label_ids) else {
        let regions = explicit_regions.unwrap_or(defaults::REGIONS_PER_VOLUME);
        return Ok((
            regions,
            Array2::from_elem((num_files, regions), defaults::LABEL_ID),
        ));
    };

    let label_ids = label_matrix(rows, num_files)?;
    let regions = label_ids.ncols();
    if let Some(explicit) = explicit_regions.filter(|&explicit| explicit != regions) {
        return Err(ConfigError::label_ids(format!(
            "{regions} columns, but regions_per_volume is {explicit}"
        )));
    }

    Ok((regions, label_ids))
}

fn label_matrix(rows: &[Vec<i64>], num_files: usize) -> Result<Array2<i64>, ConfigError> {
    if rows.len() != num_files {
        return Err(ConfigError::label_ids(format!(
            "{} rows for {num_files} input files",
            rows.len()
        )));
    }

    let cols = rows.first().map_or(0, Vec::len);
    if cols == 0 {
        return Err(ConfigError::label_ids("rows must not be empty"));
    }

    if let Some(index) = rows.iter().position(|row| row.len() != cols) {
        return Err(ConfigError::label_ids(format!(
            "row {} has {} entries, expected {cols}",
            index + 1,
            rows[index].len()
        )));
    }

    Array2::from_shape_vec((num_files, cols), rows.concat())
        .map_err(|e| ConfigError::label_ids(e.to_string()))
}

fn resolve_clip_range(layers: &Layers<'_>, clip: bool) -> Result<Option<ClipRange>, ConfigError> {
    let range = layers.get(|c| &c.clip_range).copied();

    if !clip {
        if let Some(ignored) = range {
            tracing::warn!("Clipping is disabled; ignoring clip_range {ignored}");
        }
        return Ok(None);
    }

    range.map(Some).ok_or(ConfigError::MissingClipRange)
}

/// Reads the scan, then the ground truth, of the probe file.
///
/// The clip range is checked against the native scan before the labels are
/// loaded.
fn probe(
    loaders: &ResolvedLoaders,
    file: &str,
    context: &LoadContext<'_>,
    clip_range: Option<ClipRange>,
) -> Result<Probe, ConfigError> {
    let scan = loaders.data.load_data(file, context)?;
    let (rows, cols) = scan.dim();
    if rows == 0 || cols == 0 {
        return Err(ConfigError::EmptyProbeScan {
            file: file.to_string(),
            rows,
            cols,
        });
    }

    let scan_width = match clip_range {
        Some(range) => {
            if range.left == 0 || range.left >= range.right || range.right > cols {
                return Err(ConfigError::InvalidClipRange {
                    left: range.left,
                    right: range.right,
                    width: cols,
                });
            }
            range.width()
        }
        None => cols,
    };

    let truth = loaders.label.load_labels(file, context)?;
    let boundary_count = truth.nrows();

    tracing::debug!(
        file,
        native_width = cols,
        scan_width,
        scan_height = rows,
        boundary_count,
        "Probed scan geometry"
    );

    Ok(Probe {
        scan_width,
        scan_height: rows,
        boundary_count,
    })
}

/// Boundary and layer indices, defaulting to every one the ground truth has.
///
/// Supplied indices must exist in the probed ground truth.
fn resolve_ranges(
    layers: &Layers<'_>,
    boundary_count: usize,
    layer_count: usize,
) -> Result<Ranges, ConfigError> {
    let edges_train = layers.or_else(|c| &c.edges_train, || one_based(boundary_count));
    check_indices(field::EDGES_TRAIN, "boundary", &edges_train, boundary_count)?;
    let layers_train = layers.or_else(|c| &c.layers_train, || one_based(layer_count));
    check_indices(field::LAYERS_TRAIN, "layer", &layers_train, layer_count)?;
    let edges_pred = layers.or_else(|c| &c.edges_pred, || one_based(boundary_count));
    check_indices(field::EDGES_PRED, "boundary", &edges_pred, boundary_count)?;
    let layers_pred = layers.or_else(|c| &c.layers_pred, || one_based(layer_count));
    check_indices(field::LAYERS_PRED, "layer", &layers_pred, layer_count)?;

    Ok(Ranges {
        edges_train,
        layers_train,
        edges_pred,
        layers_pred,
    })
}

fn check_indices(
    name: &'static str,
    kind: &str,
    indices: &[usize],
    count: usize,
) -> Result<(), ConfigError> {
    match indices.iter().find(|&&i| i == 0 || i > count) {
        Some(index) => Err(ConfigError::invalid(
            name,
            format!("{kind} {index} is outside 1..={count}"),
        )),
        None => Ok(()),
    }
}

fn resolve_columns(
    layers: &Layers<'_>,
    scan_width: usize,
    regions_per_volume: usize,
) -> Result<Columns, ConfigError> {
    let bscan_region_bounds =
        layers.or_else(|c| &c.bscan_region_bounds, || vec![RegionBounds::full(scan_width)]);
    if bscan_region_bounds.is_empty() {
        return Err(ConfigError::invalid(
            field::BSCAN_REGION_BOUNDS,
            "at least one region is required",
        ));
    }
    if let Some(bad) = bscan_region_bounds.iter().find(|b| !b.fits(scan_width)) {
        return Err(ConfigError::InvalidRegionBounds {
            left: bad.left,
            right: bad.right,
            width: scan_width,
        });
    }

    let columns_shape = layers.or_else(
        |c| &c.columns_shape,
        || vec![subsample_columns(scan_width); regions_per_volume],
    );
    if columns_shape.len() != regions_per_volume {
        return Err(ConfigError::invalid(
            field::COLUMNS_SHAPE,
            format!(
                "{} column lists for {regions_per_volume} regions per volume",
                columns_shape.len()
            ),
        ));
    }
    for columns in &columns_shape {
        check_columns(field::COLUMNS_SHAPE, columns, scan_width)?;
    }

    let columns_pred = layers.or_else(|c| &c.columns_pred, || subsample_columns(scan_width));
    check_columns(field::COLUMNS_PRED, &columns_pred, scan_width)?;

    Ok(Columns {
        bscan_region_bounds,
        columns_shape,
        columns_pred,
    })
}

fn check_columns(name: &'static str, columns: &[usize], width: usize) -> Result<(), ConfigError> {
    match columns.iter().find(|&&c| c == 0 || c > width) {
        Some(column) => Err(ConfigError::invalid(
            name,
            format!("column {column} is outside 1..={width}"),
        )),
        None => Ok(()),
    }
}

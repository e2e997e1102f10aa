//! Tests for configuration resolution.

use std::path::Path;
use std::sync::Arc;

use super::ConfigError;
use super::defaults;
use super::raw::RawConfig;
use super::resolved::ResolvedConfig;
use super::resolver::ConfigResolver;
use crate::loader::mock::MockLoader;
use crate::loader::{FileEntry, LoaderRegistry};

/// Resolver wired to mock loaders under the default identifiers.
struct Harness {
    data: Arc<MockLoader>,
    labels: Arc<MockLoader>,
    resolver: ConfigResolver,
}

impl Harness {
    /// Probe scan of `rows` × `cols` with `boundaries` ground-truth rows.
    fn new(rows: usize, cols: usize, boundaries: usize) -> Self {
        Self::with_loaders(
            MockLoader::with_shape(rows, cols),
            MockLoader::with_shape(boundaries, cols),
        )
    }

    fn with_loaders(data: MockLoader, labels: MockLoader) -> Self {
        let data = Arc::new(data);
        let labels = Arc::new(labels);
        let registry = LoaderRegistry::new()
            .with_shared_data_loader(defaults::DATA_LOADER, data.clone())
            .with_shared_label_loader(defaults::LABEL_LOADER, labels.clone());

        Self {
            data,
            labels,
            resolver: ConfigResolver::new(registry),
        }
    }

    fn resolve(
        &self,
        raw: &RawConfig,
        overrides: &RawConfig,
        num_files: usize,
    ) -> Result<ResolvedConfig, ConfigError> {
        self.resolver.resolve(
            raw,
            overrides,
            &files(num_files),
            Path::new("/data/scans"),
            Path::new("/data/truth"),
        )
    }

    /// Resolves `raw` with no overrides against two files.
    fn resolve_raw(&self, raw: &RawConfig) -> Result<ResolvedConfig, ConfigError> {
        self.resolve(raw, &RawConfig::default(), 2)
    }
}

/// The realistic sample: 496 rows × 768 columns, 8 boundaries.
fn spectralis_sample() -> Harness {
    Harness::new(496, 768, 8)
}

fn files(count: usize) -> Vec<FileEntry> {
    (1..=count)
        .map(|i| FileEntry::new(format!("vol{i:02}.vol")))
        .collect()
}

mod precedence_tests;

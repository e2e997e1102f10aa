//! Identifier → loader mapping.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::{DataLoader, LabelLoader};

/// Which kind of loader an identifier refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderKind {
    /// Scan loader
    Data,
    /// Ground-truth loader
    Label,
}

impl fmt::Display for LoaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data => write!(f, "data"),
            Self::Label => write!(f, "label"),
        }
    }
}

/// Registry of loaders addressable by the identifiers used in configuration.
///
/// Lookups happen once per resolution; the chosen implementations are then
/// carried by the resolved configuration, so collectors never dispatch on
/// the identifier strings themselves.
///
/// # Example
///
/// ```
/// use layerseg_config::loader::{LoaderRegistry, TextMatrixLoader};
///
/// let registry = LoaderRegistry::new()
///     .with_data_loader("text", TextMatrixLoader)
///     .with_label_loader("text", TextMatrixLoader);
///
/// assert!(registry.data_loader("text").is_some());
/// assert!(registry.label_loader("spectralis").is_none());
/// ```
#[derive(Clone, Default)]
pub struct LoaderRegistry {
    data: HashMap<String, Arc<dyn DataLoader>>,
    labels: HashMap<String, Arc<dyn LabelLoader>>,
}

impl fmt::Debug for LoaderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut data: Vec<_> = self.data.keys().collect();
        let mut labels: Vec<_> = self.labels.keys().collect();
        data.sort();
        labels.sort();
        f.debug_struct("LoaderRegistry")
            .field("data", &data)
            .field("labels", &labels)
            .finish()
    }
}

impl LoaderRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a data loader under `name`, replacing any previous one.
    #[must_use]
    pub fn with_data_loader(
        mut self,
        name: impl Into<String>,
        loader: impl DataLoader + 'static,
    ) -> Self {
        self.data.insert(name.into(), Arc::new(loader));
        self
    }

    /// Registers a label loader under `name`, replacing any previous one.
    #[must_use]
    pub fn with_label_loader(
        mut self,
        name: impl Into<String>,
        loader: impl LabelLoader + 'static,
    ) -> Self {
        self.labels.insert(name.into(), Arc::new(loader));
        self
    }

    /// Registers an already shared data loader.
    #[must_use]
    pub fn with_shared_data_loader(
        mut self,
        name: impl Into<String>,
        loader: Arc<dyn DataLoader>,
    ) -> Self {
        self.data.insert(name.into(), loader);
        self
    }

    /// Registers an already shared label loader.
    #[must_use]
    pub fn with_shared_label_loader(
        mut self,
        name: impl Into<String>,
        loader: Arc<dyn LabelLoader>,
    ) -> Self {
        self.labels.insert(name.into(), loader);
        self
    }

    /// Looks up a data loader by identifier.
    #[must_use]
    pub fn data_loader(&self, name: &str) -> Option<Arc<dyn DataLoader>> {
        self.data.get(name).cloned()
    }

    /// Looks up a label loader by identifier.
    #[must_use]
    pub fn label_loader(&self, name: &str) -> Option<Arc<dyn LabelLoader>> {
        self.labels.get(name).cloned()
    }
}

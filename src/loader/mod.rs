//! Loader layer: the seams through which scans and ground truth are read.
//!
//! This module provides types and traits for:
//! - Loading a scan ([`DataLoader`]) and its segmentation ([`LabelLoader`])
//! - The context handed to every load call ([`LoadContext`])
//! - Selecting loaders by identifier ([`LoaderRegistry`])
//! - A plain-text matrix format for tooling and tests ([`TextMatrixLoader`])
//!
//! Decoding real device formats is left to callers; they register their own
//! implementations in a [`LoaderRegistry`] under the identifiers used in
//! configuration files.

mod error;
mod registry;
mod text;


pub use error::LoadError;
pub use registry::{LoaderKind, LoaderRegistry};
pub use text::TextMatrixLoader;

use std::path::Path;

use ndarray::Array2;

use crate::config::ClipRange;

/// One entry of the input file listing.
///
/// Only the name is read during resolution; the loaders interpret it
/// relative to the data or label directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// File name as understood by the loaders.
    pub name: String,
}

impl FileEntry {
    /// Creates a new file entry.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Context passed to every loader invocation.
#[derive(Debug, Clone, Copy)]
pub struct LoadContext<'a> {
    /// Region-of-volume label to load.
    pub label_id: i64,
    /// Column range to clip to, if the caller wants clipped data.
    pub clip_range: Option<ClipRange>,
    /// Directory holding the scans.
    pub data_dir: &'a Path,
    /// Directory holding the ground-truth segmentations.
    pub label_dir: &'a Path,
}

/// Trait for loading a single scan.
///
/// # Implementation Notes
///
/// - Must be deterministic for a fixed file name and context
/// - Returns rows × columns; columns are A-scans
/// - Errors are returned as-is to whoever triggered the load
pub trait DataLoader: Send + Sync {
    /// Loads the scan stored under `file_name`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the file cannot be read or decoded.
    fn load_data(
        &self,
        file_name: &str,
        context: &LoadContext<'_>,
    ) -> Result<Array2<f64>, LoadError>;
}

/// Trait for loading the ground-truth segmentation of a scan.
///
/// The returned matrix has one row per boundary and one column per A-scan.
pub trait LabelLoader: Send + Sync {
    /// Loads the segmentation belonging to `file_name`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the labels cannot be read or decoded.
    fn load_labels(
        &self,
        file_name: &str,
        context: &LoadContext<'_>,
    ) -> Result<Array2<f64>, LoadError>;
}

/// Mock loaders for testing.
///
/// Both mocks return a fixed result and record every call they receive.
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// A recorded loader invocation.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Call {
        pub file_name: String,
        pub label_id: i64,
        pub clip_range: Option<ClipRange>,
    }

    impl Call {
        fn record(file_name: &str, context: &LoadContext<'_>) -> Self {
            Self {
                file_name: file_name.to_string(),
                label_id: context.label_id,
                clip_range: context.clip_range,
            }
        }
    }

    /// Returns a zero matrix of the given shape, or a fixed error message.
    #[derive(Debug)]
    pub struct MockLoader {
        result: Result<(usize, usize), String>,
        calls: Mutex<Vec<Call>>,
    }

    impl MockLoader {
        /// Creates a mock returning a `rows` × `cols` matrix.
        #[must_use]
        pub fn with_shape(rows: usize, cols: usize) -> Self {
            Self {
                result: Ok((rows, cols)),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Creates a mock that fails every call with `message`.
        #[must_use]
        pub fn failing(message: impl Into<String>) -> Self {
            Self {
                result: Err(message.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Returns all calls received so far.
        ///
        /// # Panics
        ///
        /// Panics if the internal lock is poisoned (only in test code).
        #[must_use]
        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn respond(
            &self,
            file_name: &str,
            context: &LoadContext<'_>,
        ) -> Result<Array2<f64>, LoadError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::record(file_name, context));
            match &self.result {
                Ok((rows, cols)) => Ok(Array2::zeros((*rows, *cols))),
                Err(message) => Err(LoadError::custom(message.clone())),
            }
        }
    }

    impl DataLoader for MockLoader {
        fn load_data(
            &self,
            file_name: &str,
            context: &LoadContext<'_>,
        ) -> Result<Array2<f64>, LoadError> {
            self.respond(file_name, context)
        }
    }

    impl LabelLoader for MockLoader {
        fn load_labels(
            &self,
            file_name: &str,
            context: &LoadContext<'_>,
        ) -> Result<Array2<f64>, LoadError> {
            self.respond(file_name, context)
        }
    }
}

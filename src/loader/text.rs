//! Plain-text matrix loader.
//!
//! One matrix row per line, values separated by whitespace and/or commas.
//! Empty lines and lines starting with `#` are skipped.

use std::path::Path;

use ndarray::Array2;

use super::{DataLoader, LabelLoader, LoadContext, LoadError};

/// Loader for plain-text matrices.
///
/// Scans are read from `data_dir/<file_name>`, segmentations from
/// `label_dir/<file_name>`. The label id and clip range are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextMatrixLoader;

impl DataLoader for TextMatrixLoader {
    fn load_data(
        &self,
        file_name: &str,
        context: &LoadContext<'_>,
    ) -> Result<Array2<f64>, LoadError> {
        read_matrix(&context.data_dir.join(file_name))
    }
}

impl LabelLoader for TextMatrixLoader {
    fn load_labels(
        &self,
        file_name: &str,
        context: &LoadContext<'_>,
    ) -> Result<Array2<f64>, LoadError> {
        read_matrix(&context.label_dir.join(file_name))
    }
}

/// Reads a text matrix from `path`.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read and
/// [`LoadError::Parse`] if a value is not a number or rows differ in length.
pub fn read_matrix(path: &Path) -> Result<Array2<f64>, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_matrix(path, &content)
}

fn parse_matrix(path: &Path, content: &str) -> Result<Array2<f64>, LoadError> {
    let parse_error = |line: usize, reason: String| LoadError::Parse {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let mut values = Vec::new();
    let mut cols: Option<usize> = None;
    let mut rows = 0;

    for (index, line) in content.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let before = values.len();
        for token in trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            let value = token
                .parse::<f64>()
                .map_err(|e| parse_error(line_no, format!("'{token}': {e}")))?;
            values.push(value);
        }

        let width = values.len() - before;
        match cols {
            None => cols = Some(width),
            Some(expected) if expected != width => {
                return Err(parse_error(
                    line_no,
                    format!("expected {expected} values, found {width}"),
                ));
            }
            Some(_) => {}
        }
        rows += 1;
    }

    let cols = cols.unwrap_or(0);
    Array2::from_shape_vec((rows, cols), values)
        .map_err(|e| parse_error(content.lines().count(), e.to_string()))
}

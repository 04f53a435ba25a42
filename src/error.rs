use std::path::PathBuf;

use thiserror::Error;

/// Errors from matrix file parsing and shape checks.
#[derive(Error, Debug)]
pub enum MatrixError {
    #[error("failed to read matrix file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("missing or malformed dimension header in {0}")]
    BadDimensions(PathBuf),

    #[error("invalid matrix element at row {row}, column {col} in {path}")]
    BadElement {
        path: PathBuf,
        row: usize,
        col: usize,
    },

    #[error("matrix file {path} ends after {got} of {expected} elements")]
    TruncatedData {
        path: PathBuf,
        got: usize,
        expected: usize,
    },

    #[error("incompatible matrix dimensions for multiplication: {lhs_rows}x{lhs_cols} * {rhs_rows}x{rhs_cols}")]
    DimensionMismatch {
        lhs_rows: usize,
        lhs_cols: usize,
        rhs_rows: usize,
        rhs_cols: usize,
    },
}

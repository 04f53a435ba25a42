use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use rand::Rng;
use tracing::warn;

use crate::error::MatrixError;

/// Dense row-major matrix of `f64` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Matrix { rows, cols, data }
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Generate a matrix of random non-negative integer values below `max_value`.
    pub fn random(rows: usize, cols: usize, max_value: u32) -> Self {
        let mut rng = rand::thread_rng();
        let data = (0..rows * cols)
            .map(|_| f64::from(rng.gen_range(0..max_value)))
            .collect();
        Matrix { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Read a matrix from a text file: a `rows cols` header line followed by
    /// whitespace-separated values (row breaks are cosmetic).
    pub fn from_file(path: &Path) -> Result<Self, MatrixError> {
        let contents = fs::read_to_string(path).map_err(|source| MatrixError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut tokens = contents.split_ascii_whitespace();

        let rows: usize = tokens
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| MatrixError::BadDimensions(path.to_path_buf()))?;
        let cols: usize = tokens
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| MatrixError::BadDimensions(path.to_path_buf()))?;

        let expected = rows * cols;
        let mut data = Vec::with_capacity(expected);
        for index in 0..expected {
            let token = tokens.next().ok_or_else(|| MatrixError::TruncatedData {
                path: path.to_path_buf(),
                got: index,
                expected,
            })?;
            let value = token.parse().map_err(|_| MatrixError::BadElement {
                path: path.to_path_buf(),
                row: index / cols,
                col: index % cols,
            })?;
            data.push(value);
        }

        Ok(Matrix { rows, cols, data })
    }

    /// Write the matrix in the same text format `from_file` reads.
    pub fn to_file(&self, path: &Path) -> Result<(), MatrixError> {
        let mut out = String::new();
        let _ = writeln!(out, "{} {}", self.rows, self.cols);
        for row in self.data.chunks(self.cols.max(1)) {
            for value in row {
                let _ = write!(out, "{value:.6} ");
            }
            out.push('\n');
        }
        fs::write(path, out).map_err(|source| MatrixError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn check_compatible(&self, other: &Matrix) -> Result<(), MatrixError> {
        if self.cols != other.rows {
            return Err(MatrixError::DimensionMismatch {
                lhs_rows: self.rows,
                lhs_cols: self.cols,
                rhs_rows: other.rows,
                rhs_cols: other.cols,
            });
        }
        Ok(())
    }

    /// Sequential multiplication.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        self.check_compatible(other)?;
        let mut product = Matrix::zeros(self.rows, other.cols);
        multiply_rows(self, other, &mut product.data, 0);
        Ok(product)
    }

    /// Multiplication with output rows partitioned across `workers` scoped
    /// threads. The first `rows % workers` partitions get one extra row.
    /// Per-element operation order matches `multiply`, so the results are
    /// identical bit for bit.
    pub fn multiply_parallel(&self, other: &Matrix, workers: usize) -> Result<Matrix, MatrixError> {
        self.check_compatible(other)?;

        let rows = self.rows;
        let out_cols = other.cols;
        let mut product = Matrix::zeros(rows, out_cols);
        if rows == 0 {
            return Ok(product);
        }

        let mut workers = workers.max(1);
        if workers > rows {
            warn!(workers, rows, "more workers than rows, clamping");
            workers = rows;
        }

        let rows_per_worker = rows / workers;
        let extra_rows = rows % workers;

        std::thread::scope(|scope| {
            let mut rest = product.data.as_mut_slice();
            let mut first_row = 0;
            for index in 0..workers {
                let take = rows_per_worker + usize::from(index < extra_rows);
                let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(take * out_cols);
                rest = tail;

                let start = first_row;
                scope.spawn(move || multiply_rows(self, other, chunk, start));
                first_row += take;
            }
        });

        Ok(product)
    }
}

/// Compute output rows `first_row..first_row + out.len() / b.cols` of `a * b`
/// into `out`.
fn multiply_rows(a: &Matrix, b: &Matrix, out: &mut [f64], first_row: usize) {
    let inner = a.cols;
    let out_cols = b.cols;
    for (offset, out_row) in out.chunks_mut(out_cols).enumerate() {
        let row = first_row + offset;
        for (col, slot) in out_row.iter_mut().enumerate() {
            let mut acc = 0.0;
            for k in 0..inner {
                acc += a.data[row * inner + k] * b.data[k * out_cols + col];
            }
            *slot = acc;
        }
    }
}

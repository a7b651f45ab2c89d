use crate::math::RealNumber;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SparseError {
    #[error("indptr length {found} != ncols + 1 ({expected})")]
    IndptrLength { found: usize, expected: usize },
    #[error("indices length {indices} != data length {data}")]
    IndicesData { indices: usize, data: usize },
    #[error("indptr is not monotonically nondecreasing at column {col}")]
    IndptrOrder { col: usize },
    #[error("row index {row} out of range for {nrows} rows")]
    RowOutOfRange { row: usize, nrows: usize },
    #[error("matrix contains a non-finite entry")]
    NonFinite,
}

/// Compressed sparse column matrix with owned storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CscMatrix<T> {
    pub nrows: usize,
    pub ncols: usize,
    pub indptr: Vec<usize>,
    pub indices: Vec<usize>,
    pub data: Vec<T>,
}

impl<T> CscMatrix<T>
where
    T: RealNumber,
{
    /// All-zero matrix with the given shape (no stored entries).
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            nrows,
            ncols,
            indptr: vec![0; ncols + 1],
            indices: Vec::new(),
            data: Vec::new(),
        }
    }

    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    pub fn validate(&self) -> Result<(), SparseError> {
        if self.indptr.len() != self.ncols + 1 {
            return Err(SparseError::IndptrLength {
                found: self.indptr.len(),
                expected: self.ncols + 1,
            });
        }
        if self.indices.len() != self.data.len() {
            return Err(SparseError::IndicesData {
                indices: self.indices.len(),
                data: self.data.len(),
            });
        }
        for col in 0..self.ncols {
            if self.indptr[col] > self.indptr[col + 1] || self.indptr[col + 1] > self.indices.len()
            {
                return Err(SparseError::IndptrOrder { col });
            }
        }
        for &row in &self.indices {
            if row >= self.nrows {
                return Err(SparseError::RowOutOfRange {
                    row,
                    nrows: self.nrows,
                });
            }
        }
        if self.data.iter().any(|value| !value.is_finite()) {
            return Err(SparseError::NonFinite);
        }
        Ok(())
    }

    /// Extracts the upper triangle (entries with row ≤ col), the canonical
    /// storage for symmetric cost matrices.
    pub fn to_upper_triangular(&self) -> Self {
        let mut indptr = Vec::with_capacity(self.ncols + 1);
        let mut indices = Vec::new();
        let mut data = Vec::new();
        indptr.push(0);
        for col in 0..self.ncols {
            for idx in self.indptr[col]..self.indptr[col + 1] {
                let row = self.indices[idx];
                if row <= col {
                    indices.push(row);
                    data.push(self.data[idx]);
                }
            }
            indptr.push(indices.len());
        }
        Self {
            nrows: self.nrows,
            ncols: self.ncols,
            indptr,
            indices,
            data,
        }
    }

    /// `out = self · x`.
    pub fn mat_vec(&self, x: &[T], out: &mut [T]) {
        assert_eq!(x.len(), self.ncols);
        assert_eq!(out.len(), self.nrows);
        out.fill(T::zero());
        for col in 0..self.ncols {
            let xj = x[col];
            for idx in self.indptr[col]..self.indptr[col + 1] {
                out[self.indices[idx]] += self.data[idx] * xj;
            }
        }
    }

    /// `out = selfᵀ · y`.
    pub fn mat_tvec(&self, y: &[T], out: &mut [T]) {
        assert_eq!(y.len(), self.nrows);
        assert_eq!(out.len(), self.ncols);
        for col in 0..self.ncols {
            let mut acc = T::zero();
            for idx in self.indptr[col]..self.indptr[col + 1] {
                acc += self.data[idx] * y[self.indices[idx]];
            }
            out[col] = acc;
        }
    }

    /// `out = self · x` for a symmetric matrix stored as its upper triangle.
    pub fn symv_upper(&self, x: &[T], out: &mut [T]) {
        assert_eq!(self.nrows, self.ncols);
        assert_eq!(x.len(), self.ncols);
        assert_eq!(out.len(), self.nrows);
        out.fill(T::zero());
        for col in 0..self.ncols {
            for idx in self.indptr[col]..self.indptr[col + 1] {
                let row = self.indices[idx];
                let value = self.data[idx];
                out[row] += value * x[col];
                if row != col {
                    out[col] += value * x[row];
                }
            }
        }
    }

    /// `xᵀ · self · x` for a symmetric matrix stored as its upper triangle.
    pub fn quad_form(&self, x: &[T]) -> T {
        assert_eq!(self.nrows, self.ncols);
        assert_eq!(x.len(), self.ncols);
        let two = T::one() + T::one();
        let mut acc = T::zero();
        for col in 0..self.ncols {
            for idx in self.indptr[col]..self.indptr[col + 1] {
                let row = self.indices[idx];
                let value = self.data[idx];
                if row == col {
                    acc += value * x[col] * x[col];
                } else {
                    acc += two * value * x[row] * x[col];
                }
            }
        }
        acc
    }

    /// `self ← diag(d) · self · diag(d)` for symmetric upper storage.
    pub fn scale_symmetric(&mut self, d: &[T]) {
        assert_eq!(d.len(), self.ncols);
        for col in 0..self.ncols {
            for idx in self.indptr[col]..self.indptr[col + 1] {
                self.data[idx] *= d[self.indices[idx]] * d[col];
            }
        }
    }

    /// `self ← diag(e) · self · diag(d)`.
    pub fn scale_rows_cols(&mut self, e: &[T], d: &[T]) {
        assert_eq!(e.len(), self.nrows);
        assert_eq!(d.len(), self.ncols);
        for col in 0..self.ncols {
            for idx in self.indptr[col]..self.indptr[col + 1] {
                self.data[idx] *= e[self.indices[idx]] * d[col];
            }
        }
    }
}

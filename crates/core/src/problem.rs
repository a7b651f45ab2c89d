use crate::math::RealNumber;
use crate::sparse::{CscMatrix, SparseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
    #[error("{field} contains a non-finite entry")]
    NonFinite { field: &'static str },
    #[error("lower bound exceeds upper bound at row {row}")]
    InconsistentBounds { row: usize },
    #[error("cost matrix: {0}")]
    CostMatrix(#[source] SparseError),
    #[error("constraint matrix: {0}")]
    ConstraintMatrix(#[source] SparseError),
}

/// Problem data for
///
/// ```text
/// minimize    (1/2) xᵀ P x + qᵀ x
/// subject to  l ≤ A x ≤ u
/// ```
///
/// `p` is symmetric positive semidefinite; any entries below the diagonal
/// are dropped at setup. Bounds may be ±∞ but never NaN.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemData<T> {
    pub n: usize,
    pub m: usize,
    pub p: CscMatrix<T>,
    pub q: Vec<T>,
    pub a: CscMatrix<T>,
    pub l: Vec<T>,
    pub u: Vec<T>,
}

impl<T> ProblemData<T>
where
    T: RealNumber,
{
    pub fn validate(&self) -> Result<(), DataError> {
        if self.n == 0 {
            return Err(DataError::DimensionMismatch(
                "problem must have at least one variable".into(),
            ));
        }
        self.p.validate().map_err(DataError::CostMatrix)?;
        if self.p.nrows != self.n || self.p.ncols != self.n {
            return Err(DataError::DimensionMismatch(format!(
                "cost matrix is {}x{}, expected {n}x{n}",
                self.p.nrows,
                self.p.ncols,
                n = self.n
            )));
        }
        if self.q.len() != self.n {
            return Err(DataError::DimensionMismatch(format!(
                "linear cost length {} != n ({})",
                self.q.len(),
                self.n
            )));
        }
        if self.q.iter().any(|value| !value.is_finite()) {
            return Err(DataError::NonFinite { field: "q" });
        }
        self.a.validate().map_err(DataError::ConstraintMatrix)?;
        if self.a.nrows != self.m || self.a.ncols != self.n {
            return Err(DataError::DimensionMismatch(format!(
                "constraint matrix is {}x{}, expected {}x{}",
                self.a.nrows, self.a.ncols, self.m, self.n
            )));
        }
        if self.l.len() != self.m || self.u.len() != self.m {
            return Err(DataError::DimensionMismatch(format!(
                "bound lengths {} / {} != m ({})",
                self.l.len(),
                self.u.len(),
                self.m
            )));
        }
        if self.l.iter().chain(self.u.iter()).any(|value| value.is_nan()) {
            return Err(DataError::NonFinite { field: "bounds" });
        }
        for (row, (lo, hi)) in self.l.iter().zip(self.u.iter()).enumerate() {
            if lo > hi {
                return Err(DataError::InconsistentBounds { row });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Scalar;

    fn diagonal(n: usize, value: Scalar) -> CscMatrix<Scalar> {
        let mut indptr = Vec::with_capacity(n + 1);
        let mut indices = Vec::with_capacity(n);
        let mut data = Vec::with_capacity(n);
        indptr.push(0);
        for i in 0..n {
            indices.push(i);
            data.push(value);
            indptr.push(indices.len());
        }
        CscMatrix {
            nrows: n,
            ncols: n,
            indptr,
            indices,
            data,
        }
    }

    fn sample() -> ProblemData<Scalar> {
        ProblemData {
            n: 2,
            m: 1,
            p: diagonal(2, 2.0),
            q: vec![-1.0, -1.0],
            a: CscMatrix {
                nrows: 1,
                ncols: 2,
                indptr: vec![0, 1, 2],
                indices: vec![0, 0],
                data: vec![1.0, 1.0],
            },
            l: vec![0.0],
            u: vec![1.0],
        }
    }

    #[test]
    fn validation_passes_for_consistent_data() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn validation_accepts_infinite_bounds() {
        let mut data = sample();
        data.l[0] = Scalar::NEG_INFINITY;
        data.u[0] = Scalar::INFINITY;
        assert!(data.validate().is_ok());
    }

    #[test]
    fn validation_rejects_crossed_bounds() {
        let mut data = sample();
        data.l[0] = 2.0;
        assert!(matches!(
            data.validate(),
            Err(DataError::InconsistentBounds { row: 0 })
        ));
    }

    #[test]
    fn validation_rejects_nan_cost() {
        let mut data = sample();
        data.q[1] = Scalar::NAN;
        assert!(matches!(
            data.validate(),
            Err(DataError::NonFinite { field: "q" })
        ));
    }

    #[test]
    fn validation_rejects_empty_problem() {
        let mut data = sample();
        data.n = 0;
        assert!(data.validate().is_err());
    }

    #[test]
    fn validation_rejects_shape_mismatch() {
        let mut data = sample();
        data.q.push(0.0);
        assert!(matches!(
            data.validate(),
            Err(DataError::DimensionMismatch(_))
        ));
    }
}

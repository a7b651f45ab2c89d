#![forbid(unsafe_code)]

use quadra_core::math::RealNumber;
use thiserror::Error;

pub use quadra_core::info::Info;
pub use quadra_core::math::{Norm, Scalar};
pub use quadra_core::problem::{DataError, ProblemData};
pub use quadra_core::settings::Settings;
pub use quadra_core::solution::{Solution, Status};
pub use quadra_core::sparse::CscMatrix;
pub use quadra_solver::{SetupError, UpdateError, Workspace};

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("problem construction failed: {0}")]
    InvalidProblem(String),
    #[error(transparent)]
    Setup(#[from] SetupError),
}

/// Assembles [`ProblemData`] for
///
/// ```text
/// minimize    (1/2) xᵀ P x + qᵀ x
/// subject to  l ≤ A x ≤ u
/// ```
///
/// `p` and `q` are required; omitting `constraints` builds an unconstrained
/// problem.
#[derive(Debug, Clone)]
pub struct QpBuilder<T: RealNumber> {
    p: Option<CscMatrix<T>>,
    q: Option<Vec<T>>,
    a: Option<CscMatrix<T>>,
    l: Option<Vec<T>>,
    u: Option<Vec<T>>,
}

impl<T> Default for QpBuilder<T>
where
    T: RealNumber,
{
    fn default() -> Self {
        Self {
            p: None,
            q: None,
            a: None,
            l: None,
            u: None,
        }
    }
}

impl<T> QpBuilder<T>
where
    T: RealNumber,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn p(mut self, matrix: CscMatrix<T>) -> Self {
        self.p = Some(matrix);
        self
    }

    pub fn q(mut self, vector: Vec<T>) -> Self {
        self.q = Some(vector);
        self
    }

    pub fn constraints(mut self, matrix: CscMatrix<T>, lower: Vec<T>, upper: Vec<T>) -> Self {
        self.a = Some(matrix);
        self.l = Some(lower);
        self.u = Some(upper);
        self
    }

    pub fn build(self) -> Result<ProblemData<T>, SolverError> {
        let p = self
            .p
            .ok_or_else(|| SolverError::InvalidProblem("quadratic cost matrix missing".into()))?;
        let q = self
            .q
            .ok_or_else(|| SolverError::InvalidProblem("linear cost vector missing".into()))?;
        let n = q.len();
        let (a, l, u) = match (self.a, self.l, self.u) {
            (Some(a), Some(l), Some(u)) => (a, l, u),
            _ => (CscMatrix::zeros(0, n), Vec::new(), Vec::new()),
        };
        let data = ProblemData {
            n,
            m: a.nrows,
            p,
            q,
            a,
            l,
            u,
        };
        data.validate()
            .map_err(|err| SolverError::InvalidProblem(err.to_string()))?;
        Ok(data)
    }
}

/// One-shot convenience: sets up a workspace, solves, and hands back the
/// published solution together with the run information.
pub fn solve_qp<T: RealNumber>(
    data: &ProblemData<T>,
    settings: &Settings<T>,
) -> Result<(Solution<T>, Info<T>), SolverError> {
    let mut workspace = Workspace::setup(data, settings)?;
    let status = workspace.solve();
    tracing::debug!(status = %status, iter = workspace.info().iter, "solve_qp finished");
    Ok((workspace.solution().clone(), workspace.info().clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn identity(n: usize) -> CscMatrix<Scalar> {
        let mut indptr = Vec::with_capacity(n + 1);
        let mut indices = Vec::with_capacity(n);
        let mut data = Vec::with_capacity(n);
        indptr.push(0);
        for i in 0..n {
            indices.push(i);
            data.push(1.0);
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

    #[test]
    fn builder_requires_cost_terms() {
        let err = QpBuilder::<Scalar>::new().q(vec![1.0]).build().unwrap_err();
        assert!(matches!(err, SolverError::InvalidProblem(_)));
    }

    #[test]
    fn builder_defaults_to_unconstrained() {
        let data = QpBuilder::new()
            .p(identity(2))
            .q(vec![0.5, -0.5])
            .build()
            .unwrap();
        assert_eq!(data.m, 0);
        assert_eq!(data.a.ncols, 2);
    }

    #[test]
    fn builder_rejects_inconsistent_shapes() {
        let err = QpBuilder::new()
            .p(identity(2))
            .q(vec![0.0, 0.0])
            .constraints(identity(2), vec![0.0], vec![1.0])
            .build()
            .unwrap_err();
        assert!(matches!(err, SolverError::InvalidProblem(_)));
    }

    #[test]
    fn one_shot_solve_returns_solution_and_info() {
        let data = QpBuilder::new()
            .p(identity(2))
            .q(vec![-1.0, 1.0])
            .constraints(identity(2), vec![0.0, 0.0], vec![2.0, 2.0])
            .build()
            .unwrap();
        let (solution, info) = solve_qp(&data, &Settings::default()).unwrap();
        assert_eq!(info.status, Status::Solved);
        assert_abs_diff_eq!(solution.x[0], 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(solution.x[1], 0.0, epsilon = 1e-3);
    }
}

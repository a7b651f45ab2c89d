use crate::math::RealNumber;
use anyhow::Result;

/// Seam between the solver and a direct linear-system backend. A backend is
/// constructed around a factorized KKT matrix; the workspace only ever asks
/// it to solve in place, so multiple factorization strategies can coexist
/// behind this trait.
pub trait KktSolve<T: RealNumber>: Send {
    /// Dimension of the factorized system.
    fn dim(&self) -> usize;

    /// Overwrites `rhs` with the solution of `K · x = rhs`.
    fn solve_in_place(&self, rhs: &mut [T]) -> Result<()>;
}

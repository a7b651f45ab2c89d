use anyhow::{anyhow, Result};
use quadra_core::math::RealNumber;

/// LDLᵀ factorization of a symmetric quasidefinite matrix, stored densely.
/// Pivots may be negative (the constraint block of a regularized KKT matrix
/// is), but never near zero.
pub struct LdlFactor<T: RealNumber> {
    dim: usize,
    lower: Vec<T>,
    diag: Vec<T>,
}

impl<T> LdlFactor<T>
where
    T: RealNumber,
{
    fn pivot_floor() -> T {
        T::from_f64(1e-12).unwrap()
    }

    /// Factorizes a dense symmetric matrix given in row-major order.
    pub fn factor(dim: usize, matrix: &[T]) -> Result<Self> {
        assert_eq!(dim * dim, matrix.len(), "matrix storage shape mismatch");
        let mut this = Self {
            dim,
            lower: vec![T::zero(); dim * dim],
            diag: vec![T::zero(); dim],
        };
        for i in 0..dim {
            *this.lower_mut(i, i) = T::one();
        }

        for j in 0..dim {
            let mut d_j = matrix[j * dim + j];
            for k in 0..j {
                let l_jk = this.lower(j, k);
                d_j -= l_jk * l_jk * this.diag[k];
            }
            if d_j.abs() <= Self::pivot_floor() {
                let magnitude = d_j.abs().to_f64().unwrap_or(f64::NAN);
                return Err(anyhow!(
                    "near-singular pivot at column {} (|d| = {:.3e})",
                    j,
                    magnitude
                ));
            }
            this.diag[j] = d_j;

            for i in (j + 1)..dim {
                let mut l_ij = matrix[i * dim + j];
                for k in 0..j {
                    l_ij -= this.lower(i, k) * this.lower(j, k) * this.diag[k];
                }
                *this.lower_mut(i, j) = l_ij / d_j;
            }
        }
        Ok(this)
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Overwrites `rhs` with the solution via forward substitution, diagonal
    /// scaling, and backward substitution.
    pub fn solve(&self, rhs: &mut [T]) -> Result<()> {
        if rhs.len() != self.dim {
            return Err(anyhow!(
                "rhs length {} does not match system dimension {}",
                rhs.len(),
                self.dim
            ));
        }
        for i in 0..self.dim {
            for j in 0..i {
                let l_ij = self.lower(i, j);
                rhs[i] = rhs[i] - l_ij * rhs[j];
            }
        }
        for i in 0..self.dim {
            rhs[i] = rhs[i] / self.diag[i];
        }
        for i in (0..self.dim).rev() {
            for j in (i + 1)..self.dim {
                let l_ji = self.lower(j, i);
                rhs[i] = rhs[i] - l_ji * rhs[j];
            }
        }
        Ok(())
    }

    fn lower(&self, row: usize, col: usize) -> T {
        self.lower[row * self.dim + col]
    }

    fn lower_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.lower[row * self.dim + col]
    }
}

use crate::ldl::LdlFactor;
use anyhow::{ensure, Result};
use quadra_core::math::RealNumber;
use quadra_core::sparse::CscMatrix;
use quadra_core::traits::KktSolve;
use sprs::{CsMat, TriMat};

/// Assembles the upper triangle of the regularized KKT matrix
///
/// ```text
/// [ P + r_top·I      Aᵀ     ]
/// [     A        r_bottom·I ]
/// ```
///
/// `p` must already be in upper-triangular storage. Duplicate triplets (the
/// diagonal regularization on top of explicit diagonal entries of P) are
/// summed during conversion.
pub fn assemble_kkt<T: RealNumber>(
    p: &CscMatrix<T>,
    a: &CscMatrix<T>,
    reg_top: T,
    reg_bottom: T,
) -> CsMat<T> {
    let n = p.ncols;
    let m = a.nrows;
    let dim = n + m;
    let mut triplets = TriMat::new((dim, dim));
    for col in 0..n {
        for idx in p.indptr[col]..p.indptr[col + 1] {
            triplets.add_triplet(p.indices[idx], col, p.data[idx]);
        }
    }
    for i in 0..n {
        triplets.add_triplet(i, i, reg_top);
    }
    for col in 0..a.ncols {
        for idx in a.indptr[col]..a.indptr[col + 1] {
            triplets.add_triplet(col, n + a.indices[idx], a.data[idx]);
        }
    }
    for i in 0..m {
        triplets.add_triplet(n + i, n + i, reg_bottom);
    }
    triplets.to_csc()
}

/// `out = K · x` for a symmetric matrix stored as its upper triangle.
pub fn sym_mat_vec<T: RealNumber>(kkt: &CsMat<T>, x: &[T], out: &mut [T]) {
    let (rows, cols) = kkt.shape();
    assert_eq!(rows, cols, "KKT matrices are square");
    assert_eq!(x.len(), cols);
    assert_eq!(out.len(), rows);
    out.fill(T::zero());
    for (col, column) in kkt.outer_iterator().enumerate() {
        for (row, &value) in column.iter() {
            out[row] += value * x[col];
            if row != col {
                out[col] += value * x[row];
            }
        }
    }
}

/// Direct backend: densifies the assembled KKT matrix and holds its LDLᵀ
/// factor for repeated in-place solves.
pub struct DirectKkt<T: RealNumber> {
    dim: usize,
    factor: LdlFactor<T>,
}

impl<T> DirectKkt<T>
where
    T: RealNumber,
{
    pub fn new(kkt: &CsMat<T>) -> Result<Self> {
        let (rows, cols) = kkt.shape();
        ensure!(rows == cols, "KKT matrix must be square, got {rows}x{cols}");
        let dense = densify_symmetric(kkt);
        let factor = LdlFactor::factor(rows, &dense)?;
        Ok(Self { dim: rows, factor })
    }
}

impl<T> KktSolve<T> for DirectKkt<T>
where
    T: RealNumber,
{
    fn dim(&self) -> usize {
        self.dim
    }

    fn solve_in_place(&self, rhs: &mut [T]) -> Result<()> {
        self.factor.solve(rhs)
    }
}

fn densify_symmetric<T: RealNumber>(kkt: &CsMat<T>) -> Vec<T> {
    let (rows, _) = kkt.shape();
    let mut dense = vec![T::zero(); rows * rows];
    for (col, column) in kkt.outer_iterator().enumerate() {
        for (row, &value) in column.iter() {
            dense[row * rows + col] = value;
            dense[col * rows + row] = value;
        }
    }
    dense
}

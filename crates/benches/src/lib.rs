#![forbid(unsafe_code)]

//! Shared problem generators for the quadra benchmarks.

use quadra_api::{CscMatrix, ProblemData, Scalar};
use rand::rngs::SmallRng;
use rand::Rng;

pub fn random_diagonal_spd(n: usize, rng: &mut SmallRng) -> CscMatrix<Scalar> {
    let mut indptr = Vec::with_capacity(n + 1);
    let mut indices = Vec::with_capacity(n);
    let mut data = Vec::with_capacity(n);
    indptr.push(0);
    for i in 0..n {
        indices.push(i);
        data.push(1.0 + rng.gen::<Scalar>());
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

pub fn random_band_constraints(m: usize, n: usize, rng: &mut SmallRng) -> CscMatrix<Scalar> {
    let mut indptr = Vec::with_capacity(n + 1);
    let mut indices = Vec::new();
    let mut data = Vec::new();
    indptr.push(0);
    for col in 0..n {
        for row in 0..m {
            if row % n == col || (row + 1) % n == col {
                indices.push(row);
                data.push(rng.gen::<Scalar>() - 0.5);
            }
        }
        indptr.push(indices.len());
    }
    CscMatrix {
        nrows: m,
        ncols: n,
        indptr,
        indices,
        data,
    }
}

pub fn random_box_qp(n: usize, m: usize, rng: &mut SmallRng) -> ProblemData<Scalar> {
    ProblemData {
        n,
        m,
        p: random_diagonal_spd(n, rng),
        q: (0..n).map(|_| rng.gen::<Scalar>() - 0.5).collect(),
        a: random_band_constraints(m, n, rng),
        l: vec![-1.0; m],
        u: vec![1.0; m],
    }
}

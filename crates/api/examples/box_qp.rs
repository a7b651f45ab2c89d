use anyhow::Result;
use quadra_api::{solve_qp, CscMatrix, QpBuilder, Scalar, Settings};

fn main() -> Result<()> {
    let p = diagonal(vec![2.0, 4.0, 6.0]);
    let q = vec![-2.0, -5.0, -3.0];
    let identity = diagonal(vec![1.0, 1.0, 1.0]);
    let problem = QpBuilder::new()
        .p(p)
        .q(q)
        .constraints(identity, vec![0.0, -1.0, 0.0], vec![1.0, 2.0, 4.0])
        .build()?;

    let (solution, info) = solve_qp(&problem, &Settings::default())?;
    println!("status: {} ({})", info.status, info.status.code());
    println!("x: {:?}", solution.x);
    println!("lambda: {:?}", solution.lambda);
    println!("objective: {:.6}", info.obj_val);
    println!("iterations: {}", info.iter);
    Ok(())
}

fn diagonal(diag: Vec<Scalar>) -> CscMatrix<Scalar> {
    let n = diag.len();
    let mut indptr = Vec::with_capacity(n + 1);
    let mut indices = Vec::with_capacity(n);
    let mut data = Vec::with_capacity(n);
    indptr.push(0);
    for (idx, value) in diag.into_iter().enumerate() {
        indices.push(idx);
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

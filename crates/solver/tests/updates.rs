use quadra_core::math::Scalar;
use quadra_core::problem::ProblemData;
use quadra_core::settings::Settings;
use quadra_core::solution::Status;
use quadra_core::sparse::CscMatrix;
use quadra_solver::{UpdateError, Workspace};

fn box_1d() -> ProblemData<Scalar> {
    ProblemData {
        n: 1,
        m: 1,
        p: CscMatrix {
            nrows: 1,
            ncols: 1,
            indptr: vec![0, 1],
            indices: vec![0],
            data: vec![2.0],
        },
        q: vec![0.0],
        a: CscMatrix {
            nrows: 1,
            ncols: 1,
            indptr: vec![0, 1],
            indices: vec![0],
            data: vec![1.0],
        },
        l: vec![1.0],
        u: vec![3.0],
    }
}

#[test]
fn crossed_bound_updates_are_rejected() {
    let mut workspace = Workspace::setup(&box_1d(), &Settings::default()).unwrap();
    assert_eq!(workspace.solve(), Status::Solved);

    assert!(matches!(
        workspace.update_lower_bound(&[5.0]),
        Err(UpdateError::BoundsInconsistent { row: 0 })
    ));
    workspace.update_lower_bound(&[1.0]).unwrap();

    assert!(matches!(
        workspace.update_upper_bound(&[0.0]),
        Err(UpdateError::BoundsInconsistent { row: 0 })
    ));
    workspace.update_upper_bound(&[3.0]).unwrap();

    assert_eq!(workspace.solve(), Status::Solved);
    assert!((workspace.solution().x[0] - 1.0).abs() < 1e-3);
}

#[test]
fn bound_updates_move_the_solution_without_refactorization() {
    let mut workspace = Workspace::setup(&box_1d(), &Settings::default()).unwrap();
    assert_eq!(workspace.solve(), Status::Solved);
    assert!((workspace.solution().x[0] - 1.0).abs() < 1e-3);

    workspace.update_lower_bound(&[2.0]).unwrap();
    assert_eq!(workspace.solve(), Status::Solved);
    assert!((workspace.solution().x[0] - 2.0).abs() < 1e-3);
}

#[test]
fn linear_cost_updates_move_the_solution() {
    let mut workspace = Workspace::setup(&box_1d(), &Settings::default()).unwrap();
    assert_eq!(workspace.solve(), Status::Solved);

    // Pull the minimizer inside the box: min x^2 - 4x has x* = 2.
    workspace.update_lin_cost(&[-4.0]).unwrap();
    assert_eq!(workspace.solve(), Status::Solved);
    assert!((workspace.solution().x[0] - 2.0).abs() < 1e-3);
    assert!(workspace.solution().lambda[0].abs() < 1e-3);
}

#[test]
fn update_lengths_are_checked() {
    let mut workspace = Workspace::setup(&box_1d(), &Settings::default()).unwrap();
    assert!(matches!(
        workspace.update_lin_cost(&[1.0, 2.0]),
        Err(UpdateError::DimensionMismatch {
            expected: 1,
            found: 2
        })
    ));
    assert!(matches!(
        workspace.update_lower_bound(&[]),
        Err(UpdateError::DimensionMismatch {
            expected: 1,
            found: 0
        })
    ));
}

#[test]
fn warm_started_resolve_finishes_in_a_few_iterations() {
    let mut settings = Settings::<Scalar>::default();
    settings.warm_start = true;
    let mut workspace = Workspace::setup(&box_1d(), &settings).unwrap();
    assert_eq!(workspace.solve(), Status::Solved);
    let first_x = workspace.solution().x[0];
    let first_iters = workspace.info().iter;

    assert_eq!(workspace.solve(), Status::Solved);
    assert!(
        workspace.info().iter < 5,
        "warm resolve took {} iterations (cold: {})",
        workspace.info().iter,
        first_iters
    );
    assert!((workspace.solution().x[0] - first_x).abs() < 1e-4);
}

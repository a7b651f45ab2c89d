use crate::report;
use crate::scaling::{scale_data, Scaling};
use quadra_core::info::Info;
use quadra_core::math::{ew_prod, RealNumber, Timer};
use quadra_core::problem::{DataError, ProblemData};
use quadra_core::settings::{Settings, SettingsError};
use quadra_core::solution::{Solution, Status};
use quadra_core::traits::KktSolve;
use quadra_linsys::{assemble_kkt, DirectKkt};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("invalid problem data: {0}")]
    InvalidData(#[from] DataError),
    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] SettingsError),
    #[error("KKT factorization failed: {0}")]
    Factorization(anyhow::Error),
}

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("lower bound exceeds upper bound at row {row}")]
    BoundsInconsistent { row: usize },
    #[error("expected a vector of length {expected}, got {found}")]
    DimensionMismatch { expected: usize, found: usize },
}

/// ADMM iterates. `x` and `z` stack the primal block (first n entries) and
/// the constraint slack (last m entries); `u` is the dual, length m.
pub(crate) struct Iterates<T> {
    pub x: Vec<T>,
    pub z: Vec<T>,
    pub z_prev: Vec<T>,
    pub u: Vec<T>,
}

/// Reusable buffers for residual evaluation, sized once at setup.
pub(crate) struct ResidualMonitor<T> {
    pub ws_n: Vec<T>,
    pub ws_m: Vec<T>,
    pub eps_pri: T,
    pub eps_dua: T,
}

/// Scratch state for the active-set polishing step.
pub(crate) struct PolishScratch<T> {
    pub ind_l: Vec<bool>,
    pub ind_u: Vec<bool>,
    /// Constraint row -> reduced row, `usize::MAX` when inactive.
    pub a2ared: Vec<usize>,
    pub x: Vec<T>,
    pub ax: Vec<T>,
    pub lambda: Vec<T>,
    pub applied: bool,
}

impl<T: RealNumber> PolishScratch<T> {
    fn new(n: usize, m: usize) -> Self {
        Self {
            ind_l: vec![false; m],
            ind_u: vec![false; m],
            a2ared: vec![usize::MAX; m],
            x: vec![T::zero(); n],
            ax: vec![T::zero(); m],
            lambda: vec![T::zero(); m],
            applied: false,
        }
    }
}

/// Owner of everything a solve needs: the (scaled) problem copy, the KKT
/// factor, iterates, scratch buffers, and published results. Dropping the
/// workspace releases all of it.
pub struct Workspace<T: RealNumber> {
    pub(crate) data: ProblemData<T>,
    pub(crate) settings: Settings<T>,
    pub(crate) scaling: Option<Scaling<T>>,
    pub(crate) kkt: Box<dyn KktSolve<T>>,
    pub(crate) iterates: Iterates<T>,
    pub(crate) monitor: ResidualMonitor<T>,
    pub(crate) pol: PolishScratch<T>,
    pub(crate) solution: Solution<T>,
    pub(crate) info: Info<T>,
}

impl<T> Workspace<T>
where
    T: RealNumber,
{
    /// Validates problem data and settings, deep-copies the problem into
    /// canonical form (P upper-triangular), equilibrates if requested, and
    /// factorizes the KKT matrix once.
    pub fn setup(data: &ProblemData<T>, settings: &Settings<T>) -> Result<Self, SetupError> {
        let timer = Timer::start();
        data.validate()?;
        settings.validate()?;

        let mut settings = settings.clone();
        if data.m == 0 {
            settings.polishing = false;
        }

        let mut data = ProblemData {
            n: data.n,
            m: data.m,
            p: data.p.to_upper_triangular(),
            q: data.q.clone(),
            a: data.a.clone(),
            l: data.l.clone(),
            u: data.u.clone(),
        };
        let scaling = (settings.scaling != 0).then(|| scale_data(&mut data, &settings));

        let kkt_matrix = assemble_kkt(
            &data.p,
            &data.a,
            settings.sigma,
            -(T::one() / settings.rho),
        );
        let kkt: Box<dyn KktSolve<T>> =
            Box::new(DirectKkt::new(&kkt_matrix).map_err(SetupError::Factorization)?);
        debug_assert_eq!(kkt.dim(), data.n + data.m);

        let n = data.n;
        let m = data.m;
        let mut workspace = Self {
            settings,
            scaling,
            kkt,
            iterates: Iterates {
                x: vec![T::zero(); n + m],
                z: vec![T::zero(); n + m],
                z_prev: vec![T::zero(); n + m],
                u: vec![T::zero(); m],
            },
            monitor: ResidualMonitor {
                ws_n: vec![T::zero(); n],
                ws_m: vec![T::zero(); m],
                eps_pri: T::zero(),
                eps_dua: T::zero(),
            },
            pol: PolishScratch::new(n, m),
            solution: Solution {
                x: vec![T::zero(); n],
                lambda: vec![T::zero(); m],
            },
            info: Info::new(),
            data,
        };
        workspace.info.setup_time = timer.elapsed();
        if workspace.settings.verbose {
            report::setup_summary(&workspace.data, &workspace.settings);
        }
        Ok(workspace)
    }

    /// Runs the ADMM loop, then optionally polishes, and publishes the
    /// solution. Non-convergence is reported through the returned status
    /// (also recorded in [`Info`]), never as an error.
    pub fn solve(&mut self) -> Status {
        let timer = Timer::start();
        self.pol.applied = false;
        if !self.settings.warm_start {
            self.cold_start();
        }

        let mut status = Status::MaxIterReached;
        for iter in 1..=self.settings.max_iter {
            let Iterates { z, z_prev, .. } = &mut self.iterates;
            z_prev.copy_from_slice(z);

            self.compute_rhs();
            if let Err(err) = self.kkt.solve_in_place(&mut self.iterates.x) {
                tracing::error!(error = %err, "linear solve failed, aborting");
                status = Status::Unsolved;
                break;
            }
            self.update_x();
            self.project_z();
            self.update_u();

            self.update_info(iter);
            if self.settings.verbose && iter % report::PRINT_INTERVAL == 0 {
                report::iteration_summary(&self.info);
            }
            if self.converged() {
                status = Status::Solved;
                break;
            }
        }
        if self.settings.verbose && self.info.iter % report::PRINT_INTERVAL != 0 {
            report::iteration_summary(&self.info);
        }
        self.info.status = status;
        self.info.solve_time = timer.elapsed();

        self.info.polish_time = Duration::ZERO;
        if self.settings.polishing && self.info.status == Status::Solved {
            let polish_timer = Timer::start();
            self.polish();
            self.info.polish_time = polish_timer.elapsed();
        }
        self.info.run_time = self.info.setup_time + self.info.solve_time + self.info.polish_time;

        self.store_solution();
        if self.settings.verbose {
            report::footer(&self.info);
        }
        self.info.status
    }

    /// Replaces the linear cost. Keeps the KKT factorization.
    pub fn update_lin_cost(&mut self, q_new: &[T]) -> Result<(), UpdateError> {
        if q_new.len() != self.data.n {
            return Err(UpdateError::DimensionMismatch {
                expected: self.data.n,
                found: q_new.len(),
            });
        }
        self.data.q.copy_from_slice(q_new);
        if let Some(scaling) = &self.scaling {
            ew_prod(&scaling.d, &mut self.data.q);
        }
        Ok(())
    }

    /// Replaces the lower bound. The new bound stays in place even when it
    /// crosses the upper bound; callers must re-update before solving.
    pub fn update_lower_bound(&mut self, l_new: &[T]) -> Result<(), UpdateError> {
        if l_new.len() != self.data.m {
            return Err(UpdateError::DimensionMismatch {
                expected: self.data.m,
                found: l_new.len(),
            });
        }
        self.data.l.copy_from_slice(l_new);
        if let Some(scaling) = &self.scaling {
            ew_prod(&scaling.e, &mut self.data.l);
        }
        for row in 0..self.data.m {
            if self.data.l[row] > self.data.u[row] {
                return Err(UpdateError::BoundsInconsistent { row });
            }
        }
        Ok(())
    }

    /// Replaces the upper bound; same contract as [`Self::update_lower_bound`].
    pub fn update_upper_bound(&mut self, u_new: &[T]) -> Result<(), UpdateError> {
        if u_new.len() != self.data.m {
            return Err(UpdateError::DimensionMismatch {
                expected: self.data.m,
                found: u_new.len(),
            });
        }
        self.data.u.copy_from_slice(u_new);
        if let Some(scaling) = &self.scaling {
            ew_prod(&scaling.e, &mut self.data.u);
        }
        for row in 0..self.data.m {
            if self.data.u[row] < self.data.l[row] {
                return Err(UpdateError::BoundsInconsistent { row });
            }
        }
        Ok(())
    }

    pub fn solution(&self) -> &Solution<T> {
        &self.solution
    }

    pub fn info(&self) -> &Info<T> {
        &self.info
    }

    pub fn settings(&self) -> &Settings<T> {
        &self.settings
    }

    /// Copies the winning iterate (polished if accepted) into the published
    /// solution, undoing equilibration.
    fn store_solution(&mut self) {
        let n = self.data.n;
        let (x_src, lambda_src): (&[T], &[T]) = if self.pol.applied {
            (&self.pol.x, &self.pol.lambda)
        } else {
            (&self.iterates.x[..n], &self.iterates.u)
        };
        match &self.scaling {
            Some(scaling) => {
                for ((out, &value), &d) in self
                    .solution
                    .x
                    .iter_mut()
                    .zip(x_src.iter())
                    .zip(scaling.d.iter())
                {
                    *out = d * value;
                }
                for ((out, &value), &e) in self
                    .solution
                    .lambda
                    .iter_mut()
                    .zip(lambda_src.iter())
                    .zip(scaling.e.iter())
                {
                    *out = e * value;
                }
            }
            None => {
                self.solution.x.copy_from_slice(x_src);
                self.solution.lambda.copy_from_slice(lambda_src);
            }
        }
    }
}

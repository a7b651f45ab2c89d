use crate::workspace::{Iterates, Workspace};
use quadra_core::math::{project_box, RealNumber};

/// One ADMM iteration, split the way the solve loop drives it:
/// RHS assembly -> KKT solve -> x update -> z projection -> dual ascent.
/// All steps operate on the scaled problem.
impl<T> Workspace<T>
where
    T: RealNumber,
{
    pub(crate) fn cold_start(&mut self) {
        let Iterates { x, z, z_prev, u } = &mut self.iterates;
        x.fill(T::zero());
        z.fill(T::zero());
        z_prev.fill(T::zero());
        u.fill(T::zero());
    }

    /// Assembles the KKT right-hand side in place into `x`:
    /// the cost block gets `σ·x − q`, the constraint block `z − u/ρ`.
    pub(crate) fn compute_rhs(&mut self) {
        let n = self.data.n;
        let sigma = self.settings.sigma;
        let rho = self.settings.rho;
        let Iterates { x, z, u, .. } = &mut self.iterates;
        for i in 0..n {
            x[i] = sigma * x[i] - self.data.q[i];
        }
        for i in 0..self.data.m {
            x[n + i] = z[n + i] - u[i] / rho;
        }
    }

    /// Over-relaxed x update. After the in-place KKT solve the constraint
    /// block of `x` holds the multiplier ν; the slack candidate A·x̃ is
    /// recovered as `z_prev + (ν − u)/ρ` before blending.
    pub(crate) fn update_x(&mut self) {
        let n = self.data.n;
        let alpha = self.settings.alpha;
        let beta = T::one() - alpha;
        let rho = self.settings.rho;
        let Iterates { x, z_prev, u, .. } = &mut self.iterates;
        for i in 0..n {
            x[i] = alpha * x[i] + beta * z_prev[i];
        }
        for i in 0..self.data.m {
            let slack = z_prev[n + i] + (x[n + i] - u[i]) / rho;
            x[n + i] = alpha * slack + beta * z_prev[n + i];
        }
    }

    /// `z` mirrors the unconstrained primal block and clamps the shifted
    /// slack block onto `[l, u]`.
    pub(crate) fn project_z(&mut self) {
        let n = self.data.n;
        let rho = self.settings.rho;
        let Iterates { x, z, u, .. } = &mut self.iterates;
        z[..n].copy_from_slice(&x[..n]);
        for i in 0..self.data.m {
            z[n + i] = x[n + i] + u[i] / rho;
        }
        project_box(&mut z[n..], &self.data.l, &self.data.u);
    }

    pub(crate) fn update_u(&mut self) {
        let n = self.data.n;
        let rho = self.settings.rho;
        let Iterates { x, z, u, .. } = &mut self.iterates;
        for i in 0..self.data.m {
            u[i] += rho * (x[n + i] - z[n + i]);
        }
    }
}

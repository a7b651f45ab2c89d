use crate::workspace::Workspace;
use quadra_core::math::{dot, RealNumber};
use quadra_core::sparse::CscMatrix;
use quadra_core::KktSolve;
use quadra_linsys::{assemble_kkt, sym_mat_vec, DirectKkt};

/// Solution polishing: guess the active set from the dual signs, solve the
/// equality-constrained reduced system with a small regularization, refine,
/// and adopt the result only when it does not regress either residual.
impl<T> Workspace<T>
where
    T: RealNumber,
{
    pub(crate) fn polish(&mut self) {
        let n = self.data.n;
        let m = self.data.m;
        let threshold = T::from_f64(1e-9).unwrap();
        self.pol.applied = false;

        let mut n_active = 0;
        for i in 0..m {
            let lower = self.iterates.u[i] < -threshold;
            let upper = self.iterates.u[i] > threshold;
            self.pol.ind_l[i] = lower;
            self.pol.ind_u[i] = upper;
            self.pol.a2ared[i] = if lower || upper {
                n_active += 1;
                n_active - 1
            } else {
                usize::MAX
            };
        }

        // Active rows of the (scaled) constraint matrix; the row order is
        // preserved, so columns stay sorted.
        let mut indptr = Vec::with_capacity(n + 1);
        let mut indices = Vec::new();
        let mut values = Vec::new();
        indptr.push(0);
        for col in 0..n {
            for idx in self.data.a.indptr[col]..self.data.a.indptr[col + 1] {
                let reduced = self.pol.a2ared[self.data.a.indices[idx]];
                if reduced != usize::MAX {
                    indices.push(reduced);
                    values.push(self.data.a.data[idx]);
                }
            }
            indptr.push(indices.len());
        }
        let a_red = CscMatrix {
            nrows: n_active,
            ncols: n,
            indptr,
            indices,
            data: values,
        };

        let mut rhs = vec![T::zero(); n + n_active];
        for i in 0..n {
            rhs[i] = -self.data.q[i];
        }
        for i in 0..m {
            let reduced = self.pol.a2ared[i];
            if reduced != usize::MAX {
                rhs[n + reduced] = if self.pol.ind_l[i] {
                    self.data.l[i]
                } else {
                    self.data.u[i]
                };
            }
        }

        let delta = self.settings.delta;
        let kkt_matrix = assemble_kkt(&self.data.p, &a_red, delta, -delta);
        let solver = match DirectKkt::new(&kkt_matrix) {
            Ok(solver) => solver,
            Err(err) => {
                tracing::warn!(error = %err, "polish factorization failed, keeping iterate");
                return;
            }
        };
        let mut sol = rhs.clone();
        if solver.solve_in_place(&mut sol).is_err() {
            return;
        }

        // Iterative refinement against the unregularized system; the
        // regularization contribution is subtracted back out of K·sol.
        let mut product = vec![T::zero(); n + n_active];
        let mut correction = vec![T::zero(); n + n_active];
        for _ in 0..self.settings.pol_refine_iter {
            sym_mat_vec(&kkt_matrix, &sol, &mut product);
            for i in 0..n + n_active {
                let reg = if i < n { delta * sol[i] } else { -delta * sol[i] };
                correction[i] = rhs[i] - (product[i] - reg);
            }
            if solver.solve_in_place(&mut correction).is_err() {
                break;
            }
            for i in 0..n + n_active {
                sol[i] += correction[i];
            }
        }

        // A reduced system aimed at an infinite bound goes non-finite here,
        // and NaN would slip through the max-based norms below.
        if sol.iter().any(|value| !value.is_finite()) {
            tracing::debug!("polish produced non-finite values, keeping iterate");
            return;
        }

        self.pol.x.copy_from_slice(&sol[..n]);
        for i in 0..m {
            let reduced = self.pol.a2ared[i];
            self.pol.lambda[i] = if reduced != usize::MAX {
                sol[n + reduced]
            } else {
                T::zero()
            };
        }
        self.data.a.mat_vec(&self.pol.x, &mut self.pol.ax);

        let (pri_res, dua_res) = self.polished_residuals();
        if pri_res <= self.info.pri_res && dua_res <= self.info.dua_res {
            self.pol.applied = true;
            self.info.pri_res = pri_res;
            self.info.dua_res = dua_res;
            self.info.obj_val = T::from_f64(0.5).unwrap() * self.data.p.quad_form(&self.pol.x)
                + dot(&self.data.q, &self.pol.x);
            tracing::debug!(active = n_active, "polish accepted");
        } else {
            tracing::debug!(active = n_active, "polish rejected, keeping iterate");
        }
    }

    /// Residuals of the polished candidate in original space. Primal
    /// infeasibility is the distance of A·x to the box; ±∞ sides contribute
    /// nothing.
    fn polished_residuals(&self) -> (T, T) {
        let n = self.data.n;
        let m = self.data.m;
        let scaling = self.scaling.as_ref();

        let mut pri_res = T::zero();
        for i in 0..m {
            let einv = match scaling {
                Some(s) => s.einv[i],
                None => T::one(),
            };
            let ax = einv * self.pol.ax[i];
            let lo = einv * self.data.l[i];
            let hi = einv * self.data.u[i];
            let below = (lo - ax).max(T::zero());
            let above = (ax - hi).max(T::zero());
            pri_res = pri_res.max(below.max(above));
        }

        let mut px = vec![T::zero(); n];
        self.data.p.symv_upper(&self.pol.x, &mut px);
        let mut aty = vec![T::zero(); n];
        self.data.a.mat_tvec(&self.pol.lambda, &mut aty);
        let mut dua_res = T::zero();
        for i in 0..n {
            let dinv = match scaling {
                Some(s) => s.dinv[i],
                None => T::one(),
            };
            dua_res = dua_res.max((dinv * (px[i] + self.data.q[i] + aty[i])).abs());
        }
        (pri_res, dua_res)
    }
}

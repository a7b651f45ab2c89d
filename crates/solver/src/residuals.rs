use crate::workspace::Workspace;
use quadra_core::math::{dot, RealNumber};

/// Residual evaluation. Iterates live in scaled space; everything reported
/// here is converted back to the original problem so the tolerances keep
/// their user-facing meaning. The conversions only ever need the scaled
/// data: x = D·x̃, A·x = E⁻¹(Ã·x̃), and r_d = D⁻¹(P̃x̃ + q̃ + Ãᵀu).
impl<T> Workspace<T>
where
    T: RealNumber,
{
    pub(crate) fn update_info(&mut self, iter: usize) {
        let n = self.data.n;
        let m = self.data.m;
        let scaling = self.scaling.as_ref();

        let x1 = &self.iterates.x[..n];
        let obj =
            T::from_f64(0.5).unwrap() * self.data.p.quad_form(x1) + dot(&self.data.q, x1);

        self.data.a.mat_vec(x1, &mut self.monitor.ws_m);
        let mut norm_ax = T::zero();
        let mut norm_z = T::zero();
        let mut pri_res = T::zero();
        for i in 0..m {
            let einv = match scaling {
                Some(s) => s.einv[i],
                None => T::one(),
            };
            let ax = einv * self.monitor.ws_m[i];
            let z = einv * self.iterates.z[n + i];
            norm_ax = norm_ax.max(ax.abs());
            norm_z = norm_z.max(z.abs());
            pri_res = pri_res.max((ax - z).abs());
        }

        self.data.p.symv_upper(x1, &mut self.monitor.ws_n);
        let mut norm_px = T::zero();
        let mut norm_q = T::zero();
        for i in 0..n {
            let dinv = match scaling {
                Some(s) => s.dinv[i],
                None => T::one(),
            };
            norm_px = norm_px.max((dinv * self.monitor.ws_n[i]).abs());
            norm_q = norm_q.max((dinv * self.data.q[i]).abs());
            self.monitor.ws_n[i] += self.data.q[i];
        }
        // Fold Ãᵀu in column by column, tracking its norm on the fly so no
        // second n-sized buffer is needed.
        let a = &self.data.a;
        let mut norm_aty = T::zero();
        for col in 0..n {
            let mut acc = T::zero();
            for idx in a.indptr[col]..a.indptr[col + 1] {
                acc += a.data[idx] * self.iterates.u[a.indices[idx]];
            }
            let dinv = match scaling {
                Some(s) => s.dinv[col],
                None => T::one(),
            };
            norm_aty = norm_aty.max((dinv * acc).abs());
            self.monitor.ws_n[col] += acc;
        }
        let mut dua_res = T::zero();
        for i in 0..n {
            let dinv = match scaling {
                Some(s) => s.dinv[i],
                None => T::one(),
            };
            dua_res = dua_res.max((dinv * self.monitor.ws_n[i]).abs());
        }

        let eps_abs = self.settings.eps_abs;
        let eps_rel = self.settings.eps_rel;
        self.monitor.eps_pri = eps_abs + eps_rel * norm_ax.max(norm_z);
        self.monitor.eps_dua = eps_abs + eps_rel * norm_px.max(norm_aty).max(norm_q);

        self.info.iter = iter;
        self.info.obj_val = obj;
        self.info.pri_res = pri_res;
        self.info.dua_res = dua_res;
    }

    pub(crate) fn converged(&self) -> bool {
        self.info.pri_res <= self.monitor.eps_pri && self.info.dua_res <= self.monitor.eps_dua
    }
}

use quadra_core::info::Info;
use quadra_core::math::RealNumber;
use quadra_core::problem::ProblemData;
use quadra_core::settings::Settings;

/// Iterations between verbose progress lines.
pub(crate) const PRINT_INTERVAL: usize = 25;

pub(crate) fn setup_summary<T: RealNumber>(data: &ProblemData<T>, settings: &Settings<T>) {
    tracing::info!(
        n = data.n,
        m = data.m,
        nnz_p = data.p.nnz(),
        nnz_a = data.a.nnz(),
        rho = as_f64(settings.rho),
        sigma = as_f64(settings.sigma),
        alpha = as_f64(settings.alpha),
        scaling = settings.scaling != 0,
        polishing = settings.polishing,
        "workspace set up"
    );
}

pub(crate) fn iteration_summary<T: RealNumber>(info: &Info<T>) {
    tracing::info!(
        iter = info.iter,
        obj = as_f64(info.obj_val),
        pri_res = as_f64(info.pri_res),
        dua_res = as_f64(info.dua_res),
        "iteration"
    );
}

pub(crate) fn footer<T: RealNumber>(info: &Info<T>) {
    tracing::info!(
        status = %info.status,
        iter = info.iter,
        obj = as_f64(info.obj_val),
        pri_res = as_f64(info.pri_res),
        dua_res = as_f64(info.dua_res),
        solve_ms = info.solve_time.as_secs_f64() * 1e3,
        polish_ms = info.polish_time.as_secs_f64() * 1e3,
        run_ms = info.run_time.as_secs_f64() * 1e3,
        "solve finished"
    );
}

fn as_f64<T: RealNumber>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

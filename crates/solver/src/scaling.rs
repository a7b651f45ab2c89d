use itertools::izip;
use quadra_core::math::RealNumber;
use quadra_core::problem::ProblemData;
use quadra_core::settings::Settings;

/// Diagonal equilibration factors. The solver operates on
/// P̃ = DPD, q̃ = Dq, Ã = EAD, l̃ = El, ũ = Eu and converts back through the
/// stored inverses at publication time.
pub struct Scaling<T> {
    pub d: Vec<T>,
    pub dinv: Vec<T>,
    pub e: Vec<T>,
    pub einv: Vec<T>,
}

/// Ruiz equilibration of the stacked matrix [P Aᵀ; A 0], applied in place
/// to the problem copy. Each pass measures the selected norm of every
/// variable column (P contributes symmetrically) and every constraint row,
/// then rescales by the inverse square root, zero norms excepted.
pub(crate) fn scale_data<T>(data: &mut ProblemData<T>, settings: &Settings<T>) -> Scaling<T>
where
    T: RealNumber,
{
    let n = data.n;
    let m = data.m;
    let norm = settings.scaling_norm;
    let mut d = vec![T::one(); n];
    let mut e = vec![T::one(); m];
    let mut col_acc = vec![T::zero(); n];
    let mut row_acc = vec![T::zero(); m];

    for _ in 0..settings.scaling_iter {
        col_acc.fill(T::zero());
        row_acc.fill(T::zero());
        for col in 0..n {
            for idx in data.p.indptr[col]..data.p.indptr[col + 1] {
                let row = data.p.indices[idx];
                let value = data.p.data[idx];
                col_acc[col] = norm.accumulate(col_acc[col], value);
                if row != col {
                    col_acc[row] = norm.accumulate(col_acc[row], value);
                }
            }
        }
        for col in 0..n {
            for idx in data.a.indptr[col]..data.a.indptr[col + 1] {
                let row = data.a.indices[idx];
                let value = data.a.data[idx];
                col_acc[col] = norm.accumulate(col_acc[col], value);
                row_acc[row] = norm.accumulate(row_acc[row], value);
            }
        }
        let delta_d: Vec<T> = col_acc
            .iter()
            .map(|&acc| inv_sqrt_guarded(norm.finish(acc)))
            .collect();
        let delta_e: Vec<T> = row_acc
            .iter()
            .map(|&acc| inv_sqrt_guarded(norm.finish(acc)))
            .collect();

        data.p.scale_symmetric(&delta_d);
        data.a.scale_rows_cols(&delta_e, &delta_d);
        for (value, &factor) in izip!(&mut data.q, &delta_d) {
            *value *= factor;
        }
        for (lo, hi, &factor) in izip!(&mut data.l, &mut data.u, &delta_e) {
            *lo *= factor;
            *hi *= factor;
        }
        for (total, &factor) in izip!(&mut d, &delta_d) {
            *total *= factor;
        }
        for (total, &factor) in izip!(&mut e, &delta_e) {
            *total *= factor;
        }
    }

    let dinv = d.iter().map(|&value| T::one() / value).collect();
    let einv = e.iter().map(|&value| T::one() / value).collect();
    Scaling { d, dinv, e, einv }
}

fn inv_sqrt_guarded<T: RealNumber>(norm_value: T) -> T {
    if norm_value > T::zero() {
        T::one() / norm_value.sqrt()
    } else {
        T::one()
    }
}

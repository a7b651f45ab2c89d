use crate::math::{Norm, RealNumber};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{name} must be strictly positive")]
    NotPositive { name: &'static str },
    #[error("{name} must be nonnegative")]
    Negative { name: &'static str },
    #[error("alpha must lie strictly between 0 and 2")]
    AlphaOutOfRange,
    #[error("max_iter must be at least 1")]
    ZeroMaxIter,
    #[error("scaling_iter must be at least 1")]
    ZeroScalingIter,
}

/// Solver knobs. Fixed once a workspace is set up; a fresh setup is needed
/// to change them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings<T: RealNumber> {
    /// Constraint penalty (ρ).
    pub rho: T,
    /// Cost regularization on the primal block (σ).
    pub sigma: T,
    /// Over-relaxation parameter, in (0, 2). 1 disables.
    pub alpha: T,
    pub max_iter: usize,
    pub eps_abs: T,
    pub eps_rel: T,
    /// 0 disables equilibration.
    pub scaling: u32,
    pub scaling_norm: Norm,
    pub scaling_iter: usize,
    pub polishing: bool,
    pub pol_refine_iter: usize,
    /// Regularization used by the polish system (δ).
    pub delta: T,
    pub verbose: bool,
    pub warm_start: bool,
}

impl<T> Settings<T>
where
    T: RealNumber,
{
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.rho <= T::zero() {
            return Err(SettingsError::NotPositive { name: "rho" });
        }
        if self.sigma <= T::zero() {
            return Err(SettingsError::NotPositive { name: "sigma" });
        }
        let two = T::one() + T::one();
        if self.alpha <= T::zero() || self.alpha >= two {
            return Err(SettingsError::AlphaOutOfRange);
        }
        if self.max_iter == 0 {
            return Err(SettingsError::ZeroMaxIter);
        }
        if self.eps_abs < T::zero() {
            return Err(SettingsError::Negative { name: "eps_abs" });
        }
        if self.eps_rel < T::zero() {
            return Err(SettingsError::Negative { name: "eps_rel" });
        }
        if self.scaling != 0 && self.scaling_iter == 0 {
            return Err(SettingsError::ZeroScalingIter);
        }
        if self.delta <= T::zero() {
            return Err(SettingsError::NotPositive { name: "delta" });
        }
        Ok(())
    }
}

impl<T> Default for Settings<T>
where
    T: RealNumber,
{
    fn default() -> Self {
        Self {
            rho: T::from_f64(1.6).unwrap(),
            sigma: T::from_f64(0.1).unwrap(),
            alpha: T::from_f64(1.6).unwrap(),
            max_iter: 2500,
            eps_abs: T::from_f64(1e-5).unwrap(),
            eps_rel: T::from_f64(1e-5).unwrap(),
            scaling: 1,
            scaling_norm: Norm::Inf,
            scaling_iter: 3,
            polishing: true,
            pol_refine_iter: 3,
            delta: T::from_f64(1e-7).unwrap(),
            verbose: false,
            warm_start: false,
        }
    }
}

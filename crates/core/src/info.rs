use crate::math::RealNumber;
use crate::solution::Status;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Solver-owned run information, refreshed on every solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info<T: RealNumber> {
    /// Iterations taken by the most recent solve.
    pub iter: usize,
    pub status: Status,
    pub obj_val: T,
    pub pri_res: T,
    pub dua_res: T,
    pub setup_time: Duration,
    pub solve_time: Duration,
    pub polish_time: Duration,
    pub run_time: Duration,
}

impl<T> Info<T>
where
    T: RealNumber,
{
    pub fn new() -> Self {
        Self {
            iter: 0,
            status: Status::Unsolved,
            obj_val: T::zero(),
            pri_res: T::zero(),
            dua_res: T::zero(),
            setup_time: Duration::ZERO,
            solve_time: Duration::ZERO,
            polish_time: Duration::ZERO,
            run_time: Duration::ZERO,
        }
    }
}

impl<T> Default for Info<T>
where
    T: RealNumber,
{
    fn default() -> Self {
        Self::new()
    }
}

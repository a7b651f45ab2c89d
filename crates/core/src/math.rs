use num_traits::{Float as NumFloat, FromPrimitive};
use serde::{Deserialize, Serialize};
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};
use std::time::{Duration, Instant};

pub trait RealNumber:
    NumFloat + FromPrimitive + Send + Sync + AddAssign + SubAssign + MulAssign + DivAssign + 'static
{
}

impl<T> RealNumber for T where
    T: NumFloat
        + FromPrimitive
        + Send
        + Sync
        + AddAssign
        + SubAssign
        + MulAssign
        + DivAssign
        + 'static
{
}

#[cfg(not(feature = "f32"))]
pub type Scalar = f64;

#[cfg(feature = "f32")]
pub type Scalar = f32;

pub fn dot<T: RealNumber>(lhs: &[T], rhs: &[T]) -> T {
    assert_eq!(lhs.len(), rhs.len(), "dot product dimension mismatch");
    lhs.iter()
        .zip(rhs.iter())
        .fold(T::zero(), |acc, (a, b)| acc + (*a) * (*b))
}

pub fn norm_inf<T: RealNumber>(data: &[T]) -> T {
    data.iter()
        .copied()
        .map(|v| v.abs())
        .fold(T::zero(), |acc, value| acc.max(value))
}

pub fn norm_one<T: RealNumber>(data: &[T]) -> T {
    data.iter()
        .copied()
        .fold(T::zero(), |acc, value| acc + value.abs())
}

pub fn axpy<T: RealNumber>(alpha: T, x: &[T], y: &mut [T]) {
    assert_eq!(x.len(), y.len(), "axpy dimension mismatch");
    for (xi, yi) in x.iter().zip(y.iter_mut()) {
        *yi += alpha * (*xi);
    }
}

pub fn ew_prod<T: RealNumber>(scale: &[T], data: &mut [T]) {
    assert_eq!(scale.len(), data.len(), "elementwise product dimension mismatch");
    for (value, &factor) in data.iter_mut().zip(scale.iter()) {
        *value *= factor;
    }
}

/// Clamps each entry to `[lower, upper]`. Infinite bounds leave the
/// corresponding side untouched, so the projection never substitutes a
/// large finite surrogate for ±∞.
pub fn project_box<T: RealNumber>(x: &mut [T], lower: &[T], upper: &[T]) {
    assert_eq!(x.len(), lower.len());
    assert_eq!(x.len(), upper.len());
    for ((xi, lo), hi) in x.iter_mut().zip(lower.iter()).zip(upper.iter()) {
        *xi = xi.max(*lo).min(*hi);
    }
}

/// Vector norm selector used by the equilibration routine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Norm {
    One,
    Two,
    Inf,
}

impl Norm {
    /// Folds one magnitude into a running accumulator.
    pub fn accumulate<T: RealNumber>(self, acc: T, value: T) -> T {
        let magnitude = value.abs();
        match self {
            Norm::One => acc + magnitude,
            Norm::Two => acc + magnitude * magnitude,
            Norm::Inf => acc.max(magnitude),
        }
    }

    /// Turns a finished accumulator into the norm value.
    pub fn finish<T: RealNumber>(self, acc: T) -> T {
        match self {
            Norm::Two => acc.sqrt(),
            Norm::One | Norm::Inf => acc,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Timer {
    start: Instant,
    elapsed: Duration,
    running: bool,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
            elapsed: Duration::ZERO,
            running: true,
        }
    }

    pub fn stop(&mut self) {
        if self.running {
            self.elapsed += self.start.elapsed();
            self.running = false;
        }
    }

    pub fn resume(&mut self) {
        if !self.running {
            self.start = Instant::now();
            self.running = true;
        }
    }

    pub fn elapsed(&self) -> Duration {
        if self.running {
            self.elapsed + self.start.elapsed()
        } else {
            self.elapsed
        }
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::start()
    }
}

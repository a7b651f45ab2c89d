#![forbid(unsafe_code)]

mod admm;
mod polish;
mod report;
mod residuals;
pub mod scaling;
pub mod workspace;

pub use scaling::Scaling;
pub use workspace::{SetupError, UpdateError, Workspace};

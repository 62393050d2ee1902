//! Core data primitives (Matrix, Trajectory).
//!
//! Trajectories are the unit of cross-validation; a `Matrix` holds their
//! frames.

mod matrix;
mod trajectory;

pub use matrix::Matrix;
pub use trajectory::{check_consistent_features, Trajectory};

//! Trajectory type: one independent, time-ordered run of frames.

use serde::{Deserialize, Serialize};

use super::Matrix;
use crate::error::{Result, SelectError};

/// An ordered sequence of frames from one independent simulation run.
///
/// Cross-validation treats a trajectory as an indivisible unit: folds are
/// built from whole trajectories and never from spliced frames.
///
/// # Examples
///
/// ```
/// use msm_select::primitives::{Matrix, Trajectory};
///
/// let frames = Matrix::from_vec(3, 2, vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5]).expect("3x2");
/// let traj = Trajectory::new(frames).with_id("run-0");
/// assert_eq!(traj.n_frames(), 3);
/// assert_eq!(traj.n_features(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    frames: Matrix<f32>,
}

impl Trajectory {
    /// Creates an anonymous trajectory from a frame matrix.
    #[must_use]
    pub fn new(frames: Matrix<f32>) -> Self {
        Self { id: None, frames }
    }

    /// Creates a single-feature trajectory from a time series.
    #[must_use]
    pub fn from_series(values: &[f32]) -> Self {
        Self::new(Matrix::from_column(values.to_vec()))
    }

    /// Attaches an identifier (file name, run label).
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Returns the identifier, if any.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the frame matrix.
    #[must_use]
    pub fn frames(&self) -> &Matrix<f32> {
        &self.frames
    }

    /// Number of frames (time steps).
    #[must_use]
    pub fn n_frames(&self) -> usize {
        self.frames.n_rows()
    }

    /// Number of features per frame.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.frames.n_cols()
    }

    /// True when the trajectory has no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n_frames() == 0
    }

    /// Returns a copy keeping every `stride`-th frame.
    ///
    /// # Errors
    ///
    /// Returns an error if `stride` is zero.
    pub fn subsample(&self, stride: usize) -> Result<Self> {
        let frames =
            self.frames
                .every_nth_row(stride)
                .map_err(|_| SelectError::InvalidHyperparameter {
                    param: "stride".to_string(),
                    value: stride.to_string(),
                    constraint: ">= 1".to_string(),
                })?;
        Ok(Self {
            id: self.id.clone(),
            frames,
        })
    }
}

/// Checks that every trajectory has the same feature count.
///
/// # Errors
///
/// Returns `DimensionMismatch` naming the first offending trajectory.
pub fn check_consistent_features(trajectories: &[Trajectory]) -> Result<usize> {
    let Some(first) = trajectories.first() else {
        return Ok(0);
    };
    let n_features = first.n_features();
    for (i, traj) in trajectories.iter().enumerate() {
        if traj.n_features() != n_features {
            return Err(SelectError::DimensionMismatch {
                expected: format!("{n_features} features"),
                actual: format!("{} features in trajectory {i}", traj.n_features()),
            });
        }
    }
    Ok(n_features)
}

//! Trajectory sources.
//!
//! A source yields the full set of independent trajectories for a sweep,
//! optionally subsampled in time with a frame stride.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, SelectError};
use crate::primitives::{check_consistent_features, Trajectory};

/// Produces the trajectories a sweep runs over.
pub trait TrajectorySource {
    /// Loads every trajectory, keeping every `stride`-th frame.
    ///
    /// # Errors
    ///
    /// `InvalidHyperparameter` for a zero stride, `DimensionMismatch` when
    /// trajectories disagree on feature count, or I/O and parse errors.
    fn load(&self, stride: usize) -> Result<Vec<Trajectory>>;
}

fn check_stride(stride: usize) -> Result<()> {
    if stride == 0 {
        return Err(SelectError::InvalidHyperparameter {
            param: "stride".to_string(),
            value: stride.to_string(),
            constraint: ">= 1".to_string(),
        });
    }
    Ok(())
}

fn strided(trajectories: &[Trajectory], stride: usize) -> Result<Vec<Trajectory>> {
    check_stride(stride)?;
    check_consistent_features(trajectories)?;
    if stride == 1 {
        return Ok(trajectories.to_vec());
    }
    trajectories.iter().map(|t| t.subsample(stride)).collect()
}

/// Trajectories already held in memory.
///
/// # Examples
///
/// ```
/// use msm_select::primitives::Trajectory;
/// use msm_select::source::{InMemorySource, TrajectorySource};
///
/// let source = InMemorySource::new(vec![Trajectory::from_series(&[0.0, 1.0, 2.0, 3.0])]);
/// let trajs = source.load(2).expect("stride 2");
/// assert_eq!(trajs[0].n_frames(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    trajectories: Vec<Trajectory>,
}

impl InMemorySource {
    /// Wraps a trajectory list.
    #[must_use]
    pub fn new(trajectories: Vec<Trajectory>) -> Self {
        Self { trajectories }
    }

    /// Number of trajectories held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trajectories.len()
    }

    /// True when no trajectories are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }
}

impl From<Vec<Trajectory>> for InMemorySource {
    fn from(trajectories: Vec<Trajectory>) -> Self {
        Self::new(trajectories)
    }
}

impl TrajectorySource for InMemorySource {
    fn load(&self, stride: usize) -> Result<Vec<Trajectory>> {
        strided(&self.trajectories, stride)
    }
}

/// A JSON array of trajectories on disk, as written by [`save_trajectories`].
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Points the source at `path`. The file is read on every `load`.
    #[must_use]
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The file this source reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TrajectorySource for JsonFileSource {
    fn load(&self, stride: usize) -> Result<Vec<Trajectory>> {
        check_stride(stride)?;
        let text = std::fs::read_to_string(&self.path)?;
        let trajectories: Vec<Trajectory> = serde_json::from_str(&text)?;
        debug!(
            path = %self.path.display(),
            n_trajectories = trajectories.len(),
            stride,
            "loaded trajectories"
        );
        strided(&trajectories, stride)
    }
}

/// Writes trajectories as a JSON array readable by [`JsonFileSource`].
///
/// # Errors
///
/// Returns `Io` or `Serialization` errors.
pub fn save_trajectories<P: AsRef<Path>>(path: P, trajectories: &[Trajectory]) -> Result<()> {
    let json = serde_json::to_string(trajectories)?;
    std::fs::write(path, json)?;
    Ok(())
}

//! Declarative sweep configuration.
//!
//! A [`SweepConfig`] names the hyperparameter, its candidate grid and the
//! fold layout. It is loaded from JSON and validated before any trajectory
//! is read or estimator fitted.
//!
//! ```json
//! {
//!   "param_name": "n_states",
//!   "candidates": [5, 10, 25],
//!   "n_folds": 5,
//!   "random_state": 42,
//!   "stride": 2
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, SelectError};
use crate::model_selection::{param_sweep, KFold, SweepEstimator, SweepResult};
use crate::params::{check_candidates, ParamValue};
use crate::source::TrajectorySource;

fn default_n_folds() -> usize {
    5
}

fn default_stride() -> usize {
    1
}

/// Settings for one cross-validated sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SweepConfig {
    /// Hyperparameter passed to `Estimator::set_params`
    pub param_name: String,
    /// Ordered candidate values
    pub candidates: Vec<ParamValue>,
    /// Number of folds (K)
    #[serde(default = "default_n_folds")]
    pub n_folds: usize,
    /// Shuffle trajectories before assigning folds
    #[serde(default)]
    pub shuffle: bool,
    /// Seed for the fold shuffle; implies `shuffle`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub random_state: Option<u64>,
    /// Keep every `stride`-th frame when loading trajectories
    #[serde(default = "default_stride")]
    pub stride: usize,
}

impl SweepConfig {
    /// Creates a config with default fold layout and stride.
    #[must_use]
    pub fn new(param_name: impl Into<String>, candidates: Vec<ParamValue>) -> Self {
        Self {
            param_name: param_name.into(),
            candidates,
            n_folds: default_n_folds(),
            shuffle: false,
            random_state: None,
            stride: default_stride(),
        }
    }

    /// Parses and validates a JSON config.
    ///
    /// # Errors
    ///
    /// `Serialization` for malformed JSON, or the first validation error.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    ///
    /// # Errors
    ///
    /// `Io` when the file cannot be read, otherwise as [`Self::from_json_str`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Checks everything that does not depend on the trajectories.
    ///
    /// # Errors
    ///
    /// `EmptyCandidates`, `DuplicateCandidate` or `InvalidHyperparameter`.
    pub fn validate(&self) -> Result<()> {
        if self.param_name.trim().is_empty() {
            return Err(invalid("param_name", &self.param_name, "a non-empty name"));
        }
        check_candidates(&self.candidates)?;
        if self.n_folds < 2 {
            return Err(invalid("n_folds", self.n_folds, ">= 2"));
        }
        if self.stride == 0 {
            return Err(invalid("stride", self.stride, ">= 1"));
        }
        Ok(())
    }

    /// Builds the fold splitter described by this config.
    #[must_use]
    pub fn kfold(&self) -> KFold {
        let kfold = KFold::new(self.n_folds).with_shuffle(self.shuffle);
        match self.random_state {
            Some(seed) => kfold.with_random_state(seed),
            None => kfold,
        }
    }

    /// Loads trajectories from `source` and runs the sweep.
    ///
    /// # Errors
    ///
    /// Validation errors first, then source errors, then any error from
    /// [`param_sweep`].
    pub fn run<E: SweepEstimator>(
        &self,
        estimator: &E,
        source: &dyn TrajectorySource,
    ) -> Result<SweepResult> {
        self.validate()?;
        let trajectories = source.load(self.stride)?;
        info!(
            param = %self.param_name,
            n_trajectories = trajectories.len(),
            stride = self.stride,
            "trajectories loaded"
        );
        param_sweep(
            estimator,
            &self.param_name,
            &self.candidates,
            &trajectories,
            &self.kfold(),
        )
    }
}

fn invalid(param: &str, value: impl ToString, constraint: &str) -> SelectError {
    SelectError::InvalidHyperparameter {
        param: param.to_string(),
        value: value.to_string(),
        constraint: constraint.to_string(),
    }
}

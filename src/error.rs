//! Error types for model-selection operations.
//!
//! Configuration errors are raised before any estimator is fitted; estimator
//! errors carry the (parameter, fold) they came from.

use thiserror::Error;

/// Main error type for `msm-select` operations.
///
/// # Examples
///
/// ```
/// use msm_select::error::SelectError;
///
/// let err = SelectError::InsufficientTrajectories {
///     n_folds: 5,
///     n_trajectories: 3,
/// };
/// assert!(err.to_string().contains("5 folds"));
/// ```
#[derive(Debug, Error)]
pub enum SelectError {
    /// Invalid hyperparameter or splitter setting.
    #[error("Invalid hyperparameter: {param} = {value}, expected {constraint}")]
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// The candidate list is empty.
    #[error("Candidate hyperparameter set cannot be empty")]
    EmptyCandidates,

    /// The same candidate value appears twice.
    #[error("Duplicate hyperparameter candidate: {value}")]
    DuplicateCandidate {
        /// Offending value
        value: String,
    },

    /// More folds requested than there are trajectories.
    #[error("Cannot split {n_trajectories} trajectories into {n_folds} folds")]
    InsufficientTrajectories {
        /// Requested fold count
        n_folds: usize,
        /// Available trajectories
        n_trajectories: usize,
    },

    /// Fitting or scoring failed for one (parameter, fold) task.
    #[error("Estimator failed for {param} = {value} on fold {fold}: {source}")]
    EstimatorFailed {
        /// Parameter name
        param: String,
        /// Candidate value
        value: String,
        /// Fold index
        fold: usize,
        /// Underlying failure
        #[source]
        source: Box<SelectError>,
    },

    /// Fitting or scoring failed on one fold of a plain cross-validation.
    #[error("Estimator failed on fold {fold}: {source}")]
    FoldFailed {
        /// Fold index
        fold: usize,
        /// Underlying failure
        #[source]
        source: Box<SelectError>,
    },

    /// `score` returned NaN or infinity.
    #[error("Estimator returned non-finite score: {score}")]
    NonFiniteScore {
        /// Returned score
        score: f64,
    },

    /// Failure reported by an estimator implementation.
    #[error("Estimator error: {0}")]
    Estimator(String),

    /// No candidate produced any score, so no best parameter exists.
    #[error("No candidate produced a score; best parameter is undefined")]
    NoScores,

    /// Data dimensions do not match.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// I/O error (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SelectError {
    /// Wraps an estimator failure with the task it belongs to.
    pub(crate) fn in_task(self, param: &str, value: impl ToString, fold: usize) -> Self {
        SelectError::EstimatorFailed {
            param: param.to_string(),
            value: value.to_string(),
            fold,
            source: Box::new(self),
        }
    }

    /// True for errors raised by configuration validation.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SelectError::InvalidHyperparameter { .. }
                | SelectError::EmptyCandidates
                | SelectError::DuplicateCandidate { .. }
                | SelectError::InsufficientTrajectories { .. }
        )
    }
}

impl From<&str> for SelectError {
    fn from(msg: &str) -> Self {
        SelectError::Estimator(msg.to_string())
    }
}

impl From<String> for SelectError {
    fn from(msg: String) -> Self {
        SelectError::Estimator(msg)
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, SelectError>;

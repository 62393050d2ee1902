//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use msm_select::prelude::*;
//! ```

pub use crate::config::SweepConfig;
pub use crate::data::{ScoreRecord, ScoreSummary, ScoreTable};
pub use crate::error::SelectError;
pub use crate::model_selection::{
    cross_validate, fit_and_score, param_sweep, select_best, BestParam, CrossValidator, FoldSplit,
    KFold, ShuffleSplit, SweepEstimator, SweepResult,
};
pub use crate::params::{candidates, ParamValue};
pub use crate::primitives::{Matrix, Trajectory};
pub use crate::source::{InMemorySource, JsonFileSource, TrajectorySource};
pub use crate::traits::Estimator;

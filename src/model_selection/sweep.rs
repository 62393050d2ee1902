//! Cross-validated hyperparameter sweep.
//!
//! For every (candidate, fold) pair a fresh estimator clone receives the
//! candidate through `set_params`, is fitted on the training trajectories
//! and scored on both training and held-out trajectories. Records are
//! grouped per candidate, reduced by median, and the candidate with the
//! highest median held-out score wins.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{fit_and_score, select_trajectories, CrossValidator, FoldSplit};
use crate::data::{ScoreRecord, ScoreSummary, ScoreTable};
use crate::error::{Result, SelectError};
use crate::params::{check_candidates, ParamValue};
use crate::primitives::Trajectory;
use crate::traits::Estimator;

/// Estimators that can be cloned into sweep tasks.
///
/// With the `parallel` feature the tasks run on rayon's pool, which adds
/// `Send + Sync` to the requirement.
#[cfg(feature = "parallel")]
pub trait SweepEstimator: Estimator + Clone + Send + Sync {}

#[cfg(feature = "parallel")]
impl<T: Estimator + Clone + Send + Sync> SweepEstimator for T {}

/// Estimators that can be cloned into sweep tasks.
#[cfg(not(feature = "parallel"))]
pub trait SweepEstimator: Estimator + Clone {}

#[cfg(not(feature = "parallel"))]
impl<T: Estimator + Clone> SweepEstimator for T {}

/// The selected hyperparameter and its median scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestParam {
    /// Winning candidate
    pub param: ParamValue,
    /// Position of the candidate in the sweep's candidate list
    pub index: usize,
    /// Median held-out score of the candidate
    pub test_score: f64,
    /// Median training score of the candidate
    pub train_score: f64,
}

/// Everything a sweep produces. Owned by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepResult {
    /// Name passed to `set_params`
    pub param_name: String,
    /// One record per (candidate, fold), candidate-major
    pub records: ScoreTable,
    /// One row per candidate, in candidate order
    pub summaries: Vec<ScoreSummary>,
    /// Argmax of the median held-out score
    pub best: BestParam,
}

/// Picks the summary with the highest median held-out score.
///
/// Ties keep the earliest summary. Summaries without scores are skipped.
///
/// # Errors
///
/// `NoScores` when no summary has a median.
pub fn select_best(summaries: &[ScoreSummary]) -> Result<BestParam> {
    let mut best: Option<BestParam> = None;

    for (index, summary) in summaries.iter().enumerate() {
        let (Some(test_score), Some(train_score)) = (summary.test_median, summary.train_median)
        else {
            continue;
        };
        let improved = best.as_ref().map_or(true, |b| test_score > b.test_score);
        if improved {
            best = Some(BestParam {
                param: summary.param.clone(),
                index,
                test_score,
                train_score,
            });
        }
    }

    best.ok_or(SelectError::NoScores)
}

fn run_task<E: SweepEstimator>(
    estimator: &E,
    param_name: &str,
    value: &ParamValue,
    fold: usize,
    split: &FoldSplit,
    trajectories: &[Trajectory],
) -> Result<ScoreRecord> {
    let train = select_trajectories(trajectories, &split.train);
    let test = select_trajectories(trajectories, &split.test);

    let mut model = estimator.clone();
    let (train_score, test_score) = model
        .set_params(param_name, value)
        .and_then(|()| fit_and_score(&mut model, &train, &test))
        .map_err(|e| e.in_task(param_name, value, fold))?;

    debug!(
        param = %param_name,
        value = %value,
        fold,
        train_score,
        test_score,
        "fold scored"
    );

    Ok(ScoreRecord {
        param: value.clone(),
        fold,
        train_score,
        test_score,
    })
}

/// Cross-validated sweep over one hyperparameter.
///
/// Configuration is validated before any estimator is fitted: the candidate
/// list must be non-empty without duplicates, the parameter name non-empty,
/// and the splitter must accept `trajectories.len()`.
///
/// # Errors
///
/// - configuration errors (`EmptyCandidates`, `DuplicateCandidate`,
///   `InvalidHyperparameter`, `InsufficientTrajectories`)
/// - `EstimatorFailed` carrying the candidate and fold of the first failure;
///   the sweep is aborted
/// - `NoScores` if no candidate produced a median
///
/// # Example
///
/// ```rust
/// use msm_select::prelude::*;
/// use msm_select::Result;
///
/// /// Held-out score peaks at `n_states = 10`.
/// #[derive(Clone, Default)]
/// struct PeakModel {
///     n_states: f64,
/// }
///
/// impl Estimator for PeakModel {
///     fn fit(&mut self, _: &[Trajectory]) -> Result<()> { Ok(()) }
///     fn transform(&self, t: &[Trajectory]) -> Result<Vec<Trajectory>> { Ok(t.to_vec()) }
///     fn score(&self, _: &[Trajectory]) -> Result<f64> {
///         Ok(-(self.n_states - 10.0).abs())
///     }
///     fn set_params(&mut self, _: &str, v: &ParamValue) -> Result<()> {
///         self.n_states = v.as_f64().ok_or("numeric")?;
///         Ok(())
///     }
/// }
///
/// let trajs: Vec<Trajectory> = (0..10).map(|i| Trajectory::from_series(&[i as f32; 4])).collect();
/// let grid = candidates([5, 10, 25]);
/// let result = param_sweep(&PeakModel::default(), "n_states", &grid, &trajs, &KFold::new(5))
///     .expect("sweep succeeds");
///
/// assert_eq!(result.records.len(), 15);
/// assert_eq!(result.summaries.len(), 3);
/// assert_eq!(result.best.param, ParamValue::Int(10));
/// ```
pub fn param_sweep<E, C>(
    estimator: &E,
    param_name: &str,
    candidates: &[ParamValue],
    trajectories: &[Trajectory],
    cv: &C,
) -> Result<SweepResult>
where
    E: SweepEstimator,
    C: CrossValidator + ?Sized,
{
    check_candidates(candidates)?;
    if param_name.is_empty() {
        return Err(SelectError::InvalidHyperparameter {
            param: "param_name".to_string(),
            value: String::new(),
            constraint: "a non-empty parameter name".to_string(),
        });
    }
    let splits = cv.split(trajectories.len())?;

    info!(
        param = %param_name,
        n_candidates = candidates.len(),
        n_folds = splits.len(),
        n_trajectories = trajectories.len(),
        "starting cross-validated sweep"
    );

    let tasks: Vec<(&ParamValue, usize, &FoldSplit)> = candidates
        .iter()
        .flat_map(|value| {
            splits
                .iter()
                .enumerate()
                .map(move |(fold, split)| (value, fold, split))
        })
        .collect();

    #[cfg(feature = "parallel")]
    let records: Vec<ScoreRecord> = tasks
        .par_iter()
        .map(|&(value, fold, split)| {
            run_task(estimator, param_name, value, fold, split, trajectories)
        })
        .collect::<Result<Vec<_>>>()?;

    #[cfg(not(feature = "parallel"))]
    let records: Vec<ScoreRecord> = tasks
        .iter()
        .map(|&(value, fold, split)| {
            run_task(estimator, param_name, value, fold, split, trajectories)
        })
        .collect::<Result<Vec<_>>>()?;

    let records = ScoreTable::new(records);
    let summaries = records.summarize(candidates);
    let best = select_best(&summaries)?;

    info!(
        param = %param_name,
        best = %best.param,
        test_score = best.test_score,
        train_score = best.train_score,
        "sweep complete"
    );

    Ok(SweepResult {
        param_name: param_name.to_string(),
        records,
        summaries,
        best,
    })
}

#[cfg(test)]
#[path = "sweep_tests.rs"]
mod tests;

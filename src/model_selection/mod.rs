//! Model selection utilities for trajectory cross-validation.
//!
//! This module provides tools for:
//! - K-Fold and shuffle-split partitions over whole trajectories
//! - Cross-validation of a single estimator
//! - Hyperparameter sweeps scored on train and held-out folds
//!   ([`param_sweep`]), aggregated by median and reduced to a best setting

mod sweep;

pub use sweep::{param_sweep, select_best, BestParam, SweepEstimator, SweepResult};

use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SelectError};
use crate::primitives::Trajectory;
use crate::stats::DescriptiveStats;
use crate::traits::Estimator;

/// One train/test partition of trajectory indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldSplit {
    /// Indices of training trajectories
    pub train: Vec<usize>,
    /// Indices of held-out trajectories
    pub test: Vec<usize>,
}

/// Strategy that partitions `n_samples` trajectories into folds.
pub trait CrossValidator {
    /// Number of folds this splitter produces.
    fn n_splits(&self) -> usize;

    /// Generate train/test indices for each fold.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the splitter cannot produce
    /// non-empty train and test sets for `n_samples` trajectories.
    fn split(&self, n_samples: usize) -> Result<Vec<FoldSplit>>;
}

/// Shuffles `0..n_samples`, seeded when `random_state` is given.
fn shuffled_indices(n_samples: usize, random_state: Option<u64>) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n_samples).collect();
    if let Some(seed) = random_state {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);
    } else {
        let mut rng = rand::thread_rng();
        indices.shuffle(&mut rng);
    }
    indices
}

/// K-Fold cross-validator.
///
/// Splits trajectories into K consecutive folds. Each fold is used once as
/// test set while the remaining K-1 folds form the training set.
///
/// # Example
///
/// ```rust
/// use msm_select::model_selection::{CrossValidator, KFold};
///
/// let kfold = KFold::new(5);
/// let splits = kfold.split(10).expect("10 trajectories fill 5 folds");
/// assert_eq!(splits.len(), 5);
/// assert_eq!(splits[0].test, vec![0, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct KFold {
    n_splits: usize,
    shuffle: bool,
    random_state: Option<u64>,
}

impl KFold {
    /// Create a new K-Fold cross-validator.
    ///
    /// # Arguments
    ///
    /// * `n_splits` - Number of folds. Must be at least 2.
    #[must_use]
    pub fn new(n_splits: usize) -> Self {
        Self {
            n_splits,
            shuffle: false,
            random_state: None,
        }
    }

    /// Enable shuffling before splitting into folds.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Set random state for reproducible shuffling.
    #[must_use]
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self.shuffle = true; // Shuffle is implied when random_state is set
        self
    }

    fn validate(&self, n_samples: usize) -> Result<()> {
        if self.n_splits < 2 {
            return Err(SelectError::InvalidHyperparameter {
                param: "n_splits".to_string(),
                value: self.n_splits.to_string(),
                constraint: ">= 2".to_string(),
            });
        }
        if self.n_splits > n_samples {
            return Err(SelectError::InsufficientTrajectories {
                n_folds: self.n_splits,
                n_trajectories: n_samples,
            });
        }
        Ok(())
    }
}

impl CrossValidator for KFold {
    fn n_splits(&self) -> usize {
        self.n_splits
    }

    fn split(&self, n_samples: usize) -> Result<Vec<FoldSplit>> {
        self.validate(n_samples)?;

        let indices = if self.shuffle {
            shuffled_indices(n_samples, self.random_state)
        } else {
            (0..n_samples).collect()
        };

        let fold_size = n_samples / self.n_splits;
        let remainder = n_samples % self.n_splits;

        let mut result = Vec::with_capacity(self.n_splits);
        let mut start = 0;

        for i in 0..self.n_splits {
            // Distribute remainder across first folds
            let current_fold_size = if i < remainder {
                fold_size + 1
            } else {
                fold_size
            };
            let end = start + current_fold_size;

            let test = indices[start..end].to_vec();
            let mut train = Vec::with_capacity(n_samples - current_fold_size);
            train.extend_from_slice(&indices[..start]);
            train.extend_from_slice(&indices[end..]);

            result.push(FoldSplit { train, test });
            start = end;
        }

        Ok(result)
    }
}

/// Random permutation cross-validator.
///
/// Each iteration draws an independent random train/test split, so test sets
/// of different iterations may overlap. Useful when trajectories are few and
/// long.
///
/// # Example
///
/// ```rust
/// use msm_select::model_selection::{CrossValidator, ShuffleSplit};
///
/// let cv = ShuffleSplit::new(3, 0.5).with_random_state(0);
/// let splits = cv.split(8).expect("valid split");
/// assert_eq!(splits.len(), 3);
/// assert!(splits.iter().all(|s| s.train.len() == 4 && s.test.len() == 4));
/// ```
#[derive(Debug, Clone)]
pub struct ShuffleSplit {
    n_splits: usize,
    test_size: f64,
    random_state: Option<u64>,
}

impl ShuffleSplit {
    /// Create a splitter with `n_splits` iterations holding out `test_size`
    /// (a fraction in (0, 1)) of the trajectories each time.
    #[must_use]
    pub fn new(n_splits: usize, test_size: f64) -> Self {
        Self {
            n_splits,
            test_size,
            random_state: None,
        }
    }

    /// Set random state for reproducible splits.
    #[must_use]
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    fn partition_sizes(&self, n_samples: usize) -> Result<(usize, usize)> {
        if self.n_splits < 2 {
            return Err(SelectError::InvalidHyperparameter {
                param: "n_splits".to_string(),
                value: self.n_splits.to_string(),
                constraint: ">= 2".to_string(),
            });
        }
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(SelectError::InvalidHyperparameter {
                param: "test_size".to_string(),
                value: self.test_size.to_string(),
                constraint: "a fraction in (0, 1)".to_string(),
            });
        }

        let n_test = (n_samples as f64 * self.test_size).round() as usize;
        let n_train = n_samples.saturating_sub(n_test);
        if n_test == 0 || n_train == 0 {
            return Err(SelectError::InvalidHyperparameter {
                param: "test_size".to_string(),
                value: self.test_size.to_string(),
                constraint: format!(
                    "a fraction leaving non-empty train and test sets of {n_samples} trajectories"
                ),
            });
        }
        Ok((n_train, n_test))
    }
}

impl CrossValidator for ShuffleSplit {
    fn n_splits(&self) -> usize {
        self.n_splits
    }

    fn split(&self, n_samples: usize) -> Result<Vec<FoldSplit>> {
        let (n_train, _) = self.partition_sizes(n_samples)?;

        let mut rng = match self.random_state {
            Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
            None => rand::rngs::StdRng::from_entropy(),
        };

        let mut result = Vec::with_capacity(self.n_splits);
        for _ in 0..self.n_splits {
            let mut indices: Vec<usize> = (0..n_samples).collect();
            indices.shuffle(&mut rng);
            let test = indices.split_off(n_train);
            result.push(FoldSplit {
                train: indices,
                test,
            });
        }
        Ok(result)
    }
}

/// Results from cross-validation of a single estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossValidationResult {
    /// Score on the training trajectories of each fold
    pub train_scores: Vec<f64>,
    /// Score on the held-out trajectories of each fold
    pub test_scores: Vec<f64>,
}

impl CrossValidationResult {
    /// Mean held-out score across folds
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        DescriptiveStats::new(&self.test_scores).mean()
    }

    /// Standard deviation of held-out scores
    #[must_use]
    pub fn std(&self) -> Option<f64> {
        DescriptiveStats::new(&self.test_scores).std()
    }

    /// Median held-out score
    #[must_use]
    pub fn median(&self) -> Option<f64> {
        DescriptiveStats::new(&self.test_scores).median()
    }

    /// Median training score
    #[must_use]
    pub fn train_median(&self) -> Option<f64> {
        DescriptiveStats::new(&self.train_scores).median()
    }

    /// Minimum held-out score
    #[must_use]
    pub fn min(&self) -> Option<f64> {
        DescriptiveStats::new(&self.test_scores).min()
    }

    /// Maximum held-out score
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        DescriptiveStats::new(&self.test_scores).max()
    }
}

/// Copies the trajectories at `indices`.
pub(crate) fn select_trajectories(trajectories: &[Trajectory], indices: &[usize]) -> Vec<Trajectory> {
    indices.iter().map(|&i| trajectories[i].clone()).collect()
}

fn finite(score: f64) -> Result<f64> {
    if score.is_finite() {
        Ok(score)
    } else {
        Err(SelectError::NonFiniteScore { score })
    }
}

/// Fit on `train`, then score on both `train` and `test`.
///
/// Returns `(train_score, test_score)`.
///
/// # Errors
///
/// Propagates fit/score failures; a NaN or infinite score is
/// `NonFiniteScore`.
pub fn fit_and_score<E>(estimator: &mut E, train: &[Trajectory], test: &[Trajectory]) -> Result<(f64, f64)>
where
    E: Estimator + ?Sized,
{
    estimator.fit(train)?;
    let train_score = finite(estimator.score(train)?)?;
    let test_score = finite(estimator.score(test)?)?;
    Ok((train_score, test_score))
}

/// Run cross-validation on an estimator.
///
/// Each fold trains a fresh clone of `estimator`, so the caller's instance
/// is never fitted.
///
/// # Errors
///
/// Returns configuration errors from the splitter before any fit, and
/// `FoldFailed` if an estimator call fails.
///
/// # Example
///
/// ```rust
/// use msm_select::prelude::*;
/// use msm_select::model_selection::cross_validate;
/// use msm_select::Result;
///
/// #[derive(Clone)]
/// struct LengthModel;
///
/// impl Estimator for LengthModel {
///     fn fit(&mut self, _: &[Trajectory]) -> Result<()> { Ok(()) }
///     fn transform(&self, t: &[Trajectory]) -> Result<Vec<Trajectory>> { Ok(t.to_vec()) }
///     fn score(&self, t: &[Trajectory]) -> Result<f64> { Ok(t.len() as f64) }
///     fn set_params(&mut self, _: &str, _: &ParamValue) -> Result<()> { Ok(()) }
/// }
///
/// let trajs: Vec<Trajectory> = (0..6).map(|i| Trajectory::from_series(&[i as f32])).collect();
/// let result = cross_validate(&LengthModel, &trajs, &KFold::new(3)).expect("valid folds");
/// assert_eq!(result.test_scores, vec![2.0, 2.0, 2.0]);
/// assert_eq!(result.train_scores, vec![4.0, 4.0, 4.0]);
/// ```
pub fn cross_validate<E, C>(
    estimator: &E,
    trajectories: &[Trajectory],
    cv: &C,
) -> Result<CrossValidationResult>
where
    E: Estimator + Clone,
    C: CrossValidator + ?Sized,
{
    let splits = cv.split(trajectories.len())?;

    let mut train_scores = Vec::with_capacity(splits.len());
    let mut test_scores = Vec::with_capacity(splits.len());

    for (fold, split) in splits.iter().enumerate() {
        let train = select_trajectories(trajectories, &split.train);
        let test = select_trajectories(trajectories, &split.test);

        let mut fold_model = estimator.clone();
        let (train_score, test_score) = fit_and_score(&mut fold_model, &train, &test)
            .map_err(|e| SelectError::FoldFailed {
                fold,
                source: Box::new(e),
            })?;

        train_scores.push(train_score);
        test_scores.push(test_score);
    }

    Ok(CrossValidationResult {
        train_scores,
        test_scores,
    })
}

#[cfg(test)]
mod test_support;


#[cfg(test)]
#[path = "tests_kfold_contract.rs"]
mod tests_kfold_contract;

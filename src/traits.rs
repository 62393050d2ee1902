//! Core trait for trajectory models.
//!
//! Featurizers, dimensionality reducers, clusterers and Markov state models
//! all expose the same surface, so cross-validation only needs this one
//! capability interface.

use crate::error::Result;
use crate::params::ParamValue;
use crate::primitives::Trajectory;

/// Capability interface shared by every trajectory model.
///
/// Implementations are black boxes to model selection: the sweep clones the
/// estimator, injects a hyperparameter, fits it on training trajectories and
/// asks it for scores.
///
/// # Examples
///
/// ```
/// use msm_select::prelude::*;
/// use msm_select::Result;
///
/// /// Scores a trajectory set by its mean frame value, shifted by `offset`.
/// #[derive(Clone, Default)]
/// struct MeanModel {
///     offset: f64,
///     fitted_mean: Option<f64>,
/// }
///
/// fn mean_of(trajs: &[Trajectory]) -> f64 {
///     let values: Vec<f32> = trajs.iter().flat_map(|t| t.frames().as_slice().to_vec()).collect();
///     values.iter().map(|&v| f64::from(v)).sum::<f64>() / values.len().max(1) as f64
/// }
///
/// impl Estimator for MeanModel {
///     fn fit(&mut self, trajectories: &[Trajectory]) -> Result<()> {
///         self.fitted_mean = Some(mean_of(trajectories));
///         Ok(())
///     }
///
///     fn transform(&self, trajectories: &[Trajectory]) -> Result<Vec<Trajectory>> {
///         Ok(trajectories.to_vec())
///     }
///
///     fn score(&self, trajectories: &[Trajectory]) -> Result<f64> {
///         let fitted = self.fitted_mean.ok_or("not fitted")?;
///         Ok(-(mean_of(trajectories) - fitted).abs() + self.offset)
///     }
///
///     fn set_params(&mut self, name: &str, value: &ParamValue) -> Result<()> {
///         match (name, value.as_f64()) {
///             ("offset", Some(v)) => {
///                 self.offset = v;
///                 Ok(())
///             }
///             _ => Err(format!("unknown parameter {name}").into()),
///         }
///     }
/// }
///
/// let trajs = vec![Trajectory::from_series(&[1.0, 2.0]), Trajectory::from_series(&[3.0])];
/// let mut model = MeanModel::default();
/// model.set_params("offset", &ParamValue::Float(1.0)).expect("known parameter");
/// model.fit(&trajs).expect("fit");
/// assert!((model.score(&trajs).expect("score") - 1.0).abs() < 1e-12);
/// ```
pub trait Estimator {
    /// Fits the model to a collection of trajectories.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails (empty data, singular covariance, etc.).
    fn fit(&mut self, trajectories: &[Trajectory]) -> Result<()>;

    /// Maps trajectories into the model's output space.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or the input is malformed.
    fn transform(&self, trajectories: &[Trajectory]) -> Result<Vec<Trajectory>>;

    /// Scores the fitted model on trajectories (higher is better, e.g. GMRQ).
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or scoring fails.
    fn score(&self, trajectories: &[Trajectory]) -> Result<f64>;

    /// Sets a named hyperparameter.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown names or values of the wrong kind.
    fn set_params(&mut self, name: &str, value: &ParamValue) -> Result<()>;

    /// Fits and transforms in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting or transforming fails.
    fn fit_transform(&mut self, trajectories: &[Trajectory]) -> Result<Vec<Trajectory>> {
        self.fit(trajectories)?;
        self.transform(trajectories)
    }
}

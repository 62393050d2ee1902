//! Deterministic estimators shared by the model-selection tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::{Result, SelectError};
use crate::params::ParamValue;
use crate::primitives::Trajectory;
use crate::traits::Estimator;

pub(crate) fn mean_value(trajectories: &[Trajectory]) -> f64 {
    let mut sum = 0.0;
    let mut n = 0usize;
    for t in trajectories {
        for &v in t.frames().as_slice() {
            sum += f64::from(v);
            n += 1;
        }
    }
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// `n` single-feature trajectories; trajectory `i` holds `len` copies of `i`.
pub(crate) fn ramp_trajectories(n: usize, len: usize) -> Vec<Trajectory> {
    (0..n)
        .map(|i| Trajectory::from_series(&vec![i as f32; len]).with_id(format!("traj-{i}")))
        .collect()
}

/// Score peaks when `n_states` equals `peak`; otherwise decreases linearly.
///
/// The score ignores the data, so train and test scores are equal.
#[derive(Debug, Clone)]
pub(crate) struct PeakModel {
    pub peak: f64,
    pub n_states: f64,
    pub fitted: bool,
    pub fits: Arc<AtomicUsize>,
}

impl PeakModel {
    pub(crate) fn new(peak: f64) -> Self {
        Self {
            peak,
            n_states: 0.0,
            fitted: false,
            fits: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn fit_count(&self) -> usize {
        self.fits.load(Ordering::SeqCst)
    }
}

impl Estimator for PeakModel {
    fn fit(&mut self, trajectories: &[Trajectory]) -> Result<()> {
        if trajectories.is_empty() {
            return Err("cannot fit on zero trajectories".into());
        }
        self.fits.fetch_add(1, Ordering::SeqCst);
        self.fitted = true;
        Ok(())
    }

    fn transform(&self, trajectories: &[Trajectory]) -> Result<Vec<Trajectory>> {
        Ok(trajectories.to_vec())
    }

    fn score(&self, _trajectories: &[Trajectory]) -> Result<f64> {
        if !self.fitted {
            return Err("PeakModel not fitted".into());
        }
        Ok(-(self.n_states - self.peak).abs())
    }

    fn set_params(&mut self, name: &str, value: &ParamValue) -> Result<()> {
        match (name, value.as_f64()) {
            ("n_states", Some(v)) => {
                self.n_states = v;
                Ok(())
            }
            _ => Err(SelectError::InvalidHyperparameter {
                param: name.to_string(),
                value: value.to_string(),
                constraint: "numeric n_states".to_string(),
            }),
        }
    }
}

/// Fits the mean frame value; scores by closeness of the data mean to it,
/// so held-out scores depend on which trajectories were held out.
#[derive(Debug, Clone, Default)]
pub(crate) struct MeanModel {
    pub fitted_mean: Option<f64>,
    pub penalty: f64,
}

impl Estimator for MeanModel {
    fn fit(&mut self, trajectories: &[Trajectory]) -> Result<()> {
        self.fitted_mean = Some(mean_value(trajectories));
        Ok(())
    }

    fn transform(&self, trajectories: &[Trajectory]) -> Result<Vec<Trajectory>> {
        Ok(trajectories.to_vec())
    }

    fn score(&self, trajectories: &[Trajectory]) -> Result<f64> {
        let fitted = self.fitted_mean.ok_or("MeanModel not fitted")?;
        Ok(-(mean_value(trajectories) - fitted).abs() - self.penalty)
    }

    fn set_params(&mut self, _name: &str, value: &ParamValue) -> Result<()> {
        self.penalty = value.as_f64().ok_or("penalty must be numeric")?;
        Ok(())
    }
}

/// Fails to fit for one specific candidate value.
#[derive(Debug, Clone)]
pub(crate) struct FailingModel {
    pub fail_on: ParamValue,
    pub current: Option<ParamValue>,
}

impl Estimator for FailingModel {
    fn fit(&mut self, _trajectories: &[Trajectory]) -> Result<()> {
        if self.current.as_ref() == Some(&self.fail_on) {
            return Err("transition matrix is not ergodic".into());
        }
        Ok(())
    }

    fn transform(&self, trajectories: &[Trajectory]) -> Result<Vec<Trajectory>> {
        Ok(trajectories.to_vec())
    }

    fn score(&self, _trajectories: &[Trajectory]) -> Result<f64> {
        Ok(1.0)
    }

    fn set_params(&mut self, _name: &str, value: &ParamValue) -> Result<()> {
        self.current = Some(value.clone());
        Ok(())
    }
}

/// Returns NaN from `score`.
#[derive(Debug, Clone, Default)]
pub(crate) struct NanModel;

impl Estimator for NanModel {
    fn fit(&mut self, _trajectories: &[Trajectory]) -> Result<()> {
        Ok(())
    }

    fn transform(&self, trajectories: &[Trajectory]) -> Result<Vec<Trajectory>> {
        Ok(trajectories.to_vec())
    }

    fn score(&self, _trajectories: &[Trajectory]) -> Result<f64> {
        Ok(f64::NAN)
    }

    fn set_params(&mut self, _name: &str, _value: &ParamValue) -> Result<()> {
        Ok(())
    }
}

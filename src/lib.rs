//! msm-select: cross-validated hyperparameter selection for trajectory models.
//!
//! Markov State Model workflows (featurize, reduce with tICA/PCA, cluster,
//! estimate an MSM) choose settings such as the number of states by scoring
//! held-out trajectories. This crate implements that model-selection
//! procedure over any estimator exposing fit/transform/score/set_params.
//! The estimators themselves live elsewhere.
//!
//! # Quick Start
//!
//! ```
//! use msm_select::prelude::*;
//!
//! #[derive(Clone, Default)]
//! struct Model {
//!     n_states: f64,
//! }
//!
//! impl Estimator for Model {
//!     fn fit(&mut self, _: &[Trajectory]) -> msm_select::Result<()> { Ok(()) }
//!     fn transform(&self, t: &[Trajectory]) -> msm_select::Result<Vec<Trajectory>> { Ok(t.to_vec()) }
//!     fn score(&self, _: &[Trajectory]) -> msm_select::Result<f64> {
//!         Ok(-(self.n_states - 4.0).powi(2))
//!     }
//!     fn set_params(&mut self, _: &str, v: &ParamValue) -> msm_select::Result<()> {
//!         self.n_states = v.as_f64().ok_or("numeric")?;
//!         Ok(())
//!     }
//! }
//!
//! let trajs: Vec<Trajectory> = (0..6)
//!     .map(|i| Trajectory::from_series(&[i as f32; 10]))
//!     .collect();
//! let result = param_sweep(&Model::default(), "n_states", &candidates([2, 4, 8]), &trajs, &KFold::new(3))
//!     .unwrap();
//! assert_eq!(result.best.param, ParamValue::Int(4));
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Frame `Matrix` and `Trajectory` types
//! - [`traits`]: The `Estimator` capability interface
//! - [`params`]: Hyperparameter candidate values
//! - [`source`]: Trajectory sources with frame striding
//! - [`model_selection`]: K-fold splitting, cross-validation and sweeps
//! - [`stats`]: Descriptive statistics over score samples
//! - [`data`]: Score tables and median aggregation
//! - [`config`]: JSON sweep configuration

pub mod config;
pub mod data;
pub mod error;
pub mod model_selection;
pub mod params;
pub mod prelude;
pub mod primitives;
pub mod source;
pub mod stats;
pub mod traits;

pub use error::{Result, SelectError};
pub use params::ParamValue;
pub use primitives::{Matrix, Trajectory};
pub use traits::Estimator;

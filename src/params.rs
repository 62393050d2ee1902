//! Hyperparameter candidate values.
//!
//! A sweep injects one `ParamValue` at a time into an estimator through
//! [`Estimator::set_params`](crate::traits::Estimator::set_params).

use serde::{Deserialize, Serialize};

use crate::error::{Result, SelectError};

/// A concrete parameter value.
///
/// Deserialises untagged, so a JSON list such as `[5, 10, 25]` yields
/// `Int` candidates and `[0.5, 1.0]` yields `Float` candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl ParamValue {
    /// Get as f64 if numeric.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Get as i64 if integer.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as usize if a non-negative integer.
    #[must_use]
    pub fn as_usize(&self) -> Option<usize> {
        self.as_i64().and_then(|v| usize::try_from(v).ok())
    }

    /// Get as bool.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<usize> for ParamValue {
    fn from(v: usize) -> Self {
        Self::Int(v as i64)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Float(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v}"),
        }
    }
}

/// Builds an ordered candidate list from anything convertible to `ParamValue`.
///
/// ```
/// use msm_select::params::{candidates, ParamValue};
///
/// let grid = candidates([5, 10, 25]);
/// assert_eq!(grid[1], ParamValue::Int(10));
/// ```
pub fn candidates<I, V>(values: I) -> Vec<ParamValue>
where
    I: IntoIterator<Item = V>,
    V: Into<ParamValue>,
{
    values.into_iter().map(Into::into).collect()
}

/// Rejects empty candidate lists, non-finite floats and repeated values.
///
/// Repeated values would merge into one group during aggregation, so the
/// candidate order could no longer be mapped back to a single summary row.
/// NaN never compares equal to itself, so its records could not be grouped.
///
/// # Errors
///
/// `EmptyCandidates`, `InvalidHyperparameter` or `DuplicateCandidate`.
pub fn check_candidates(values: &[ParamValue]) -> Result<()> {
    if values.is_empty() {
        return Err(SelectError::EmptyCandidates);
    }
    for (i, value) in values.iter().enumerate() {
        if let ParamValue::Float(v) = value {
            if !v.is_finite() {
                return Err(SelectError::InvalidHyperparameter {
                    param: "candidates".to_string(),
                    value: value.to_string(),
                    constraint: "finite values".to_string(),
                });
            }
        }
        if values[..i].contains(value) {
            return Err(SelectError::DuplicateCandidate {
                value: value.to_string(),
            });
        }
    }
    Ok(())
}

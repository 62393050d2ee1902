//! Descriptive statistics for fold scores.
//!
//! Quantiles use the R-7 method (Hyndman & Fan 1996), the default of R,
//! `NumPy` and Pandas, so the median of an even number of folds is the mean
//! of the two middle scores.
//!
//! # Examples
//!
//! ```
//! use msm_select::stats::DescriptiveStats;
//!
//! let scores = [2.1, 2.4, 1.9, 2.2];
//! let stats = DescriptiveStats::new(&scores);
//! assert!((stats.median().expect("non-empty") - 2.15).abs() < 1e-12);
//! ```

/// Descriptive statistics over a borrowed slice of scores.
#[derive(Debug)]
pub struct DescriptiveStats<'a> {
    data: &'a [f64],
}

impl<'a> DescriptiveStats<'a> {
    /// Create a new `DescriptiveStats` instance from a score slice.
    #[must_use]
    pub fn new(data: &'a [f64]) -> Self {
        Self { data }
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when there are no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Compute quantile using linear interpolation (R-7 method).
    ///
    /// Uses `select_nth_unstable_by` for O(n) average-case selection instead
    /// of a full sort. NaN values order after every finite value.
    ///
    /// # Errors
    /// Returns error if:
    /// - Data slice is empty
    /// - Quantile q is not in [0, 1]
    ///
    /// # Examples
    /// ```
    /// use msm_select::stats::DescriptiveStats;
    ///
    /// let data = [1.0, 2.0, 3.0, 4.0, 5.0];
    /// let stats = DescriptiveStats::new(&data);
    ///
    /// assert_eq!(stats.quantile(0.5).expect("median should be computable for valid data"), 3.0);
    /// assert_eq!(stats.quantile(0.0).expect("min quantile should be computable for valid data"), 1.0);
    /// assert_eq!(stats.quantile(1.0).expect("max quantile should be computable for valid data"), 5.0);
    /// ```
    pub fn quantile(&self, q: f64) -> Result<f64, String> {
        if self.data.is_empty() {
            return Err("Cannot compute quantile of empty slice".to_string());
        }
        if !(0.0..=1.0).contains(&q) {
            return Err(format!("Quantile must be in [0, 1], got {q}"));
        }

        let n = self.data.len();
        if n == 1 {
            return Ok(self.data[0]);
        }

        // R-7: h = (n - 1) * q, 0-indexed position in sorted order
        let h = (n - 1) as f64 * q;
        let h_floor = h.floor() as usize;
        let h_ceil = h.ceil() as usize;

        let mut working = self.data.to_vec();
        working.select_nth_unstable_by(h_floor, f64::total_cmp);
        let lower = working[h_floor];
        if h_floor == h_ceil {
            return Ok(lower);
        }

        // Everything right of h_floor is >= lower, so the ceil element is the
        // minimum of that partition.
        let upper = working[h_ceil..]
            .iter()
            .copied()
            .min_by(f64::total_cmp)
            .unwrap_or(lower);

        let fraction = h - h_floor as f64;
        Ok(lower + fraction * (upper - lower))
    }

    /// Median (R-7 quantile at 0.5), or `None` for an empty slice.
    #[must_use]
    pub fn median(&self) -> Option<f64> {
        self.quantile(0.5).ok()
    }

    /// Arithmetic mean, or `None` for an empty slice.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        if self.data.is_empty() {
            return None;
        }
        Some(self.data.iter().sum::<f64>() / self.data.len() as f64)
    }

    /// Population standard deviation, or `None` for an empty slice.
    #[must_use]
    pub fn std(&self) -> Option<f64> {
        let mean = self.mean()?;
        let variance = self
            .data
            .iter()
            .map(|&x| (x - mean).powi(2))
            .sum::<f64>()
            / self.data.len() as f64;
        Some(variance.sqrt())
    }

    /// Smallest value, or `None` for an empty slice.
    #[must_use]
    pub fn min(&self) -> Option<f64> {
        self.data.iter().copied().min_by(f64::total_cmp)
    }

    /// Largest value, or `None` for an empty slice.
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.data.iter().copied().max_by(f64::total_cmp)
    }
}

/// Median of a score slice; `None` when empty.
#[must_use]
pub fn median(data: &[f64]) -> Option<f64> {
    DescriptiveStats::new(data).median()
}


#[cfg(test)]
#[path = "tests_descriptive_contract.rs"]
mod tests_descriptive_contract;

//! Score table: the flat record collection produced by a sweep.
//!
//! Provides the group-by-candidate, reduce-by-median aggregation used for
//! model selection, plus JSON export for downstream tabular tools.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::params::ParamValue;
use crate::stats::DescriptiveStats;

/// Scores of one (candidate, fold) task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Candidate hyperparameter value
    pub param: ParamValue,
    /// Fold index
    pub fold: usize,
    /// Score on the fold's training trajectories
    pub train_score: f64,
    /// Score on the fold's held-out trajectories
    pub test_score: f64,
}

/// Aggregated scores of one candidate.
///
/// Medians are `None` when the candidate has no records; an undefined
/// score is never reported as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    /// Candidate hyperparameter value
    pub param: ParamValue,
    /// Number of folds that contributed
    pub n_folds: usize,
    /// Median training score across folds
    pub train_median: Option<f64>,
    /// Median held-out score across folds
    pub test_median: Option<f64>,
    /// Mean held-out score across folds
    pub test_mean: Option<f64>,
    /// Standard deviation of held-out scores
    pub test_std: Option<f64>,
}

/// Append-only collection of score records.
///
/// # Examples
///
/// ```
/// use msm_select::data::{ScoreRecord, ScoreTable};
/// use msm_select::params::ParamValue;
///
/// let mut table = ScoreTable::default();
/// for (fold, test) in [1.0, 3.0, 2.0].into_iter().enumerate() {
///     table.push(ScoreRecord { param: ParamValue::Int(5), fold, train_score: 4.0, test_score: test });
/// }
/// let rows = table.summarize(&[ParamValue::Int(5), ParamValue::Int(10)]);
/// assert_eq!(rows[0].test_median, Some(2.0));
/// assert_eq!(rows[1].test_median, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreTable {
    records: Vec<ScoreRecord>,
}

impl ScoreTable {
    /// Wraps existing records.
    #[must_use]
    pub fn new(records: Vec<ScoreRecord>) -> Self {
        Self { records }
    }

    /// Appends one record.
    pub fn push(&mut self, record: ScoreRecord) {
        self.records.push(record);
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the table has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    /// Iterates over the records of one candidate.
    pub fn for_param<'a>(&'a self, param: &'a ParamValue) -> impl Iterator<Item = &'a ScoreRecord> {
        self.records.iter().filter(move |r| &r.param == param)
    }

    /// Distinct candidate values in first-seen order.
    #[must_use]
    pub fn params(&self) -> Vec<ParamValue> {
        let mut seen: Vec<ParamValue> = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.param) {
                seen.push(record.param.clone());
            }
        }
        seen
    }

    /// Groups records by candidate and reduces each group.
    ///
    /// Rows follow `candidates` order. The result does not depend on record
    /// order.
    #[must_use]
    pub fn summarize(&self, candidates: &[ParamValue]) -> Vec<ScoreSummary> {
        candidates.iter().map(|param| self.summarize_one(param)).collect()
    }

    fn summarize_one(&self, param: &ParamValue) -> ScoreSummary {
        let (train, test): (Vec<f64>, Vec<f64>) = self
            .for_param(param)
            .map(|r| (r.train_score, r.test_score))
            .unzip();

        if test.is_empty() {
            warn!(param = %param, "no scores recorded for candidate");
        }

        let test_stats = DescriptiveStats::new(&test);
        ScoreSummary {
            param: param.clone(),
            n_folds: test.len(),
            train_median: DescriptiveStats::new(&train).median(),
            test_median: test_stats.median(),
            test_mean: test_stats.mean(),
            test_std: test_stats.std(),
        }
    }

    /// Serialises the records as a pretty-printed JSON array.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` on encoder failure.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a JSON array of records.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` for malformed input.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes the records to `path` as JSON.
    ///
    /// # Errors
    ///
    /// Returns `Io` or `Serialization` errors.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Reads records previously written with [`ScoreTable::save`].
    ///
    /// # Errors
    ///
    /// Returns `Io` or `Serialization` errors.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}

impl FromIterator<ScoreRecord> for ScoreTable {
    fn from_iter<I: IntoIterator<Item = ScoreRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(param: i64, fold: usize, train: f64, test: f64) -> ScoreRecord {
        ScoreRecord {
            param: ParamValue::Int(param),
            fold,
            train_score: train,
            test_score: test,
        }
    }

    fn sample_table() -> ScoreTable {
        vec![
            record(5, 0, 3.0, 2.0),
            record(5, 1, 3.25, 2.5),
            record(5, 2, 2.75, 1.75),
            record(10, 0, 3.75, 2.75),
            record(10, 1, 4.25, 2.25),
            record(10, 2, 4.0, 2.5),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_summarize_medians() {
        let table = sample_table();
        let rows = table.summarize(&[ParamValue::Int(5), ParamValue::Int(10)]);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].n_folds, 3);
        assert_eq!(rows[0].train_median, Some(3.0));
        assert_eq!(rows[0].test_median, Some(2.0));
        assert_eq!(rows[1].train_median, Some(4.0));
        assert_eq!(rows[1].test_median, Some(2.5));
    }

    #[test]
    fn test_summarize_follows_candidate_order() {
        let table = sample_table();
        let rows = table.summarize(&[ParamValue::Int(10), ParamValue::Int(5)]);
        assert_eq!(rows[0].param, ParamValue::Int(10));
        assert_eq!(rows[1].param, ParamValue::Int(5));
    }

    #[test]
    fn test_missing_candidate_is_undefined() {
        let table = sample_table();
        let rows = table.summarize(&[ParamValue::Int(25)]);
        assert_eq!(rows[0].n_folds, 0);
        assert_eq!(rows[0].train_median, None);
        assert_eq!(rows[0].test_median, None);
        assert_eq!(rows[0].test_mean, None);
        assert_eq!(rows[0].test_std, None);
    }

    #[test]
    fn test_summarize_ignores_record_order() {
        let table = sample_table();
        let mut reversed: Vec<ScoreRecord> = table.records().to_vec();
        reversed.reverse();
        reversed.swap(1, 4);
        let shuffled = ScoreTable::new(reversed);

        let cands = [ParamValue::Int(5), ParamValue::Int(10)];
        for (a, b) in table.summarize(&cands).iter().zip(shuffled.summarize(&cands).iter()) {
            assert_eq!(a.train_median, b.train_median);
            assert_eq!(a.test_median, b.test_median);
            assert_eq!(a.n_folds, b.n_folds);
        }
    }

    #[test]
    fn test_params_first_seen() {
        let table = sample_table();
        assert_eq!(table.params(), vec![ParamValue::Int(5), ParamValue::Int(10)]);
        assert_eq!(table.for_param(&ParamValue::Int(10)).count(), 3);
    }

    #[test]
    fn test_json_round_trip_and_shape() {
        let table = sample_table();
        let json = table.to_json().expect("serialize");
        assert!(json.trim_start().starts_with('['));
        assert!(json.contains("\"test_score\""));
        let back = ScoreTable::from_json(&json).expect("deserialize");
        assert_eq!(back, table);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("scores.json");
        let table = sample_table();
        table.save(&path).expect("save");
        let loaded = ScoreTable::load(&path).expect("load");
        assert_eq!(loaded.len(), 6);
        assert_eq!(loaded, table);
    }

    #[test]
    fn test_from_json_malformed() {
        let err = ScoreTable::from_json("{not json").unwrap_err();
        assert!(err.to_string().contains("Serialization"));
    }
}

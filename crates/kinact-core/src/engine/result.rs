use crate::core::stats::fdr::benjamini_hochberg;
use serde::Serialize;
use std::collections::BTreeMap;

/// The outcome of scoring one kinase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KinaseScore {
    pub kinase: String,
    /// Number of substrates that entered the statistic.
    pub set_size: usize,
    /// The substrate-set statistic itself (mean, median, delta count, weighted mean).
    pub activity: f64,
    /// The z-score for normal-based methods; equal to `activity` for the delta method.
    pub score: f64,
    pub p_value: f64,
    /// Benjamini/Hochberg-adjusted over all kinases of the same run.
    pub p_value_adjusted: f64,
}

impl KinaseScore {
    pub fn new(kinase: impl Into<String>, set_size: usize, activity: f64, score: f64, p_value: f64) -> Self {
        Self {
            kinase: kinase.into(),
            set_size,
            activity,
            score,
            p_value,
            p_value_adjusted: p_value,
        }
    }
}

/// Per-kinase results of one KSEA run, ordered by kinase identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KseaResult {
    rows: Vec<KinaseScore>,
}

impl KseaResult {
    /// Sorts the rows and fills in their adjusted p-values.
    pub fn from_rows(mut rows: Vec<KinaseScore>) -> Self {
        rows.sort_by(|a, b| a.kinase.cmp(&b.kinase));
        let raw: Vec<f64> = rows.iter().map(|r| r.p_value).collect();
        for (row, adjusted) in rows.iter_mut().zip(benjamini_hochberg(&raw)) {
            row.p_value_adjusted = adjusted;
        }
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KinaseScore> {
        self.rows.iter()
    }

    pub fn get(&self, kinase: &str) -> Option<&KinaseScore> {
        self.rows
            .binary_search_by(|r| r.kinase.as_str().cmp(kinase))
            .ok()
            .map(|i| &self.rows[i])
    }

    pub fn scores(&self) -> BTreeMap<String, f64> {
        self.collect_by(|r| r.score)
    }

    pub fn activities(&self) -> BTreeMap<String, f64> {
        self.collect_by(|r| r.activity)
    }

    pub fn p_values(&self) -> BTreeMap<String, f64> {
        self.collect_by(|r| r.p_value)
    }

    pub fn adjusted_p_values(&self) -> BTreeMap<String, f64> {
        self.collect_by(|r| r.p_value_adjusted)
    }

    /// The `(scores, p_values)` pair.
    pub fn split(&self) -> (BTreeMap<String, f64>, BTreeMap<String, f64>) {
        (self.scores(), self.p_values())
    }

    pub fn into_rows(self) -> Vec<KinaseScore> {
        self.rows
    }

    fn collect_by(&self, value: impl Fn(&KinaseScore) -> f64) -> BTreeMap<String, f64> {
        self.rows
            .iter()
            .map(|r| (r.kinase.clone(), value(r)))
            .collect()
    }
}

impl<'a> IntoIterator for &'a KseaResult {
    type Item = &'a KinaseScore;
    type IntoIter = std::slice::Iter<'a, KinaseScore>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

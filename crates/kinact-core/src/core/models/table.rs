use super::fold_change::FoldChanges;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("Row '{site}' has {found} values but the table has {expected} conditions")]
    RowLength {
        site: String,
        expected: usize,
        found: usize,
    },
    #[error("Duplicate site '{0}' in table")]
    DuplicateSite(String),
    #[error("Condition '{0}' not found in table")]
    UnknownCondition(String),
}

/// A site × condition matrix of optional values.
///
/// Used both for fold-changes and for the matching −log10 p-values of an experiment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteTable {
    conditions: Vec<String>,
    rows: BTreeMap<String, Vec<Option<f64>>>,
}

impl SiteTable {
    pub fn new(conditions: Vec<String>) -> Self {
        Self {
            conditions,
            rows: BTreeMap::new(),
        }
    }

    pub fn insert_row(
        &mut self,
        site: impl Into<String>,
        values: Vec<Option<f64>>,
    ) -> Result<(), TableError> {
        let site = site.into();
        if values.len() != self.conditions.len() {
            return Err(TableError::RowLength {
                site,
                expected: self.conditions.len(),
                found: values.len(),
            });
        }
        if self.rows.contains_key(&site) {
            return Err(TableError::DuplicateSite(site));
        }
        self.rows.insert(site, values);
        Ok(())
    }

    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    pub fn sites(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &[Option<f64>])> {
        self.rows.iter().map(|(s, v)| (s.as_str(), v.as_slice()))
    }

    pub fn num_sites(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn condition_index(&self, condition: &str) -> Result<usize, TableError> {
        self.conditions
            .iter()
            .position(|c| c == condition)
            .ok_or_else(|| TableError::UnknownCondition(condition.to_string()))
    }

    pub fn value(&self, site: &str, condition: &str) -> Result<Option<f64>, TableError> {
        let idx = self.condition_index(condition)?;
        Ok(self.rows.get(site).and_then(|row| row[idx]))
    }

    /// Extracts one condition as a fold-change vector. Missing cells become `NaN`.
    pub fn column(&self, condition: &str) -> Result<FoldChanges, TableError> {
        let idx = self.condition_index(condition)?;
        Ok(self
            .rows
            .iter()
            .map(|(site, row)| (site.as_str(), row[idx].unwrap_or(f64::NAN)))
            .collect())
    }

    /// Subtracts the `reference` column from every other column and drops it.
    ///
    /// A cell becomes missing if either operand is missing.
    pub fn relative_to(&self, reference: &str) -> Result<SiteTable, TableError> {
        let ref_idx = self.condition_index(reference)?;
        let conditions = self
            .conditions
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != ref_idx)
            .map(|(_, c)| c.clone())
            .collect();

        let rows = self
            .rows
            .iter()
            .map(|(site, row)| {
                let base = row[ref_idx];
                let values = row
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != ref_idx)
                    .map(|(_, v)| match (v, base) {
                        (Some(v), Some(b)) => Some(v - b),
                        _ => None,
                    })
                    .collect();
                (site.clone(), values)
            })
            .collect();

        Ok(SiteTable { conditions, rows })
    }
}

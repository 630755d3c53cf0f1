//! KSEA scorers.
//!
//! Each submodule implements one variant of the analysis over a single condition:
//! [`mean`] (mean/median z-score), [`mean_alt`] (the same restricted to regulated
//! substrates), [`delta`] (up- minus down-regulated count with a hypergeometric test) and
//! [`weighted_mean`] (weighted by interaction scores). [`run`] picks the variant from a
//! [`KseaConfig`].

pub mod delta;
pub mod mean;
pub mod mean_alt;
pub mod weighted_mean;

use super::config::{KseaConfig, Method};
use super::error::EngineError;
use super::population::Population;
use super::result::{KinaseScore, KseaResult};
use crate::core::models::adjacency::AdjacencyMatrix;
use crate::core::models::fold_change::FoldChanges;
use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Scores one condition with the method selected in `config`.
///
/// `p_values` holds −log10 p-values keyed by site and is required by the methods that
/// only count significantly regulated sites. A missing fold-change is reported before the
/// population parameters are derived from the data.
pub fn run(
    fold_changes: &FoldChanges,
    p_values: Option<&FoldChanges>,
    interactions: &AdjacencyMatrix,
    config: &KseaConfig,
) -> Result<KseaResult, EngineError> {
    ensure_no_missing(fold_changes)?;

    let require_p_values = || {
        p_values.ok_or(EngineError::MissingPValues {
            method: config.method.name(),
        })
    };

    match config.method {
        Method::Mean { statistic } => {
            let population = Population::resolve(&config.population, fold_changes)?;
            mean::run(
                fold_changes,
                interactions,
                statistic,
                &population,
                config.minimum_set_size,
            )
        }
        Method::MeanAlt { statistic, cut_off } => {
            let p_values = require_p_values()?;
            let population = Population::resolve(&config.population, fold_changes)?;
            mean_alt::run(
                fold_changes,
                p_values,
                interactions,
                statistic,
                &population,
                cut_off,
                config.minimum_set_size,
            )
        }
        Method::Delta { cut_off } => {
            let p_values = require_p_values()?;
            delta::run(
                fold_changes,
                p_values,
                interactions,
                cut_off,
                config.minimum_set_size,
            )
        }
        Method::WeightedMean => {
            let population = Population::resolve(&config.population, fold_changes)?;
            weighted_mean::run(
                fold_changes,
                interactions,
                &population,
                config.minimum_set_size,
            )
        }
    }
}

/// A substrate that was measured: its site, fold-change and interaction weight.
pub(crate) struct MeasuredSite<'a> {
    pub site: &'a str,
    pub value: f64,
    pub weight: f64,
}

pub(crate) fn ensure_no_missing(fold_changes: &FoldChanges) -> Result<(), EngineError> {
    match fold_changes.first_missing() {
        Some(site) => Err(EngineError::MissingFoldChange {
            site: site.to_string(),
        }),
        None => Ok(()),
    }
}

pub(crate) fn measured_substrates<'a>(
    fold_changes: &FoldChanges,
    substrates: &'a BTreeMap<String, f64>,
) -> Vec<MeasuredSite<'a>> {
    substrates
        .iter()
        .filter_map(|(site, &weight)| {
            fold_changes.get(site).map(|value| MeasuredSite {
                site: site.as_str(),
                value,
                weight,
            })
        })
        .collect()
}

/// Applies `score_one` to every kinase and gathers the kinases it produced a score for.
pub(crate) fn score_kinases<F>(
    interactions: &AdjacencyMatrix,
    score_one: F,
) -> Result<KseaResult, EngineError>
where
    F: Fn(&str, &BTreeMap<String, f64>) -> Result<Option<KinaseScore>, EngineError> + Sync + Send,
{
    let kinases: Vec<(&str, &BTreeMap<String, f64>)> = interactions.iter().collect();

    #[cfg(not(feature = "parallel"))]
    let iterator = kinases.iter();

    #[cfg(feature = "parallel")]
    let iterator = kinases.par_iter();

    let results: Vec<Result<Option<KinaseScore>, EngineError>> = iterator
        .map(|&(kinase, substrates)| score_one(kinase, substrates))
        .collect();

    let mut rows = Vec::with_capacity(results.len());
    for result in results {
        if let Some(row) = result? {
            rows.push(row);
        }
    }
    Ok(KseaResult::from_rows(rows))
}

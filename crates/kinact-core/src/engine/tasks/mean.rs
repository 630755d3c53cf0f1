use super::{ensure_no_missing, measured_substrates, score_kinases};
use crate::core::models::adjacency::AdjacencyMatrix;
use crate::core::models::fold_change::FoldChanges;
use crate::core::stats::distributions::two_sided_normal_p;
use crate::engine::config::{DEFAULT_MINIMUM_SET_SIZE, Statistic};
use crate::engine::error::EngineError;
use crate::engine::population::Population;
use crate::engine::result::{KinaseScore, KseaResult};
use tracing::{debug, info, instrument};

/// Mean-based KSEA with explicit population parameters.
///
/// For every kinase with `m ≥ 1` measured substrates:
/// `score = (mean − population_mean) · √m / population_std` and
/// `p = 2 · (1 − Φ(|score|))`. Kinases without measured substrates are omitted.
///
/// # Errors
///
/// Fails before scoring anything if `fold_changes` still contains missing values or if
/// `population_std` is not strictly positive.
pub fn score(
    fold_changes: &FoldChanges,
    interactions: &AdjacencyMatrix,
    population_mean: f64,
    population_std: f64,
) -> Result<KseaResult, EngineError> {
    let population = Population::new(population_mean, population_std)?;
    run(
        fold_changes,
        interactions,
        Statistic::Mean,
        &population,
        DEFAULT_MINIMUM_SET_SIZE,
    )
}

/// Median-based counterpart of [`score`], normalized the same way.
pub fn score_median(
    fold_changes: &FoldChanges,
    interactions: &AdjacencyMatrix,
    population_mean: f64,
    population_std: f64,
) -> Result<KseaResult, EngineError> {
    let population = Population::new(population_mean, population_std)?;
    run(
        fold_changes,
        interactions,
        Statistic::Median,
        &population,
        DEFAULT_MINIMUM_SET_SIZE,
    )
}

#[instrument(skip_all, name = "ksea_mean_task", fields(statistic = statistic.name()))]
pub fn run(
    fold_changes: &FoldChanges,
    interactions: &AdjacencyMatrix,
    statistic: Statistic,
    population: &Population,
    minimum_set_size: usize,
) -> Result<KseaResult, EngineError> {
    ensure_no_missing(fold_changes)?;
    let minimum_set_size = minimum_set_size.max(1);

    let result = score_kinases(interactions, |kinase, substrates| {
        let values: Vec<f64> = measured_substrates(fold_changes, substrates)
            .into_iter()
            .map(|s| s.value)
            .collect();
        let m = values.len();
        if m < minimum_set_size {
            debug!(kinase, measured = m, "Skipping kinase: too few measured substrates.");
            return Ok(None);
        }

        let activity = statistic.summarize(&values).ok_or_else(|| {
            EngineError::Internal(format!("empty substrate set for kinase '{}'", kinase))
        })?;
        let z = population.z_score(activity, m as f64);
        Ok(Some(KinaseScore::new(
            kinase,
            m,
            activity,
            z,
            two_sided_normal_p(z),
        )))
    })?;

    info!(
        kinases = interactions.num_kinases(),
        scored = result.len(),
        "KSEA {} scoring finished.",
        statistic.name()
    );
    Ok(result)
}

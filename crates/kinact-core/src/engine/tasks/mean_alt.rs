use super::{ensure_no_missing, measured_substrates, score_kinases};
use crate::core::models::adjacency::AdjacencyMatrix;
use crate::core::models::fold_change::FoldChanges;
use crate::core::stats::distributions::two_sided_normal_p;
use crate::engine::config::Statistic;
use crate::engine::error::EngineError;
use crate::engine::population::Population;
use crate::engine::result::{KinaseScore, KseaResult};
use tracing::{debug, info, instrument};

/// Mean/median KSEA over significantly regulated substrates only.
///
/// A kinase qualifies when at least `minimum_set_size` of its substrates are measured;
/// its statistic is then computed over the measured substrates whose −log10 p-value
/// exceeds `cut_off`, and `m` is the size of that reduced set. Kinases whose reduced set
/// is empty are omitted.
#[instrument(skip_all, name = "ksea_mean_alt_task", fields(statistic = statistic.name()))]
pub fn run(
    fold_changes: &FoldChanges,
    p_values: &FoldChanges,
    interactions: &AdjacencyMatrix,
    statistic: Statistic,
    population: &Population,
    cut_off: f64,
    minimum_set_size: usize,
) -> Result<KseaResult, EngineError> {
    ensure_no_missing(fold_changes)?;
    let minimum_set_size = minimum_set_size.max(1);

    let result = score_kinases(interactions, |kinase, substrates| {
        let measured = measured_substrates(fold_changes, substrates);
        if measured.len() < minimum_set_size {
            debug!(kinase, measured = measured.len(), "Skipping kinase: too few measured substrates.");
            return Ok(None);
        }

        let regulated: Vec<f64> = measured
            .iter()
            .filter(|s| p_values.get(s.site).is_some_and(|p| p > cut_off))
            .map(|s| s.value)
            .collect();
        let Some(activity) = statistic.summarize(&regulated) else {
            debug!(kinase, "Skipping kinase: no significantly regulated substrates.");
            return Ok(None);
        };

        let m = regulated.len();
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
        cut_off,
        "KSEA {} scoring over regulated sites finished.",
        statistic.name()
    );
    Ok(result)
}

use super::{ensure_no_missing, measured_substrates, score_kinases};
use crate::core::models::adjacency::AdjacencyMatrix;
use crate::core::models::fold_change::FoldChanges;
use crate::core::stats::distributions::two_sided_normal_p;
use crate::engine::error::EngineError;
use crate::engine::population::Population;
use crate::engine::result::{KinaseScore, KseaResult};
use tracing::{debug, info, instrument};

/// KSEA weighted by interaction scores (e.g. NetworKIN predictions).
///
/// activity = Σ fc·w / Σ w over the measured substrates, z-scored with `|Σ w|` as the
/// effective set size. Kinases whose measured weights sum to zero are skipped.
#[instrument(skip_all, name = "ksea_weighted_mean_task")]
pub fn run(
    fold_changes: &FoldChanges,
    interactions: &AdjacencyMatrix,
    population: &Population,
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

        let total_weight: f64 = measured.iter().map(|s| s.weight).sum();
        if total_weight == 0.0 {
            debug!(kinase, "Skipping kinase: substrate weights sum to zero.");
            return Ok(None);
        }
        let weighted: f64 = measured.iter().map(|s| s.value * s.weight).sum();
        let activity = weighted / total_weight;

        let z = population.z_score(activity, total_weight.abs());
        Ok(Some(KinaseScore::new(
            kinase,
            measured.len(),
            activity,
            z,
            two_sided_normal_p(z),
        )))
    })?;

    info!(
        kinases = interactions.num_kinases(),
        scored = result.len(),
        "KSEA weighted-mean scoring finished."
    );
    Ok(result)
}

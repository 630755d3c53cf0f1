pub mod data;
pub mod networkin;
pub mod score;
pub mod targets;

use crate::config::models::InteractionConfig;
use crate::error::{CliError, Result};
use kinact::core::io::{id_mapping::IdMapping, networkin as nk, ptms};
use kinact::core::models::adjacency::AdjacencyMatrix;
use tracing::info;

/// Builds the kinase-substrate network described by `config`.
pub(crate) fn load_interactions(config: &InteractionConfig) -> Result<AdjacencyMatrix> {
    let id_mapping = config
        .id_mapping_path
        .as_deref()
        .map(IdMapping::load)
        .transpose()?;

    let curated = config
        .ptms_path
        .as_deref()
        .map(|path| ptms::load_omnipath_ptms(path, &config.filter, id_mapping.as_ref()))
        .transpose()?;

    let interactions = match (&config.networkin, curated) {
        (Some(networkin), curated) => {
            let predictions = nk::load_predictions(
                &networkin.predictions_path,
                networkin.score_cut_off,
                networkin.normalization,
            )?;
            match curated {
                Some(curated) if networkin.add_curated => {
                    info!("Adding curated interactions to NetworKIN predictions.");
                    nk::merge_curated(predictions, &curated)
                }
                _ => predictions,
            }
        }
        (None, Some(curated)) => curated,
        (None, None) => {
            return Err(CliError::Config(
                "No interaction source configured: set 'interactions.ptms' or 'interactions.networkin'."
                    .to_string(),
            ));
        }
    };

    info!(
        kinases = interactions.num_kinases(),
        interactions = interactions.num_interactions(),
        "Kinase-substrate network ready."
    );
    Ok(interactions)
}

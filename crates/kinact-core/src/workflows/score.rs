use crate::core::models::adjacency::AdjacencyMatrix;
use crate::core::models::table::SiteTable;
use crate::engine::config::KseaConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::result::KseaResult;
use crate::engine::tasks;
use tracing::{info, instrument, warn};

/// KSEA results for one condition of an experiment.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionResult {
    pub condition: String,
    pub result: KseaResult,
}

/// Scores every condition of `fold_changes` in column order.
///
/// Missing fold-changes are dropped per condition. When the configured method counts
/// regulated sites, `p_values` must be given and carry a column for every condition.
#[instrument(skip_all, name = "scoring_workflow")]
pub fn run(
    fold_changes: &SiteTable,
    p_values: Option<&SiteTable>,
    interactions: &AdjacencyMatrix,
    config: &KseaConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<ConditionResult>, EngineError> {
    config.method.validate()?;
    let needs_p_values = config.method.requires_p_values();
    if needs_p_values && p_values.is_none() {
        return Err(EngineError::MissingPValues {
            method: config.method.name(),
        });
    }

    reporter.report(Progress::PhaseStart { name: "Scoring" });
    info!(
        method = config.method.name(),
        conditions = fold_changes.conditions().len(),
        sites = fold_changes.num_sites(),
        kinases = interactions.num_kinases(),
        "Starting KSEA over all conditions."
    );
    if interactions.is_empty() {
        warn!("Interaction network is empty; every condition will have an empty result.");
        reporter.report(Progress::Message(
            "Interaction network is empty; no kinase can be scored.".to_string(),
        ));
    }

    reporter.report(Progress::TaskStart {
        total_steps: fold_changes.conditions().len() as u64,
    });

    let mut results = Vec::with_capacity(fold_changes.conditions().len());
    for condition in fold_changes.conditions() {
        let column = fold_changes.column(condition)?.dropna();
        let condition_p_values = match p_values {
            Some(table) if needs_p_values => Some(table.column(condition)?.dropna()),
            _ => None,
        };

        let result = tasks::run(&column, condition_p_values.as_ref(), interactions, config)?;
        info!(
            condition = condition.as_str(),
            sites = column.len(),
            scored = result.len(),
            "Condition scored."
        );
        reporter.report(Progress::ConditionScored {
            condition: condition.clone(),
            kinases: result.len(),
        });
        results.push(ConditionResult {
            condition: condition.clone(),
            result,
        });
    }

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    Ok(results)
}

use super::load_interactions;
use crate::cli::ScoreArgs;
use crate::config::builder::build_score_config;
use crate::config::models::ScoreConfig;
use crate::data::DataManager;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use kinact::core::io::{dataset, table};
use kinact::core::models::table::SiteTable;
use kinact::engine::error::EngineError;
use kinact::engine::progress::ProgressReporter;
use kinact::workflows::score::{self, ConditionResult};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use tracing::{info, warn};

#[derive(Serialize)]
struct ScoreRow<'a> {
    condition: &'a str,
    kinase: &'a str,
    set_size: usize,
    activity: f64,
    score: f64,
    p_value: f64,
    p_value_adjusted: f64,
}

pub fn run(args: ScoreArgs) -> Result<()> {
    info!("Initializing data manager...");
    let data_manager = DataManager::new()?;

    info!("Merging configuration from file and CLI arguments...");
    let config = build_score_config(&args, &data_manager)?;

    let (fold_changes, p_values) = load_tables(&config)?;
    if let Some(path) = &config.fold_changes_out {
        info!("Writing scored fold-change table to {:?}", path);
        table::write_site_table(&fold_changes, File::create(path)?)?;
    }

    let interactions = load_interactions(&config.interactions)?;
    if interactions.is_empty() {
        warn!("The kinase-substrate network is empty; no kinase can be scored.");
    }

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Scoring {} condition(s) with the '{}' method...",
        fold_changes.conditions().len(),
        config.ksea.method.name()
    );
    let results = score::run(
        &fold_changes,
        p_values.as_ref(),
        &interactions,
        &config.ksea,
        &reporter,
    )?;

    let rows = write_results(&results, File::create(&config.output_path)?)?;
    info!("Wrote {} result row(s) to {:?}", rows, &config.output_path);
    println!(
        "✓ Scores for {} condition(s) written to: {}",
        results.len(),
        config.output_path.display()
    );
    Ok(())
}

fn load_tables(config: &ScoreConfig) -> Result<(SiteTable, Option<SiteTable>)> {
    let (fold_changes, p_values) = if config.example_dataset {
        let data = dataset::load_example_dataset(&config.fold_changes_path)?;
        (data.fold_changes, Some(data.p_values))
    } else {
        let fold_changes = table::read_site_table(&config.fold_changes_path)?;
        let p_values = config
            .p_values_path
            .as_deref()
            .map(table::read_site_table)
            .transpose()?;
        (fold_changes, p_values)
    };

    let fold_changes = match &config.relative_to {
        Some(reference) => {
            info!("Expressing fold-changes relative to condition '{}'.", reference);
            fold_changes
                .relative_to(reference)
                .map_err(|e| CliError::Engine(EngineError::from(e)))?
        }
        None => fold_changes,
    };
    info!(
        sites = fold_changes.num_sites(),
        conditions = fold_changes.conditions().len(),
        "Fold-change table loaded."
    );
    Ok((fold_changes, p_values))
}

/// Writes results in long format, one row per condition and kinase. Returns the row count.
fn write_results(results: &[ConditionResult], writer: impl Write) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(writer);
    let mut rows = 0;
    for condition in results {
        for kinase in &condition.result {
            writer.serialize(ScoreRow {
                condition: &condition.condition,
                kinase: &kinase.kinase,
                set_size: kinase.set_size,
                activity: kinase.activity,
                score: kinase.score,
                p_value: kinase.p_value,
                p_value_adjusted: kinase.p_value_adjusted,
            })?;
            rows += 1;
        }
    }
    writer.flush()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinact::engine::result::{KinaseScore, KseaResult};

    #[test]
    fn results_are_written_in_long_format() {
        let results = vec![
            ConditionResult {
                condition: "5min".to_string(),
                result: KseaResult::from_rows(vec![
                    KinaseScore::new("LCK", 2, 1.5, 2.0, 0.5),
                    KinaseScore::new("CDK1", 1, -1.0, -1.0, 0.25),
                ]),
            },
            ConditionResult {
                condition: "10min".to_string(),
                result: KseaResult::default(),
            },
        ];

        let mut buffer = Vec::new();
        let rows = write_results(&results, &mut buffer).unwrap();
        assert_eq!(rows, 2);

        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines[0],
            "condition,kinase,set_size,activity,score,p_value,p_value_adjusted"
        );
        assert_eq!(lines[1], "5min,CDK1,1,-1.0,-1.0,0.25,0.5");
        assert_eq!(lines[2], "5min,LCK,2,1.5,2.0,0.5,0.5");
        assert_eq!(lines.len(), 3);
    }
}

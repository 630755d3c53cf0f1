use super::load_interactions;
use crate::cli::TargetsArgs;
use crate::config::builder::build_targets_config;
use crate::data::DataManager;
use crate::error::Result;
use kinact::core::models::adjacency::AdjacencyMatrix;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use tracing::info;

#[derive(Serialize)]
struct EdgeRow<'a> {
    kinase: &'a str,
    site: &'a str,
    weight: f64,
}

pub fn run(args: TargetsArgs) -> Result<()> {
    let data_manager = DataManager::new()?;
    let config = build_targets_config(&args, &data_manager)?;
    let interactions = load_interactions(&config)?;

    let edges = write_edges(&interactions, File::create(&args.output)?)?;
    info!("Wrote {} interaction(s) to {:?}", edges, &args.output);
    println!(
        "✓ {} kinase(s) with {} interaction(s) written to: {}",
        interactions.num_kinases(),
        edges,
        args.output.display()
    );
    Ok(())
}

fn write_edges(interactions: &AdjacencyMatrix, writer: impl Write) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(writer);
    let mut edges = 0;
    for (kinase, substrates) in interactions.iter() {
        for (site, &weight) in substrates {
            writer.serialize(EdgeRow {
                kinase,
                site,
                weight,
            })?;
            edges += 1;
        }
    }
    writer.flush()?;
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_written_sorted_by_kinase_then_site() {
        let mut network = AdjacencyMatrix::new();
        network.insert("PTPN6", "P43403_Y319", -1.0);
        network.insert("LCK", "P43403_Y493", 1.0);
        network.insert("LCK", "P43403_Y319", 1.0);

        let mut buffer = Vec::new();
        assert_eq!(write_edges(&network, &mut buffer).unwrap(), 3);

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(
            output,
            "kinase,site,weight\n\
             LCK,P43403_Y319,1.0\n\
             LCK,P43403_Y493,1.0\n\
             PTPN6,P43403_Y319,-1.0\n"
        );
    }
}

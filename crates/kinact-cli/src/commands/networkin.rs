use crate::cli::{NetworkinArgs, NetworkinCommands};
use crate::config::builder::{resolve_example_dataset, resolve_sequences};
use crate::data::DataManager;
use crate::error::Result;
use kinact::core::io::{dataset, networkin, table};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub fn run(args: NetworkinArgs) -> Result<()> {
    match args.command {
        NetworkinCommands::Prepare {
            input,
            sequences,
            output_dir,
        } => handle_prepare(input, sequences, &output_dir),
    }
}

fn handle_prepare(
    input: Option<PathBuf>,
    sequences: Option<String>,
    output_dir: &Path,
) -> Result<()> {
    let data_manager = DataManager::new()?;

    let sites = match input {
        Some(path) => table::read_site_table(&path)?,
        None => {
            let path = resolve_example_dataset(&data_manager)?;
            dataset::load_example_dataset(&path)?.fold_changes
        }
    };

    let sequences_path = resolve_sequences(sequences.as_deref(), &data_manager)?;
    info!("Loading protein sequences from {:?}", sequences_path);
    let sequences = networkin::load_sequences(&sequences_path)?;

    let prepared = networkin::prepare_files(sites.sites(), &sequences, output_dir)?;
    if !prepared.missing_sequences.is_empty() {
        warn!(
            missing = prepared.missing_sequences.len(),
            "Some proteins have no known sequence and were left out of the FASTA file."
        );
        println!(
            "Warning: no sequence for {} protein(s): {}",
            prepared.missing_sequences.len(),
            prepared.missing_sequences.join(", ")
        );
    }

    println!("✓ Site file written to: {}", prepared.site_file.display());
    println!("✓ FASTA file written to: {}", prepared.fasta_file.display());
    Ok(())
}

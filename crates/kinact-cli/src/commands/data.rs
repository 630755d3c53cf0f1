use crate::cli::{DataArgs, DataCommands};
use crate::data::{DataManager, RESOURCES};
use crate::error::{CliError, Result};
use std::path::PathBuf;
use tracing::info;

pub fn run(args: DataArgs) -> Result<()> {
    match args.command {
        DataCommands::Path => {
            handle_path()?;
        }
        DataCommands::SetPath { path } => {
            handle_set_path(path)?;
        }
        DataCommands::ResetPath => {
            handle_reset_path()?;
        }
    }
    Ok(())
}

fn handle_path() -> Result<()> {
    let manager = DataManager::new()?;
    println!("{}", manager.get_data_path().display());
    for (parsed, name, kind) in RESOURCES {
        let path = manager.resolve_logical_name(&parsed)?;
        let status = if path.exists() { "✓" } else { "✗ missing" };
        println!("  {:<11} {:<14} {} ({})", kind, name, path.display(), status);
    }
    Ok(())
}

fn handle_set_path(path: PathBuf) -> Result<()> {
    if !path.is_absolute() {
        return Err(CliError::Argument(format!(
            "The data path must be absolute, got {:?}.",
            path
        )));
    }
    info!("Setting custom data path to {:?}", path);
    DataManager::set_custom_path(&path)?;
    println!("✓ Data path set to: {}", path.display());
    Ok(())
}

fn handle_reset_path() -> Result<()> {
    info!("Resetting data path to default.");
    DataManager::reset_path()?;
    let manager = DataManager::new()?;
    println!(
        "✓ Data path reset to default: {}",
        manager.get_data_path().display()
    );
    Ok(())
}

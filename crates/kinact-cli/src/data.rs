use crate::error::{CliError, Result};
use crate::utils::parser::ParsedLogicalName;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const DATA_SUBDIR: &str = "data";

/// Every resource the data directory can hold, with its logical name and kind.
pub const RESOURCES: [(ParsedLogicalName, &str, &str); 4] = [
    (ParsedLogicalName::OmnipathPtms, "omnipath", "ptms"),
    (ParsedLogicalName::UniprotIdMapping, "uniprot", "id-mapping"),
    (ParsedLogicalName::UniprotSequences, "uniprot", "sequences"),
    (ParsedLogicalName::ExampleDataset, "de-graaf-2014", "dataset"),
];

#[derive(Debug)]
pub struct DataManager {
    base_path: PathBuf,
}

impl DataManager {
    pub fn new() -> Result<Self> {
        let path = Self::determine_data_path()?;
        debug!("DataManager initialized with path: {:?}", &path);
        Ok(Self { base_path: path })
    }

    #[cfg(test)]
    pub fn with_custom_path(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn get_data_path(&self) -> &Path {
        &self.base_path
    }

    pub fn set_custom_path(path: &Path) -> Result<()> {
        let path_str = path.to_str().ok_or_else(|| {
            CliError::Argument(format!("Data path is not valid UTF-8: {:?}", path))
        })?;
        let config_path = Self::get_path_config_file()?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(config_path, path_str).map_err(CliError::from)
    }

    pub fn reset_path() -> Result<()> {
        if let Ok(config_path) = Self::get_path_config_file() {
            if config_path.exists() {
                fs::remove_file(config_path)?;
            }
        }
        Ok(())
    }

    pub fn resolve_logical_name(&self, parsed_name: &ParsedLogicalName) -> Result<PathBuf> {
        let file_name = match parsed_name {
            ParsedLogicalName::OmnipathPtms => "omnipath_ptms.txt",
            ParsedLogicalName::UniprotIdMapping => "id_conversion.txt",
            ParsedLogicalName::UniprotSequences => "sequences.tab",
            ParsedLogicalName::ExampleDataset => "deGraaf_2014_jurkat.csv",
        };
        Ok(self.base_path.join(DATA_SUBDIR).join(file_name))
    }

    fn determine_data_path() -> Result<PathBuf> {
        match Self::get_path_config_file() {
            Ok(config_path) if config_path.exists() => {
                let custom_path_str = fs::read_to_string(&config_path)?.trim().to_string();
                if custom_path_str.is_empty() {
                    warn!("Custom path config file is empty, falling back to default path.");
                    Self::get_default_data_path()
                } else {
                    Ok(PathBuf::from(custom_path_str))
                }
            }
            _ => Self::get_default_data_path(),
        }
    }

    fn get_path_config_file() -> Result<PathBuf> {
        ProjectDirs::from("org", "saezlab", "kinact")
            .map(|dirs| dirs.config_dir().join("path.conf"))
            .ok_or_else(|| CliError::Data("Could not determine config directory path.".to_string()))
    }

    fn get_default_data_path() -> Result<PathBuf> {
        ProjectDirs::from("org", "saezlab", "kinact")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| {
                CliError::Data("Could not determine default data directory path.".to_string())
            })
    }
}

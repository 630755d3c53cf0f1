use crate::cli::{MethodArg, NormalizationArg, StatisticArg};
use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileScoringConfig {
    pub method: Option<MethodArg>,
    pub statistic: Option<StatisticArg>,
    #[serde(rename = "cut-off")]
    pub cut_off: Option<f64>,
    #[serde(rename = "minimum-set-size")]
    pub minimum_set_size: Option<usize>,
    #[serde(rename = "population-mean")]
    pub population_mean: Option<f64>,
    #[serde(rename = "population-std")]
    pub population_std: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileInteractionsConfig {
    pub ptms: Option<String>,
    pub sources: Option<Vec<String>>,
    pub organism: Option<u32>,
    #[serde(rename = "id-mapping")]
    pub id_mapping: Option<String>,
    pub networkin: Option<PathBuf>,
    #[serde(rename = "networkin-cut-off")]
    pub networkin_cut_off: Option<f64>,
    #[serde(rename = "networkin-normalization")]
    pub networkin_normalization: Option<NormalizationArg>,
    #[serde(rename = "add-curated")]
    pub add_curated: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub scoring: Option<FileScoringConfig>,
    pub interactions: Option<FileInteractionsConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}

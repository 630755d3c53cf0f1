use kinact::core::io::networkin::NormalizationAxis;
use kinact::core::io::ptms::PtmFilter;
use kinact::engine::config::KseaConfig;
use std::path::PathBuf;

/// Where NetworKIN predictions come from and how they are combined with curated edges.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkinConfig {
    pub predictions_path: PathBuf,
    pub score_cut_off: f64,
    pub normalization: NormalizationAxis,
    pub add_curated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InteractionConfig {
    /// Only resolved when curated interactions are actually needed.
    pub ptms_path: Option<PathBuf>,
    pub filter: PtmFilter,
    pub id_mapping_path: Option<PathBuf>,
    pub networkin: Option<NetworkinConfig>,
}

pub struct ScoreConfig {
    pub fold_changes_path: PathBuf,
    pub p_values_path: Option<PathBuf>,
    /// `true` when the input is the bundled example dataset rather than a plain table.
    pub example_dataset: bool,
    pub relative_to: Option<String>,
    pub output_path: PathBuf,
    pub fold_changes_out: Option<PathBuf>,
    pub ksea: KseaConfig,
    pub interactions: InteractionConfig,
}

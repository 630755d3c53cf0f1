use crate::cli::{MethodArg, StatisticArg};
use kinact::core::io::ptms::DEFAULT_SOURCES;
use kinact::engine::config::{DEFAULT_CUT_OFF, DEFAULT_MINIMUM_SET_SIZE};

pub struct DefaultsConfig {
    pub method: MethodArg,
    pub statistic: StatisticArg,
    pub cut_off: f64,
    pub minimum_set_size: usize,
    pub ptms: String,
    pub sources: Vec<String>,
    pub networkin_cut_off: f64,
    pub add_curated: bool,
    pub dataset: String,
    pub sequences: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            method: MethodArg::Mean,
            statistic: StatisticArg::Mean,
            cut_off: DEFAULT_CUT_OFF,
            minimum_set_size: DEFAULT_MINIMUM_SET_SIZE,
            ptms: "omnipath".to_string(),
            sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
            networkin_cut_off: 1.0,
            add_curated: true,
            dataset: "de-graaf-2014".to_string(),
            sequences: "uniprot".to_string(),
        }
    }
}

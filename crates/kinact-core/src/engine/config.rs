use crate::core::stats::summary;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// −log10(0.05): sites above this −log10 p-value count as significantly regulated.
pub const DEFAULT_CUT_OFF: f64 = 1.301_029_995_663_981_3;

pub const DEFAULT_MINIMUM_SET_SIZE: usize = 1;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// How a kinase's substrate fold-changes are summarized into one value.
///
/// Both statistics share the z-score normalization `(x − mP) · √m / δ`; the median is
/// not rescaled for its larger sampling variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Statistic {
    #[default]
    Mean,
    Median,
}

impl Statistic {
    pub fn summarize(self, values: &[f64]) -> Option<f64> {
        match self {
            Statistic::Mean => summary::mean(values),
            Statistic::Median => summary::median(values),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Statistic::Mean => "mean",
            Statistic::Median => "median",
        }
    }
}

/// The KSEA variant to run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Method {
    /// Mean/median of all measured substrates, z-scored against the population.
    Mean { statistic: Statistic },
    /// As `Mean`, restricted to substrates whose −log10 p-value exceeds `cut_off`.
    MeanAlt { statistic: Statistic, cut_off: f64 },
    /// Significantly up- minus significantly down-regulated substrates, tested with a
    /// hypergeometric distribution.
    Delta { cut_off: f64 },
    /// Mean of fold-changes weighted by the interaction weights (e.g. prediction scores).
    WeightedMean,
}

impl Default for Method {
    fn default() -> Self {
        Method::Mean {
            statistic: Statistic::Mean,
        }
    }
}

impl Method {
    pub fn name(&self) -> &'static str {
        match self {
            Method::Mean { .. } => "mean",
            Method::MeanAlt { .. } => "mean-alt",
            Method::Delta { .. } => "delta",
            Method::WeightedMean => "weighted-mean",
        }
    }

    pub fn requires_p_values(&self) -> bool {
        matches!(self, Method::MeanAlt { .. } | Method::Delta { .. })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Method::MeanAlt { cut_off, .. } | Method::Delta { cut_off } if !cut_off.is_finite() => {
                Err(ConfigError::InvalidParameter {
                    name: "cut_off",
                    reason: format!("must be finite, got {}", cut_off),
                })
            }
            _ => Ok(()),
        }
    }
}

/// Population parameters; a `None` is derived from the fold-changes being scored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PopulationParams {
    pub mean: Option<f64>,
    pub std: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KseaConfig {
    pub method: Method,
    pub minimum_set_size: usize,
    pub population: PopulationParams,
}

#[derive(Default)]
pub struct KseaConfigBuilder {
    method: Option<Method>,
    minimum_set_size: Option<usize>,
    population_mean: Option<f64>,
    population_std: Option<f64>,
}

impl KseaConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }
    pub fn minimum_set_size(mut self, size: usize) -> Self {
        self.minimum_set_size = Some(size);
        self
    }
    pub fn population_mean(mut self, mean: Option<f64>) -> Self {
        self.population_mean = mean;
        self
    }
    pub fn population_std(mut self, std: Option<f64>) -> Self {
        self.population_std = std;
        self
    }

    pub fn build(self) -> Result<KseaConfig, ConfigError> {
        let method = self.method.ok_or(ConfigError::MissingParameter("method"))?;
        method.validate()?;

        let minimum_set_size = self.minimum_set_size.unwrap_or(DEFAULT_MINIMUM_SET_SIZE);
        if minimum_set_size == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "minimum_set_size",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(KseaConfig {
            method,
            minimum_set_size,
            population: PopulationParams {
                mean: self.population_mean,
                std: self.population_std,
            },
        })
    }
}

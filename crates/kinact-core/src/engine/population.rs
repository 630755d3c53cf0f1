use super::config::PopulationParams;
use super::error::EngineError;
use crate::core::models::fold_change::FoldChanges;
use crate::core::stats::summary;

/// Mean (mP) and standard deviation (δ) of the complete fold-change distribution, the
/// reference the substrate-set statistics are z-scored against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Population {
    mean: f64,
    std: f64,
}

impl Population {
    /// Fails if `mean` is not finite or `std` is not strictly positive and finite.
    pub fn new(mean: f64, std: f64) -> Result<Self, EngineError> {
        if !mean.is_finite() {
            return Err(EngineError::InvalidPopulationMean(mean));
        }
        if !(std.is_finite() && std > 0.0) {
            return Err(EngineError::InvalidPopulationStd(std));
        }
        Ok(Self { mean, std })
    }

    /// Mean and population standard deviation of all values in `fold_changes`.
    pub fn from_fold_changes(fold_changes: &FoldChanges) -> Result<Self, EngineError> {
        let values: Vec<f64> = fold_changes.values().collect();
        let mean = summary::mean(&values).ok_or(EngineError::EmptyFoldChanges)?;
        let std = summary::population_std(&values).ok_or(EngineError::EmptyFoldChanges)?;
        Self::new(mean, std)
    }

    /// Uses the explicit parameters where given and derives the rest from `fold_changes`.
    pub fn resolve(
        params: &PopulationParams,
        fold_changes: &FoldChanges,
    ) -> Result<Self, EngineError> {
        match (params.mean, params.std) {
            (Some(mean), Some(std)) => Self::new(mean, std),
            (mean, std) => {
                let values: Vec<f64> = fold_changes.values().collect();
                let mean = match mean {
                    Some(m) => m,
                    None => summary::mean(&values).ok_or(EngineError::EmptyFoldChanges)?,
                };
                let std = match std {
                    Some(s) => s,
                    None => {
                        summary::population_std(&values).ok_or(EngineError::EmptyFoldChanges)?
                    }
                };
                Self::new(mean, std)
            }
        }
    }

    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    #[inline]
    pub fn std(&self) -> f64 {
        self.std
    }

    /// `(statistic − mP) · √weight / δ`, where `weight` is the (effective) set size.
    #[inline]
    pub fn z_score(&self, statistic: f64, weight: f64) -> f64 {
        (statistic - self.mean) * weight.sqrt() / self.std
    }
}

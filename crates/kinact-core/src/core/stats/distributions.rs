use super::StatsError;
use statrs::distribution::{ContinuousCDF, Discrete, Hypergeometric, Normal};

/// Two-sided p-value of a z-score under the standard normal null: `2 × (1 − Φ(|z|))`.
///
/// Uses the survival function directly so that large `|z|` do not lose precision to
/// cancellation.
pub fn two_sided_normal_p(z: f64) -> f64 {
    let standard = Normal::standard();
    (2.0 * standard.sf(z.abs())).min(1.0)
}

/// Probability of drawing exactly `observed` successes.
///
/// `population` items, of which `successes` are successes, `draws` drawn without
/// replacement.
pub fn hypergeometric_pmf(
    population: u64,
    successes: u64,
    draws: u64,
    observed: u64,
) -> Result<f64, StatsError> {
    let dist = Hypergeometric::new(population, successes, draws).map_err(|e| {
        StatsError::InvalidParameters(format!(
            "hypergeometric(population={}, successes={}, draws={}): {}",
            population, successes, draws, e
        ))
    })?;
    Ok(dist.pmf(observed))
}

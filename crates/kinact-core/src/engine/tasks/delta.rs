use super::{ensure_no_missing, measured_substrates, score_kinases};
use crate::core::models::adjacency::AdjacencyMatrix;
use crate::core::models::fold_change::FoldChanges;
use crate::core::stats::distributions::hypergeometric_pmf;
use crate::engine::error::EngineError;
use crate::engine::result::{KinaseScore, KseaResult};
use tracing::{debug, info, instrument};

/// Delta-count KSEA.
///
/// The activity of a kinase is the number of its measured substrates that are
/// significantly up-regulated minus those significantly down-regulated (−log10 p-value
/// above `cut_off`). Its p-value is the hypergeometric probability of seeing exactly that
/// many regulated substrates, given the number of measured sites and the number of
/// regulated sites among all kinase substrates; a kinase with no regulated substrate gets
/// a p-value of 1.
#[instrument(skip_all, name = "ksea_delta_task")]
pub fn run(
    fold_changes: &FoldChanges,
    p_values: &FoldChanges,
    interactions: &AdjacencyMatrix,
    cut_off: f64,
    minimum_set_size: usize,
) -> Result<KseaResult, EngineError> {
    ensure_no_missing(fold_changes)?;
    let minimum_set_size = minimum_set_size.max(1);
    let is_regulated = |site: &str| p_values.get(site).is_some_and(|p| p > cut_off);

    let total_measured = fold_changes.len() as u64;
    let total_regulated = interactions
        .sites()
        .into_iter()
        .filter(|&site| fold_changes.contains(site) && is_regulated(site))
        .count() as u64;
    debug!(total_measured, total_regulated, "Hypergeometric background computed.");

    let result = score_kinases(interactions, |kinase, substrates| {
        let measured = measured_substrates(fold_changes, substrates);
        let m = measured.len();
        if m < minimum_set_size {
            debug!(kinase, measured = m, "Skipping kinase: too few measured substrates.");
            return Ok(None);
        }

        let (mut up, mut down) = (0i64, 0i64);
        for site in measured.iter().filter(|s| is_regulated(s.site)) {
            if site.value > 0.0 {
                up += 1;
            } else if site.value < 0.0 {
                down += 1;
            }
        }
        let regulated_in_set = measured.iter().filter(|s| is_regulated(s.site)).count() as u64;

        let p_value = if regulated_in_set > 0 {
            hypergeometric_pmf(total_measured, total_regulated, m as u64, regulated_in_set)?
        } else {
            1.0
        };

        let activity = (up - down) as f64;
        Ok(Some(KinaseScore::new(kinase, m, activity, activity, p_value)))
    })?;

    info!(
        kinases = interactions.num_kinases(),
        scored = result.len(),
        cut_off,
        "KSEA delta scoring finished."
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tasks::test_support::*;

    #[test]
    fn counts_up_minus_down_among_regulated_substrates() {
        let fc = fold_changes(&[
            ("A", 1.0),
            ("B", 2.0),
            ("C", -1.0),
            ("D", 0.5),
            ("E", 3.0),
        ]);
        let p = fold_changes(&[("A", 2.0), ("B", 2.0), ("C", 2.0), ("D", 0.1), ("E", 0.1)]);
        let adj = interactions(&[("K1", &["A", "B", "C", "D"])]);

        let result = run(&fc, &p, &adj, 1.3, 1).unwrap();
        let k1 = result.get("K1").unwrap();
        assert_eq!(k1.activity, 1.0);
        assert_eq!(k1.score, 1.0);
        assert_eq!(k1.set_size, 4);

        // N = 5 measured, K = 3 regulated substrates, n = 4 in set, k = 3 observed:
        // C(4,3) * C(1,1) / C(5,3) = 4 / 10
        assert_close(k1.p_value, 0.4, 1e-12);
    }

    #[test]
    fn kinase_without_regulated_substrates_has_p_value_one() {
        let fc = fold_changes(&[("A", 1.0), ("B", -1.0)]);
        let p = fold_changes(&[("A", 0.2), ("B", 0.2)]);
        let adj = interactions(&[("K1", &["A", "B"])]);

        let result = run(&fc, &p, &adj, 1.3, 1).unwrap();
        let k1 = result.get("K1").unwrap();
        assert_eq!(k1.activity, 0.0);
        assert_eq!(k1.p_value, 1.0);
    }

    #[test]
    fn missing_p_values_count_as_not_regulated() {
        let fc = fold_changes(&[("A", 1.0), ("B", 1.0)]);
        let p = fold_changes(&[("A", 4.0)]);
        let adj = interactions(&[("K1", &["A", "B"])]);

        let result = run(&fc, &p, &adj, 1.3, 1).unwrap();
        assert_eq!(result.get("K1").unwrap().activity, 1.0);
    }
}

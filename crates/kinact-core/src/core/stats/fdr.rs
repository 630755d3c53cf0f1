/// Benjamini/Hochberg adjusted p-values, returned in input order.
///
/// `p_adj(i) = min_{j ≥ rank(i)} p_(j) · n / j`, capped at 1.
pub fn benjamini_hochberg(p_values: &[f64]) -> Vec<f64> {
    let n = p_values.len();
    if n == 0 {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| p_values[a].total_cmp(&p_values[b]));

    let mut adjusted = vec![0.0; n];
    let mut running_min = 1.0f64;
    for (rank, &idx) in order.iter().enumerate().rev() {
        let scaled = p_values[idx] * n as f64 / (rank + 1) as f64;
        running_min = running_min.min(scaled);
        adjusted[idx] = running_min;
    }
    adjusted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &[f64], b: &[f64]) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < 1e-12, "{} != {}", x, y);
        }
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(benjamini_hochberg(&[]).is_empty());
    }

    #[test]
    fn adjusts_and_preserves_input_order() {
        let adjusted = benjamini_hochberg(&[0.04, 0.01, 0.03, 0.02]);
        assert_close(&adjusted, &[0.04, 0.04, 0.04, 0.04]);

        let adjusted = benjamini_hochberg(&[0.01, 0.5, 0.02]);
        assert_close(&adjusted, &[0.03, 0.5, 0.03]);
    }

    #[test]
    fn adjusted_values_are_capped_at_one() {
        let adjusted = benjamini_hochberg(&[0.9, 0.8]);
        assert!(adjusted.iter().all(|&p| p <= 1.0));
        assert_close(&adjusted, &[0.9, 0.9]);
    }
}

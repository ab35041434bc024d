use tracing::debug;

use super::{Comparison, Decision};

/// Sidak threshold for a comparison with `remaining` comparisons still untested
/// (itself included): 1 - (1 - alpha)^(1 / remaining).
pub fn sidak_alpha(alpha: f64, remaining: usize) -> f64 {
    if remaining <= 1 {
        return alpha;
    }
    -((-alpha).ln_1p() / remaining as f64).exp_m1()
}

/// Apply the Holm-Sidak stepdown to `comparisons` in place.
///
/// Comparisons are stably sorted by ascending p-value, so equal p-values keep
/// their generation order. Each is then tested against its Sidak threshold
/// until the first one that fails; everything after it is left untested.
pub fn apply_stepdown(comparisons: &mut [Comparison], alpha: f64) {
    comparisons.sort_by(|a, b| a.p_value.total_cmp(&b.p_value));

    let total = comparisons.len();
    let mut still_comparing = true;

    for (i, comparison) in comparisons.iter_mut().enumerate() {
        comparison.rank = i + 1;

        if !still_comparing {
            comparison.adjusted_alpha = None;
            comparison.decision = Decision::NotEvaluated;
            continue;
        }

        let threshold = sidak_alpha(alpha, total - i);
        comparison.adjusted_alpha = Some(threshold);
        if comparison.p_value < threshold {
            comparison.decision = Decision::Reject;
        } else {
            comparison.decision = Decision::FailToReject;
            still_comparing = false;
        }

        debug!(
            comparison = %comparison.label,
            rank = comparison.rank,
            p_value = comparison.p_value,
            adjusted_alpha = threshold,
            decision = %comparison.decision,
            "stepdown"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comparison(label: &str, p_value: f64) -> Comparison {
        Comparison {
            label: label.to_string(),
            pair: (1, 2),
            mean_difference: 0.0,
            standard_error: 1.0,
            t_statistic: 0.0,
            p_value,
            rank: 0,
            adjusted_alpha: None,
            decision: Decision::NotEvaluated,
        }
    }

    fn labels(comparisons: &[Comparison]) -> Vec<&str> {
        comparisons.iter().map(|c| c.label.as_str()).collect()
    }

    fn decisions(comparisons: &[Comparison]) -> Vec<Decision> {
        comparisons.iter().map(|c| c.decision).collect()
    }

    #[test]
    fn test_sidak_alpha_single_comparison_is_alpha() {
        assert_eq!(sidak_alpha(0.05, 1), 0.05);
        assert_eq!(sidak_alpha(0.01, 1), 0.01);
    }

    #[test]
    fn test_sidak_alpha_values() {
        // 1 - 0.95^(1/6)
        assert!((sidak_alpha(0.05, 6) - 0.008512444).abs() < 1e-9);
        // 1 - 0.95^(1/2)
        assert!((sidak_alpha(0.05, 2) - 0.025320566).abs() < 1e-9);
    }

    #[test]
    fn test_sidak_alpha_increases_with_rank() {
        let total = 10;
        let thresholds: Vec<f64> = (0..total).map(|i| sidak_alpha(0.05, total - i)).collect();
        for pair in thresholds.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        assert_eq!(*thresholds.last().unwrap(), 0.05);
    }

    #[test]
    fn test_sorts_ascending_and_ranks() {
        let mut comparisons = vec![
            comparison("a", 0.3),
            comparison("b", 0.001),
            comparison("c", 0.02),
        ];
        apply_stepdown(&mut comparisons, 0.05);

        assert_eq!(labels(&comparisons), vec!["b", "c", "a"]);
        assert_eq!(
            comparisons.iter().map(|c| c.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_stops_at_first_failure() {
        // 0.04 would pass its own threshold (alpha) but is never tested.
        let mut comparisons = vec![
            comparison("a", 0.001),
            comparison("b", 0.03),
            comparison("c", 0.04),
        ];
        apply_stepdown(&mut comparisons, 0.05);

        assert_eq!(
            decisions(&comparisons),
            vec![
                Decision::Reject,
                Decision::FailToReject,
                Decision::NotEvaluated
            ]
        );
        assert_eq!(comparisons[0].adjusted_alpha, Some(sidak_alpha(0.05, 3)));
        assert_eq!(comparisons[1].adjusted_alpha, Some(sidak_alpha(0.05, 2)));
        assert_eq!(comparisons[2].adjusted_alpha, None);
    }

    #[test]
    fn test_all_rejected() {
        let mut comparisons = vec![
            comparison("a", 0.001),
            comparison("b", 0.002),
            comparison("c", 0.003),
        ];
        apply_stepdown(&mut comparisons, 0.05);

        assert!(comparisons.iter().all(|c| c.decision == Decision::Reject));
        assert_eq!(comparisons[2].adjusted_alpha, Some(0.05));
    }

    #[test]
    fn test_p_equal_to_threshold_fails() {
        let mut comparisons = vec![comparison("a", 0.05)];
        apply_stepdown(&mut comparisons, 0.05);
        assert_eq!(comparisons[0].decision, Decision::FailToReject);
    }

    #[test]
    fn test_ties_keep_generation_order() {
        let mut comparisons = vec![
            comparison("first", 0.2),
            comparison("second", 0.2),
            comparison("third", 0.2),
        ];
        apply_stepdown(&mut comparisons, 0.05);

        assert_eq!(labels(&comparisons), vec!["first", "second", "third"]);
        assert_eq!(
            decisions(&comparisons),
            vec![
                Decision::FailToReject,
                Decision::NotEvaluated,
                Decision::NotEvaluated
            ]
        );
    }

    #[test]
    fn test_monotone_decisions() {
        let mut comparisons: Vec<Comparison> = [0.04, 0.0001, 0.3, 0.002, 0.011, 0.5, 0.0005]
            .iter()
            .enumerate()
            .map(|(i, &p)| comparison(&format!("c{}", i), p))
            .collect();
        apply_stepdown(&mut comparisons, 0.05);

        let first_non_reject = comparisons
            .iter()
            .position(|c| c.decision != Decision::Reject)
            .unwrap_or(comparisons.len());
        assert!(comparisons[first_non_reject..]
            .iter()
            .all(|c| c.decision != Decision::Reject));
        assert!(comparisons[..first_non_reject]
            .iter()
            .all(|c| c.decision == Decision::Reject));
    }

    #[test]
    fn test_empty_is_noop() {
        let mut comparisons: Vec<Comparison> = Vec::new();
        apply_stepdown(&mut comparisons, 0.05);
        assert!(comparisons.is_empty());
    }
}

use serde::{Deserialize, Serialize};

use super::{Decision, GroupSummary, PooledVariance, TDistribution, Tail};

/// Which pairs of groups get compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonPlan {
    /// Every unordered pair (i, j) with i < j.
    AllPairs,
    /// Group 1 against each of the others.
    VersusControl,
}

impl ComparisonPlan {
    pub fn from_control(control: bool) -> Self {
        if control {
            ComparisonPlan::VersusControl
        } else {
            ComparisonPlan::AllPairs
        }
    }

    /// Number of comparisons the plan makes among `k` groups.
    pub fn count(&self, k: usize) -> usize {
        match self {
            ComparisonPlan::AllPairs => k * k.saturating_sub(1) / 2,
            ComparisonPlan::VersusControl => k.saturating_sub(1),
        }
    }

    /// 1-based index pairs in generation order.
    pub fn pairs(&self, k: usize) -> Vec<(usize, usize)> {
        match self {
            ComparisonPlan::AllPairs => (1..=k)
                .flat_map(|i| (i + 1..=k).map(move |j| (i, j)))
                .collect(),
            ComparisonPlan::VersusControl => (2..=k).map(|j| (1, j)).collect(),
        }
    }
}

/// One pairwise pooled-variance t-test and its stepdown outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// "i-j" using 1-based group indices.
    pub label: String,
    pub pair: (usize, usize),
    /// M_i - M_j.
    pub mean_difference: f64,
    pub standard_error: f64,
    /// Infinite when the pooled variance is zero, NaN when the means are also
    /// equal. Written to JSON as `"inf"`, `"-inf"` or `"nan"` in those cases.
    #[serde(with = "extended_f64")]
    pub t_statistic: f64,
    pub p_value: f64,
    /// 1-based position after sorting by p-value. 0 until the stepdown runs.
    pub rank: usize,
    /// Sidak threshold the p-value was tested against, `None` if never tested.
    pub adjusted_alpha: Option<f64>,
    pub decision: Decision,
}

impl Comparison {
    fn new(
        first: &GroupSummary,
        second: &GroupSummary,
        pooled: &PooledVariance,
        tail: Tail,
        dist: &dyn TDistribution,
    ) -> Self {
        let mean_difference = first.mean - second.mean;
        let standard_error =
            (pooled.variance * (1.0 / first.size as f64 + 1.0 / second.size as f64)).sqrt();
        let t_statistic = mean_difference / standard_error;
        let p_value = p_value(t_statistic, pooled.degrees_of_freedom as f64, tail, dist);

        Self {
            label: format!("{}-{}", first.index, second.index),
            pair: (first.index, second.index),
            mean_difference,
            standard_error,
            t_statistic,
            p_value,
            rank: 0,
            adjusted_alpha: None,
            decision: Decision::NotEvaluated,
        }
    }
}

/// Serde for `f64` values that may be infinite or NaN, which JSON numbers
/// cannot carry.
mod extended_f64 {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_str("nan")
        } else if *value == f64::INFINITY {
            serializer.serialize_str("inf")
        } else if *value == f64::NEG_INFINITY {
            serializer.serialize_str("-inf")
        } else {
            serializer.serialize_f64(*value)
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Named(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Named(name) => match name.as_str() {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                "nan" => Ok(f64::NAN),
                other => Err(de::Error::custom(format!(
                    "expected a number, \"inf\", \"-inf\" or \"nan\", got \"{}\"",
                    other
                ))),
            },
        }
    }
}

/// Evaluate the CDF, answering infinite arguments from its limits.
fn cdf_at(dist: &dyn TDistribution, t: f64, df: f64) -> f64 {
    if t == f64::INFINITY {
        1.0
    } else if t == f64::NEG_INFINITY {
        0.0
    } else {
        dist.cdf(t, df)
    }
}

/// p-value of `t` for the requested tail.
///
/// NaN arises only from 0/0 (equal means, zero pooled variance) and counts as
/// no evidence at all.
fn p_value(t: f64, df: f64, tail: Tail, dist: &dyn TDistribution) -> f64 {
    if t.is_nan() {
        return 1.0;
    }
    let p = match tail {
        Tail::TwoSided => 2.0 * cdf_at(dist, -t.abs(), df),
        Tail::Left => cdf_at(dist, t, df),
        Tail::Right => cdf_at(dist, -t, df),
    };
    p.min(1.0)
}

/// Run the t-test for every pair in the plan, in generation order.
pub fn build_comparisons(
    groups: &[GroupSummary],
    pooled: &PooledVariance,
    plan: ComparisonPlan,
    tail: Tail,
    dist: &dyn TDistribution,
) -> Vec<Comparison> {
    plan.pairs(groups.len())
        .into_iter()
        .map(|(i, j)| Comparison::new(&groups[i - 1], &groups[j - 1], pooled, tail, dist))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StudentsTDistribution;

    fn group(index: usize, size: usize, mean: f64, std_dev: f64) -> GroupSummary {
        GroupSummary {
            index,
            label: None,
            size,
            mean,
            std_dev,
            min: mean,
            max: mean,
        }
    }

    fn logistic(t: f64, _df: f64) -> f64 {
        1.0 / (1.0 + (-t).exp())
    }

    #[test]
    fn test_all_pairs_generation_order() {
        let pairs = ComparisonPlan::AllPairs.pairs(4);
        assert_eq!(
            pairs,
            vec![(1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)]
        );
    }

    #[test]
    fn test_control_generation_order() {
        let pairs = ComparisonPlan::VersusControl.pairs(4);
        assert_eq!(pairs, vec![(1, 2), (1, 3), (1, 4)]);
    }

    #[test]
    fn test_count_law() {
        for k in 2..10 {
            assert_eq!(ComparisonPlan::AllPairs.count(k), k * (k - 1) / 2);
            assert_eq!(ComparisonPlan::AllPairs.pairs(k).len(), k * (k - 1) / 2);
            assert_eq!(ComparisonPlan::VersusControl.count(k), k - 1);
            assert_eq!(ComparisonPlan::VersusControl.pairs(k).len(), k - 1);
        }
    }

    #[test]
    fn test_t_statistic_and_label() {
        let groups = vec![group(1, 4, 10.0, 1.0), group(2, 4, 12.0, 1.0)];
        let pooled = PooledVariance {
            degrees_of_freedom: 6,
            variance: 2.0,
        };

        let comparisons =
            build_comparisons(&groups, &pooled, ComparisonPlan::AllPairs, Tail::TwoSided, &logistic);

        assert_eq!(comparisons.len(), 1);
        let c = &comparisons[0];
        assert_eq!(c.label, "1-2");
        assert_eq!(c.pair, (1, 2));
        assert_eq!(c.mean_difference, -2.0);
        // sqrt(2 * (1/4 + 1/4)) = 1
        assert!((c.standard_error - 1.0).abs() < 1e-12);
        assert!((c.t_statistic + 2.0).abs() < 1e-12);
        assert!((c.p_value - 2.0 * logistic(-2.0, 6.0)).abs() < 1e-12);
        assert_eq!(c.decision, Decision::NotEvaluated);
        assert_eq!(c.adjusted_alpha, None);
    }

    #[test]
    fn test_tail_selection() {
        let dist = StudentsTDistribution::new();
        let t = -1.5;
        let two = p_value(t, 10.0, Tail::TwoSided, &dist);
        let left = p_value(t, 10.0, Tail::Left, &dist);
        let right = p_value(t, 10.0, Tail::Right, &dist);

        assert!((two - 2.0 * left).abs() < 1e-12);
        assert!((left + right - 1.0).abs() < 1e-12);
        assert!(left < right);
    }

    #[test]
    fn test_tail_symmetry_under_pair_swap() {
        let dist = StudentsTDistribution::new();
        let a = group(1, 5, 3.0, 1.0);
        let b = group(2, 6, 4.2, 1.3);
        let pooled = PooledVariance {
            degrees_of_freedom: 9,
            variance: 1.4,
        };

        let forward = Comparison::new(&a, &b, &pooled, Tail::Left, &dist);
        let swapped = Comparison::new(&b, &a, &pooled, Tail::Right, &dist);

        assert_eq!(forward.t_statistic, -swapped.t_statistic);
        assert_eq!(forward.p_value, swapped.p_value);
    }

    #[test]
    fn test_zero_variance_infinite_t() {
        let never_called = |_t: f64, _df: f64| -> f64 { panic!("cdf must not see infinite t") };
        let groups = vec![group(1, 3, 1.0, 0.0), group(2, 3, 2.0, 0.0)];
        let pooled = PooledVariance {
            degrees_of_freedom: 4,
            variance: 0.0,
        };

        for tail in [Tail::TwoSided, Tail::Left] {
            let c = &build_comparisons(&groups, &pooled, ComparisonPlan::AllPairs, tail, &never_called)[0];
            assert_eq!(c.t_statistic, f64::NEG_INFINITY);
            assert_eq!(c.p_value, 0.0);
        }

        let c = &build_comparisons(
            &groups,
            &pooled,
            ComparisonPlan::AllPairs,
            Tail::Right,
            &never_called,
        )[0];
        assert_eq!(c.p_value, 1.0);
    }

    #[test]
    fn test_zero_variance_equal_means_is_p_one() {
        let groups = vec![group(1, 3, 5.0, 0.0), group(2, 3, 5.0, 0.0)];
        let pooled = PooledVariance {
            degrees_of_freedom: 4,
            variance: 0.0,
        };

        for tail in [Tail::TwoSided, Tail::Left, Tail::Right] {
            let c = &build_comparisons(&groups, &pooled, ComparisonPlan::AllPairs, tail, &logistic)[0];
            assert!(c.t_statistic.is_nan());
            assert_eq!(c.p_value, 1.0);
        }
    }

    #[test]
    fn test_non_finite_t_statistic_survives_json() {
        let groups = vec![
            group(1, 3, 1.0, 0.0),
            group(2, 3, 2.0, 0.0),
            group(3, 3, 1.0, 0.0),
        ];
        let pooled = PooledVariance {
            degrees_of_freedom: 6,
            variance: 0.0,
        };
        let comparisons =
            build_comparisons(&groups, &pooled, ComparisonPlan::AllPairs, Tail::TwoSided, &logistic);

        let json = serde_json::to_value(&comparisons).unwrap();
        assert_eq!(json[0]["t_statistic"], "-inf");
        assert_eq!(json[1]["t_statistic"], "nan");
        assert_eq!(json[2]["t_statistic"], "inf");

        let parsed: Vec<Comparison> = serde_json::from_value(json).unwrap();
        assert_eq!(parsed[0].t_statistic, f64::NEG_INFINITY);
        assert!(parsed[1].t_statistic.is_nan());
        assert_eq!(parsed[2].t_statistic, f64::INFINITY);
    }

    #[test]
    fn test_finite_t_statistic_stays_a_number() {
        let groups = vec![group(1, 4, 10.0, 1.0), group(2, 4, 12.0, 1.0)];
        let pooled = PooledVariance {
            degrees_of_freedom: 6,
            variance: 2.0,
        };
        let comparisons =
            build_comparisons(&groups, &pooled, ComparisonPlan::AllPairs, Tail::TwoSided, &logistic);

        let mut json = serde_json::to_value(&comparisons[0]).unwrap();
        assert!(json["t_statistic"].is_number());

        json["t_statistic"] = "huge".into();
        assert!(serde_json::from_value::<Comparison>(json).is_err());
    }

    #[test]
    fn test_two_sided_p_value_capped_at_one() {
        // A stub whose CDF overshoots 0.5 at t = 0 must not yield p > 1.
        let sloppy = |_t: f64, _df: f64| 0.5000001;
        assert_eq!(p_value(0.0, 3.0, Tail::TwoSided, &sloppy), 1.0);
    }
}

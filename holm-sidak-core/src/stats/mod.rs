use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HolmSidakError;

/// Which tail of the t-distribution a comparison's p-value is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum Tail {
    /// H1: the two group means differ.
    #[default]
    TwoSided,
    /// H1: the first group's mean is lower than the second's.
    Left,
    /// H1: the first group's mean is higher than the second's.
    Right,
}

impl Tail {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tail::TwoSided => "two-sided",
            Tail::Left => "left",
            Tail::Right => "right",
        }
    }
}

impl fmt::Display for Tail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tail {
    type Err = HolmSidakError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "both" | "two-sided" | "two_sided" | "twosided" => Ok(Tail::TwoSided),
            "left" | "lower" => Ok(Tail::Left),
            "right" | "upper" => Ok(Tail::Right),
            other => Err(HolmSidakError::configuration(format!(
                "unrecognized tail '{}' (expected one of: both, left, right)",
                other
            ))),
        }
    }
}

impl TryFrom<String> for Tail {
    type Error = HolmSidakError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Outcome of one comparison after the stepdown pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Reject,
    FailToReject,
    /// Testing stopped at an earlier comparison.
    NotEvaluated,
}

impl Decision {
    pub fn is_reject(&self) -> bool {
        matches!(self, Decision::Reject)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Decision::Reject => "Reject H0",
            Decision::FailToReject => "Fail to reject H0",
            Decision::NotEvaluated => "No comparison made",
        };
        f.write_str(text)
    }
}

/// Cumulative distribution function of Student's t-distribution.
///
/// The procedure only ever consumes this as a black box, so callers can swap
/// in another numeric library or a deterministic stub.
pub trait TDistribution: Send + Sync {
    /// P(T <= t) for a t-distribution with `df` degrees of freedom.
    fn cdf(&self, t: f64, df: f64) -> f64;
}

impl<F> TDistribution for F
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    fn cdf(&self, t: f64, df: f64) -> f64 {
        self(t, df)
    }
}

mod comparison;
mod distribution;
mod stepdown;
mod summary;

pub use comparison::{build_comparisons, Comparison, ComparisonPlan};
pub use distribution::StudentsTDistribution;
pub use stepdown::{apply_stepdown, sidak_alpha};
pub use summary::{summarize, GroupSummary, PooledVariance};

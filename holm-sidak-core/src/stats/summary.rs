use serde::{Deserialize, Serialize};

use crate::error::{HolmSidakError, Result};
use crate::protocol::GroupInput;

/// Descriptive statistics for one input group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    /// 1-based position of the group in the caller's input.
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub size: usize,
    pub mean: f64,
    /// Sample standard deviation (n-1 denominator). 0.0 for a single observation.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl GroupSummary {
    /// Summarize one group's observations.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the group is empty or holds a non-finite value.
    pub fn from_observations(
        index: usize,
        label: Option<String>,
        data: &[f64],
    ) -> Result<Self> {
        if data.is_empty() {
            return Err(HolmSidakError::invalid_input(format!(
                "group {} has no observations",
                index
            )));
        }
        if let Some(position) = data.iter().position(|v| !v.is_finite()) {
            return Err(HolmSidakError::invalid_input(format!(
                "group {} observation {} is not finite ({})",
                index,
                position + 1,
                data[position]
            )));
        }

        let size = data.len();
        // A summed mean drifts for values not exact in binary; constant groups
        // must report the value itself with zero spread.
        let (mean, std_dev) = if data.iter().all(|&v| v == data[0]) {
            (data[0], 0.0)
        } else {
            let mean = data.iter().sum::<f64>() / size as f64;
            (mean, Self::variance(data, mean).sqrt())
        };
        let min = data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Ok(Self {
            index,
            label,
            size,
            mean,
            std_dev,
            min,
            max,
        })
    }

    /// Bessel-corrected sample variance; a lone observation has none.
    fn variance(data: &[f64], mean: f64) -> f64 {
        if data.len() < 2 {
            return 0.0;
        }
        let sum_sq_diff: f64 = data
            .iter()
            .map(|v| {
                let diff = v - mean;
                diff * diff
            })
            .sum();
        sum_sq_diff / (data.len() - 1) as f64
    }

    /// Name shown to users: the caller's label, or the group number.
    pub fn display_name(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => format!("Group {}", self.index),
        }
    }
}

/// Summarize every group, preserving input order as indices 1..=K.
///
/// # Errors
///
/// Returns `InvalidInput` for fewer than two groups, an empty group, or a
/// non-finite observation.
pub fn summarize(groups: &[GroupInput]) -> Result<Vec<GroupSummary>> {
    if groups.len() < 2 {
        return Err(HolmSidakError::invalid_input(format!(
            "at least 2 groups are required, got {}",
            groups.len()
        )));
    }

    groups
        .iter()
        .enumerate()
        .map(|(i, group)| GroupSummary::from_observations(i + 1, group.label.clone(), &group.data))
        .collect()
}

/// Pooled within-group variance and its degrees of freedom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PooledVariance {
    /// Total observations minus number of groups.
    pub degrees_of_freedom: usize,
    pub variance: f64,
}

impl PooledVariance {
    /// Pool the group variances, weighting each by its own degrees of freedom.
    ///
    /// S² = Σ (n_i - 1) s_i² / (N - K)
    ///
    /// # Errors
    ///
    /// Returns `DegenerateDesign` if N - K is not positive.
    pub fn estimate(groups: &[GroupSummary]) -> Result<Self> {
        let total_observations: usize = groups.iter().map(|g| g.size).sum();
        let degrees_of_freedom = total_observations.saturating_sub(groups.len());

        if degrees_of_freedom == 0 {
            return Err(HolmSidakError::DegenerateDesign {
                total_observations,
                groups: groups.len(),
            });
        }

        let sum_of_squares: f64 = groups
            .iter()
            .map(|g| (g.size - 1) as f64 * g.std_dev * g.std_dev)
            .sum();

        Ok(Self {
            degrees_of_freedom,
            variance: sum_of_squares / degrees_of_freedom as f64,
        })
    }
}

//! The Holm-Sidak procedure end to end.
//!
//! [`compute`] summarizes the groups, pools their variance, runs a
//! pooled-variance t-test for every required pair and applies the Holm-Sidak
//! stepdown. It is a pure function of its arguments.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{HolmSidakError, Result};
use crate::protocol::GroupInput;
use crate::stats::{
    apply_stepdown, build_comparisons, summarize, Comparison, ComparisonPlan, Decision,
    GroupSummary, PooledVariance, TDistribution, Tail,
};

/// Caller-supplied settings for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcedureOptions {
    /// Familywise significance level, in (0, 1).
    pub alpha: f64,
    pub tail: Tail,
    /// Compare group 1 against every other group instead of all pairs.
    pub control: bool,
}

impl Default for ProcedureOptions {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            tail: Tail::TwoSided,
            control: false,
        }
    }
}

impl ProcedureOptions {
    /// Check the options against a run with `groups` groups.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if alpha lies outside (0, 1) or control
    /// mode is requested with fewer than two groups.
    pub fn validate(&self, groups: usize) -> Result<()> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(HolmSidakError::configuration(format!(
                "alpha must be between 0 and 1 (exclusive), got {}",
                self.alpha
            )));
        }
        if self.control && groups < 2 {
            return Err(HolmSidakError::configuration(format!(
                "control mode needs a control and at least one other group, got {} group(s)",
                groups
            )));
        }
        Ok(())
    }
}

/// Everything one run of the procedure produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureResult {
    /// Group summaries in input order.
    pub groups: Vec<GroupSummary>,
    pub degrees_of_freedom: usize,
    pub pooled_variance: f64,
    /// Comparisons in ascending p-value order.
    pub comparisons: Vec<Comparison>,
    pub parameters: ProcedureOptions,
}

impl ProcedureResult {
    fn compose(
        groups: Vec<GroupSummary>,
        pooled: PooledVariance,
        comparisons: Vec<Comparison>,
        parameters: ProcedureOptions,
    ) -> Self {
        Self {
            groups,
            degrees_of_freedom: pooled.degrees_of_freedom,
            pooled_variance: pooled.variance,
            comparisons,
            parameters,
        }
    }

    /// Look up a comparison by its "i-j" label.
    pub fn comparison(&self, label: &str) -> Option<&Comparison> {
        self.comparisons.iter().find(|c| c.label == label)
    }

    /// Comparisons whose null hypothesis was rejected.
    pub fn rejected(&self) -> impl Iterator<Item = &Comparison> {
        self.comparisons.iter().filter(|c| c.decision.is_reject())
    }

    /// Number of comparisons with the given decision.
    pub fn count(&self, decision: Decision) -> usize {
        self.comparisons
            .iter()
            .filter(|c| c.decision == decision)
            .count()
    }
}

/// Run the Holm-Sidak procedure over `groups`.
///
/// Group order matters: it fixes the indices used in comparison labels and,
/// in control mode, makes the first group the control.
///
/// # Errors
///
/// * `ConfigurationError` for out-of-range options.
/// * `InvalidInput` for fewer than two groups, an empty group, or a
///   non-finite observation.
/// * `DegenerateDesign` if the pooled variance has no degrees of freedom.
pub fn compute(
    groups: &[GroupInput],
    options: &ProcedureOptions,
    dist: &dyn TDistribution,
) -> Result<ProcedureResult> {
    options.validate(groups.len())?;

    let summaries = summarize(groups)?;
    let pooled = PooledVariance::estimate(&summaries)?;
    debug!(
        groups = summaries.len(),
        degrees_of_freedom = pooled.degrees_of_freedom,
        pooled_variance = pooled.variance,
        "pooled variance"
    );

    let plan = ComparisonPlan::from_control(options.control);
    let mut comparisons = build_comparisons(&summaries, &pooled, plan, options.tail, dist);
    apply_stepdown(&mut comparisons, options.alpha);

    let result = ProcedureResult::compose(summaries, pooled, comparisons, *options);
    info!(
        comparisons = result.comparisons.len(),
        rejected = result.count(Decision::Reject),
        alpha = options.alpha,
        tail = %options.tail,
        control = options.control,
        "Holm-Sidak procedure complete"
    );

    Ok(result)
}

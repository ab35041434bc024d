use std::io::{self, Write};

use colored::Colorize;

use super::{ReportError, Reporter};
use crate::procedure::ProcedureResult;
use crate::stats::{Comparison, Decision, GroupSummary};

const RULE_WIDTH: usize = 96;

/// A reporter that prints the group summaries and comparison table.
#[derive(Debug, Clone, Default)]
pub struct TerminalReporter {
    /// Whether to use colors in output (defaults to true).
    use_colors: bool,
}

impl TerminalReporter {
    /// Create a new terminal reporter with default settings.
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// Create a terminal reporter with color output disabled.
    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    /// Format a p-value, collapsing very small values.
    fn format_p_value(p: f64) -> String {
        if p < 0.0001 {
            "<0.0001".to_string()
        } else {
            format!("{:.4}", p)
        }
    }

    /// Format the threshold a comparison was tested against.
    fn format_adjusted_alpha(adjusted_alpha: Option<f64>) -> String {
        match adjusted_alpha {
            Some(alpha) => format!("{:.4}", alpha),
            None => "-".to_string(),
        }
    }

    fn format_decision(&self, decision: Decision) -> String {
        let text = decision.to_string();
        if !self.use_colors {
            return text;
        }
        match decision {
            Decision::Reject => text.green().bold().to_string(),
            Decision::FailToReject => text.yellow().to_string(),
            Decision::NotEvaluated => text.dimmed().to_string(),
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.use_colors {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Print the run parameters.
    fn print_header(&self, writer: &mut dyn Write, result: &ProcedureResult) -> io::Result<()> {
        let params = &result.parameters;
        writeln!(writer)?;
        writeln!(
            writer,
            "{}",
            self.bold("Holm-Sidak multiple pairwise t-test comparisons")
        )?;
        writeln!(
            writer,
            "alpha = {}, tail = {}, {}",
            params.alpha,
            params.tail,
            if params.control {
                "group 1 is the control"
            } else {
                "all pairs"
            }
        )?;
        Ok(())
    }

    /// Print one line per group.
    fn print_groups(&self, writer: &mut dyn Write, groups: &[GroupSummary]) -> io::Result<()> {
        writeln!(writer)?;
        let header = format!(
            "{:>6} {:<24} {:>6} {:>14} {:>14} {:>12} {:>12}",
            "Group", "Label", "N", "Mean", "Std Dev", "Min", "Max"
        );
        writeln!(writer, "{}", self.bold(&header))?;
        writeln!(writer, "{}", "-".repeat(RULE_WIDTH))?;

        for group in groups {
            let label = match &group.label {
                Some(label) if label.chars().count() > 24 => {
                    format!("{}...", label.chars().take(21).collect::<String>())
                }
                Some(label) => label.clone(),
                None => "-".to_string(),
            };
            writeln!(
                writer,
                "{:>6} {:<24} {:>6} {:>14.4} {:>14.4} {:>12.4} {:>12.4}",
                group.index,
                label,
                group.size,
                group.mean,
                group.std_dev,
                group.min,
                group.max
            )?;
        }
        Ok(())
    }

    fn print_pooled(&self, writer: &mut dyn Write, result: &ProcedureResult) -> io::Result<()> {
        writeln!(writer)?;
        writeln!(
            writer,
            "Pooled variance: {:.6}    Degrees of freedom: {}",
            result.pooled_variance, result.degrees_of_freedom
        )?;
        Ok(())
    }

    fn print_comparison_header(&self, writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer)?;
        let header = format!(
            "{:<12} {:>12} {:>10} {:>10} {:>16} {:>20}",
            "Comparison", "Difference", "t", "p-value", "Adjusted alpha", "Decision"
        );
        writeln!(writer, "{}", self.bold(&header))?;
        writeln!(writer, "{}", "-".repeat(RULE_WIDTH))?;
        Ok(())
    }

    fn print_comparison_row(
        &self,
        writer: &mut dyn Write,
        comparison: &Comparison,
    ) -> io::Result<()> {
        let decision = self.format_decision(comparison.decision);

        // Pad by visible width; the colored string carries ANSI escapes.
        let decision_padding = 20_usize.saturating_sub(comparison.decision.to_string().len());

        writeln!(
            writer,
            "{:<12} {:>12.4} {:>10.4} {:>10} {:>16} {:>width$}{}",
            comparison.label,
            comparison.mean_difference,
            comparison.t_statistic,
            Self::format_p_value(comparison.p_value),
            Self::format_adjusted_alpha(comparison.adjusted_alpha),
            "",
            decision,
            width = decision_padding,
        )?;
        Ok(())
    }

    /// Print the decision counts.
    fn print_summary(&self, writer: &mut dyn Write, result: &ProcedureResult) -> io::Result<()> {
        writeln!(writer)?;
        writeln!(writer, "{}", "-".repeat(RULE_WIDTH))?;

        write!(writer, "{} ", self.bold("Summary:"))?;

        let rejected = format!("{} rejected", result.count(Decision::Reject));
        let retained = format!("{} not rejected", result.count(Decision::FailToReject));
        let skipped = format!("{} not evaluated", result.count(Decision::NotEvaluated));

        if self.use_colors {
            writeln!(
                writer,
                "{}, {}, {}",
                rejected.green(),
                retained.yellow(),
                skipped.dimmed()
            )?;
        } else {
            writeln!(writer, "{}, {}, {}", rejected, retained, skipped)?;
        }

        writeln!(writer)?;
        Ok(())
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, result: &ProcedureResult, writer: &mut dyn Write) -> Result<(), ReportError> {
        self.print_header(writer, result)?;
        self.print_groups(writer, &result.groups)?;
        self.print_pooled(writer, result)?;

        self.print_comparison_header(writer)?;
        for comparison in &result.comparisons {
            self.print_comparison_row(writer, comparison)?;
        }

        self.print_summary(writer, result)?;

        Ok(())
    }
}

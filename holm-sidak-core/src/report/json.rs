use std::io::Write;

use super::{ReportError, Reporter};
use crate::procedure::ProcedureResult;

/// Writes the result as a pretty-printed JSON document.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for JsonReporter {
    fn report(&self, result: &ProcedureResult, writer: &mut dyn Write) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(&mut *writer, result)?;
        writeln!(writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procedure::{compute, ProcedureOptions};
    use crate::protocol::GroupInput;
    use crate::stats::StudentsTDistribution;

    #[test]
    fn test_json_report_parses_back() {
        let groups = vec![
            GroupInput::labeled("a", vec![1.0, 2.0, 3.0]),
            GroupInput::labeled("b", vec![2.0, 3.0, 4.5]),
        ];
        let result = compute(
            &groups,
            &ProcedureOptions::default(),
            &StudentsTDistribution::new(),
        )
        .unwrap();

        let mut buffer = Vec::new();
        JsonReporter::new().report(&result, &mut buffer).unwrap();

        let parsed: ProcedureResult = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed.groups.len(), 2);
        assert_eq!(parsed.groups[1].label.as_deref(), Some("b"));
        assert_eq!(parsed.degrees_of_freedom, 4);
        assert_eq!(parsed.comparisons[0].label, "1-2");
        assert_eq!(parsed.comparisons[0].decision, result.comparisons[0].decision);
        assert_eq!(parsed.parameters, result.parameters);
    }

    #[test]
    fn test_zero_variance_report_parses_back() {
        let groups = vec![
            GroupInput::new(vec![0.1, 0.1, 0.1]),
            GroupInput::new(vec![0.3, 0.3]),
            GroupInput::new(vec![0.1; 4]),
        ];
        let result = compute(
            &groups,
            &ProcedureOptions::default(),
            &StudentsTDistribution::new(),
        )
        .unwrap();

        let mut buffer = Vec::new();
        JsonReporter::new().report(&result, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(!text.contains("\"t_statistic\": null"));
        assert!(text.contains("\"t_statistic\": \"nan\""));

        let parsed: ProcedureResult = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.pooled_variance, 0.0);
        assert_eq!(parsed.comparisons.len(), result.comparisons.len());
        for (back, original) in parsed.comparisons.iter().zip(&result.comparisons) {
            assert_eq!(back.label, original.label);
            assert_eq!(back.decision, original.decision);
            assert_eq!(back.p_value, original.p_value);
            if original.t_statistic.is_nan() {
                assert!(back.t_statistic.is_nan());
            } else {
                assert_eq!(back.t_statistic, original.t_statistic);
            }
        }
    }
}

//! Core of the Holm-Sidak multiple comparisons procedure.
//!
//! Compares K independent groups with pooled-variance Student's t-tests, either
//! every pair or a control group against the rest, and controls the
//! familywise error rate with the Holm-Sidak stepdown. The Student's t CDF is
//! injected through [`TDistribution`], so the procedure itself is pure and
//! free of global state.

pub mod error;
pub mod procedure;
pub mod protocol;
pub mod report;
pub mod stats;

// Re-export main types for convenience
pub use error::HolmSidakError;
pub use procedure::{compute, ProcedureOptions, ProcedureResult};
pub use protocol::{AnalysisRequest, GroupInput, RequestOptions};
pub use report::{JsonReporter, ReportError, Reporter, TerminalReporter};
pub use stats::{
    Comparison, ComparisonPlan, Decision, GroupSummary, PooledVariance, StudentsTDistribution,
    TDistribution, Tail,
};

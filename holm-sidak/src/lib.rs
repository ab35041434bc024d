//! holm-sidak: Holm-Sidak multiple pairwise t-test comparisons
//!
//! This library wires the command line, configuration file and input
//! adapters to the procedure in `holm-sidak-core`.

pub mod cli;
pub mod config;
pub mod input;
pub mod runner;

// Re-export core types for convenience
pub use holm_sidak_core::protocol;
pub use holm_sidak_core::{
    compute, AnalysisRequest, Comparison, Decision, GroupInput, GroupSummary, HolmSidakError,
    JsonReporter, ProcedureOptions, ProcedureResult, ReportError, Reporter, RequestOptions,
    StudentsTDistribution, TDistribution, Tail, TerminalReporter,
};

// Re-export main types from this crate
pub use cli::Cli;
pub use config::{Config, OutputFormat};
pub use input::{parse_switch, split_grouped, InputError};
pub use runner::{run, Analysis};

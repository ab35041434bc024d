use std::io::Write;

use thiserror::Error;

use crate::procedure::ProcedureResult;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Renders a finished [`ProcedureResult`].
pub trait Reporter: Send + Sync {
    fn report(&self, result: &ProcedureResult, writer: &mut dyn Write) -> Result<(), ReportError>;
}

mod json;
mod terminal;
pub use json::JsonReporter;
pub use terminal::TerminalReporter;

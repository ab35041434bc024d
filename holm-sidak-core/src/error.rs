use thiserror::Error;

/// Errors that can occur while running the Holm-Sidak procedure.
///
/// Every failure is a problem with the caller's input or configuration. The
/// procedure never returns a partial result alongside an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HolmSidakError {
    /// The groups or their observations are unusable.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Pooling left no degrees of freedom for the t-distribution.
    #[error(
        "Degenerate design: {total_observations} observations across {groups} groups leave no degrees of freedom"
    )]
    DegenerateDesign {
        total_observations: usize,
        groups: usize,
    },

    /// The procedure options are out of range or unrecognized.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl HolmSidakError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError(message.into())
    }
}

pub type Result<T> = std::result::Result<T, HolmSidakError>;

use thiserror::Error;

/// Errors raised by the possibility engine.
///
/// Every variant is recoverable: the engine rejects the offending mutation and
/// keeps its last valid state.
#[derive(Debug, Error)]
pub enum PossibilityError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("unknown copula '{0}', expected 'independence' or 'unknown'")]
    UnknownCopula(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    JsonParseError(#[from] serde_json::Error),
}

impl PossibilityError {
    pub fn invalid_parameter(msg: impl Into<String>) -> PossibilityError {
        PossibilityError::InvalidParameter(msg.into())
    }

    pub fn invalid_configuration(msg: impl Into<String>) -> PossibilityError {
        PossibilityError::InvalidConfiguration(msg.into())
    }
}

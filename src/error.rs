use thiserror::Error;

/// Errors raised by the training domain model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MajorError {
    /// numeric value outside 0..=99
    #[error("value out of range: {0}")]
    Range(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// operation called in the wrong session lifecycle state
    #[error("invalid state: {0}")]
    InvalidState(String),
}

pub type Result<T> = std::result::Result<T, MajorError>;

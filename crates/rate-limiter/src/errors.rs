use thiserror::Error;

/// Configuration and lookup failures. None of these are per-request
/// conditions: a duplicate registration or an unknown policy name is a
/// programmer error and must fail loudly rather than default to "no limit".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RateLimitError {
    #[error("rate policy '{0}' is already registered")]
    DuplicatePolicy(String),
    #[error("unknown rate policy '{0}'")]
    UnknownPolicy(String),
    #[error("invalid rate policy '{name}': {message}")]
    InvalidPolicy { name: String, message: String },
    #[error("io error: {0}")]
    Io(String),
    #[error("invalid policy file: {0}")]
    Invalid(String),
}

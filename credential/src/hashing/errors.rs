use thiserror::Error;

use super::config::Field;

/// Error for hashing policy validation failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HashingConfigError {
    #[error("Hashing parameter {field} must be positive")]
    ZeroValue { field: Field },

    #[error("Minimum secret length {min} exceeds maximum secret length {max}")]
    SecretLengthRange { min: u32, max: u32 },

    #[error("Hashing parameters rejected: {0}")]
    InvalidParams(String),
}

/// Error for plaintext secrets that fall outside the length policy.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecretLengthError {
    #[error("Secret too short: minimum {min} characters, got {actual}")]
    TooShort { min: u32, actual: usize },

    #[error("Secret too long: maximum {max} characters, got {actual}")]
    TooLong { max: u32, actual: usize },
}

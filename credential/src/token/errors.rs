use thiserror::Error;

/// Error type for shared-secret token issuance.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to decode shared secret")]
    Decode(#[source] base64::DecodeError),

    #[error("Failed to sign token: {0}")]
    Signing(String),

    #[error("Failed to marshal token response: {0}")]
    Marshal(String),
}

impl TokenError {
    pub fn is_decode(&self) -> bool {
        matches!(self, TokenError::Decode(_))
    }

    pub fn is_signing(&self) -> bool {
        matches!(self, TokenError::Signing(_))
    }

    pub fn is_marshal(&self) -> bool {
        matches!(self, TokenError::Marshal(_))
    }
}

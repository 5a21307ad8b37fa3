use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::errors::TokenError;

/// Raw key bytes shared between token issuer and validator.
///
/// Decoded from the base64 form handed to clients. The bytes never leave
/// this type except as a signing key, and `Debug` does not print them.
#[derive(Clone, PartialEq, Eq)]
pub struct SharedSecret(Vec<u8>);

impl SharedSecret {
    /// Decode a base64-encoded client secret.
    ///
    /// Expects the standard alphabet with padding.
    ///
    /// # Errors
    /// * `Decode` - Input is not valid base64
    pub fn from_base64(encoded: &str) -> Result<Self, TokenError> {
        STANDARD
            .decode(encoded.as_bytes())
            .map(Self)
            .map_err(TokenError::Decode)
    }

    /// Generate a fresh random secret of `length` bytes from the OS RNG.
    pub fn generate(length: usize) -> Self {
        let mut bytes = vec![0u8; length];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Encode the secret in the base64 form issued to clients.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSecret")
            .field("len", &self.0.len())
            .finish_non_exhaustive()
    }
}

/// Generate a base64-encoded client secret of `length` random bytes.
pub fn generate_client_secret(length: usize) -> String {
    SharedSecret::generate(length).to_base64()
}

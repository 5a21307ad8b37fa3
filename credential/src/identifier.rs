use std::fmt;

use uuid::Uuid;

/// Deterministic, name-based entity identifier.
///
/// Derived as a version 5 UUID from the URL namespace and a caller-supplied
/// basis, so two parties that share the basis compute the same identifier
/// without coordinating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identifier(Uuid);

impl Identifier {
    /// Derive an identifier from a basis string.
    ///
    /// # Arguments
    /// * `basis` - Arbitrary string; an empty basis is accepted but collides with every other empty basis
    ///
    /// # Returns
    /// Identifier that is identical for identical bases
    pub fn from_basis(basis: &str) -> Self {
        Self(Uuid::new_v5(&Uuid::NAMESPACE_URL, basis.as_bytes()))
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Generate the canonical 36-character identifier string for a basis.
pub fn generate_identifier(basis: &str) -> String {
    Identifier::from_basis(basis).to_string()
}

//! Client credential utilities library
//!
//! Provides the credential core of an OAuth2 client-credentials service:
//! - Shared-secret (HS256) access token issuance
//! - Memory-hard secret hashing policy (Argon2 cost parameters)
//! - Deterministic, name-based entity identifiers
//!
//! HTTP handlers, persistence and the hashing routine itself live in the
//! services that consume this crate.
//!
//! # Examples
//!
//! ## Identifiers
//! ```
//! use credential::generate_identifier;
//!
//! let id = generate_identifier("client-alpha");
//! assert_eq!(id.len(), 36);
//! assert_eq!(id, generate_identifier("client-alpha"));
//! ```
//!
//! ## Hashing Policy
//! ```
//! use credential::CredentialHashingConfig;
//!
//! let policy = CredentialHashingConfig::builder()
//!     .set_time(3)
//!     .set_memory(64)
//!     .finalize()
//!     .unwrap();
//! assert_eq!(policy.memory(), 64 * 1024);
//! ```
//!
//! ## Token Issuance
//! ```
//! use credential::{generate_client_secret, issue_shared_secret_token, Claims};
//!
//! let secret = generate_client_secret(32);
//! let claims = Claims::for_client("client-alpha", "https://auth.example.com", "api", 3600);
//! let response = issue_shared_secret_token(&secret, &claims, 3600).unwrap();
//! assert_eq!(response.expires_in, 3600);
//! ```

pub mod hashing;
pub mod identifier;
pub mod settings;
pub mod token;

// Re-export commonly used items
pub use hashing::CredentialHashingConfig;
pub use hashing::CredentialHashingConfigBuilder;
pub use hashing::HashingConfigError;
pub use hashing::HashingConfigSource;
pub use hashing::SecretLengthError;
pub use identifier::generate_identifier;
pub use identifier::Identifier;
pub use settings::Settings;
pub use settings::SettingsError;
pub use settings::TokenSettings;
pub use token::generate_client_secret;
pub use token::issue_shared_secret_token;
pub use token::Claims;
pub use token::SharedSecret;
pub use token::TokenError;
pub use token::TokenIssuer;
pub use token::TokenResponse;
pub use token::TokenType;

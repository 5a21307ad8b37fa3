pub mod config;
pub mod errors;
pub mod source;

pub use config::CredentialHashingConfig;
pub use config::CredentialHashingConfigBuilder;
pub use config::Field;
pub use config::Provenance;
pub use errors::HashingConfigError;
pub use errors::SecretLengthError;
pub use source::HashingConfigSource;

use std::env;
use std::path::Path;

use config::Config;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use thiserror::Error;

use crate::hashing::CredentialHashingConfig;
use crate::hashing::HashingConfigError;

/// Token issuance configuration, read from the `token` table.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct TokenSettings {
    pub issuer: String,
    pub audience: String,
    pub expires_in: u32,
}

impl TokenSettings {
    pub fn from_source(source: &Config) -> Result<Self, ConfigError> {
        source.get("token")
    }
}

/// Error for settings loading failures.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid hashing policy: {0}")]
    Hashing(#[from] HashingConfigError),
}

/// Credential settings: token issuance plus the finalized hashing policy.
#[derive(Debug, Clone)]
pub struct Settings {
    pub token: TokenSettings,
    pub hashing: CredentialHashingConfig,
}

impl Settings {
    /// Load settings from files with environment variable overrides.
    ///
    /// # Configuration Priority (highest to lowest)
    /// 1. Environment variables (ARGON__TIME, TOKEN__ISSUER, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// # Errors
    /// * `Config` - Sources could not be read or the `token` table is missing
    /// * `Hashing` - The `argon` table is incomplete or violates the policy invariants
    pub fn load() -> Result<Self, SettingsError> {
        let source = load_source()?;
        Self::from_source(&source)
    }

    /// Build settings from an already layered source.
    pub fn from_source(source: &Config) -> Result<Self, SettingsError> {
        let token = TokenSettings::from_source(source)?;
        let hashing = CredentialHashingConfig::builder()
            .load_from(source)
            .finalize()?;

        tracing::info!(
            issuer = %token.issuer,
            audience = %token.audience,
            expires_in = token.expires_in,
            "Credential settings loaded"
        );

        Ok(Self { token, hashing })
    }
}

/// Build the layered configuration source from the `config` directory.
pub fn load_source() -> Result<Config, ConfigError> {
    load_source_from(Path::new("config"))
}

/// Build the layered configuration source from files in `dir`.
///
/// Reads `{dir}/default`, then `{dir}/{RUN_MODE}` (RUN_MODE defaults to
/// `development`), then unprefixed environment variables with `__` separating
/// nesting levels.
pub fn load_source_from(dir: &Path) -> Result<Config, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

    Config::builder()
        // Start with default configuration
        .add_source(File::with_name(&dir.join("default").to_string_lossy()).required(false))
        // Layer on environment-specific configuration
        .add_source(File::with_name(&dir.join(&run_mode).to_string_lossy()).required(false))
        // Layer on environment variables (with __ as separator)
        // Example: ARGON__TIME=3 overrides argon.time
        .add_source(Environment::default().separator("__"))
        .build()
}

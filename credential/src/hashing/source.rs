use config::Config;
use config::ConfigError;

/// Port for reading hashing parameters from an external configuration backend.
///
/// Getters report the zero value for keys the backend does not hold. Memory is
/// read in kibibytes, the unit the hashing routine consumes.
pub trait HashingConfigSource {
    fn time(&self) -> u32;
    fn memory(&self) -> u32;
    fn threads(&self) -> u8;
    fn key_length(&self) -> u32;
    fn salt_length(&self) -> u32;
    fn min_secret_length(&self) -> u32;
    fn max_secret_length(&self) -> u32;
}

/// Keys read from layered configuration, all under the `argon` table.
pub mod keys {
    pub const TIME: &str = "argon.time";
    pub const MEMORY: &str = "argon.memory";
    pub const THREADS: &str = "argon.threads";
    pub const KEY_LENGTH: &str = "argon.key_length";
    pub const SALT_LENGTH: &str = "argon.salt_length";
    pub const MIN_SECRET_LENGTH: &str = "argon.min_secret_length";
    pub const MAX_SECRET_LENGTH: &str = "argon.max_secret_length";
}

impl HashingConfigSource for Config {
    fn time(&self) -> u32 {
        read_or_zero(self, keys::TIME)
    }

    fn memory(&self) -> u32 {
        read_or_zero(self, keys::MEMORY)
    }

    fn threads(&self) -> u8 {
        read_or_zero(self, keys::THREADS)
    }

    fn key_length(&self) -> u32 {
        read_or_zero(self, keys::KEY_LENGTH)
    }

    fn salt_length(&self) -> u32 {
        read_or_zero(self, keys::SALT_LENGTH)
    }

    fn min_secret_length(&self) -> u32 {
        read_or_zero(self, keys::MIN_SECRET_LENGTH)
    }

    fn max_secret_length(&self) -> u32 {
        read_or_zero(self, keys::MAX_SECRET_LENGTH)
    }
}

fn read_or_zero<T>(config: &Config, key: &str) -> T
where
    T: TryFrom<i64> + Default,
{
    match config.get_int(key) {
        Ok(value) => T::try_from(value).unwrap_or_else(|_| {
            tracing::warn!(key, value, "Configuration value out of range, reading as zero");
            T::default()
        }),
        Err(ConfigError::NotFound(_)) => {
            tracing::warn!(key, "Configuration key missing, reading as zero");
            T::default()
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "Configuration value unreadable, reading as zero");
            T::default()
        }
    }
}

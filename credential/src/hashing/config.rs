use std::fmt;

use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::HashingConfigError;
use super::errors::SecretLengthError;
use super::source::HashingConfigSource;

/// Tunable parameters of the memory-hard secret hashing policy.
///
/// Only obtainable through [`CredentialHashingConfigBuilder::finalize`] or
/// [`Default`], so every instance in circulation satisfies the policy
/// invariants: all fields positive and `min_secret_length <= max_secret_length`.
/// Fields are read-only once built; share it by reference or clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialHashingConfig {
    time: u32,
    memory: u32,
    threads: u8,
    key_length: u32,
    salt_length: u32,
    min_secret_length: u32,
    max_secret_length: u32,
}

impl CredentialHashingConfig {
    pub const DEFAULT_TIME: u32 = 1;
    pub const DEFAULT_MEMORY_KIB: u32 = 16 * 1024;
    pub const DEFAULT_THREADS: u8 = 1;
    pub const DEFAULT_KEY_LENGTH: u32 = 16;
    pub const DEFAULT_SALT_LENGTH: u32 = 32;
    pub const DEFAULT_MIN_SECRET_LENGTH: u32 = 12;
    pub const DEFAULT_MAX_SECRET_LENGTH: u32 = 48;

    /// Start a builder seeded with the default policy.
    pub fn builder() -> CredentialHashingConfigBuilder {
        CredentialHashingConfigBuilder::new()
    }

    /// Number of hashing iterations.
    pub fn time(&self) -> u32 {
        self.time
    }

    /// Memory cost in kibibytes.
    pub fn memory(&self) -> u32 {
        self.memory
    }

    /// Degree of parallelism.
    pub fn threads(&self) -> u8 {
        self.threads
    }

    /// Length in bytes of the derived hash.
    pub fn key_length(&self) -> u32 {
        self.key_length
    }

    /// Length in bytes of the generated salt.
    pub fn salt_length(&self) -> u32 {
        self.salt_length
    }

    pub fn min_secret_length(&self) -> u32 {
        self.min_secret_length
    }

    pub fn max_secret_length(&self) -> u32 {
        self.max_secret_length
    }

    /// Check a plaintext secret against the length policy.
    ///
    /// Length is counted in characters, not bytes.
    ///
    /// # Errors
    /// * `TooShort` - Secret has fewer than `min_secret_length` characters
    /// * `TooLong` - Secret has more than `max_secret_length` characters
    pub fn check_secret_length(&self, secret: &str) -> Result<(), SecretLengthError> {
        let actual = secret.chars().count();
        if actual < self.min_secret_length as usize {
            Err(SecretLengthError::TooShort {
                min: self.min_secret_length,
                actual,
            })
        } else if actual > self.max_secret_length as usize {
            Err(SecretLengthError::TooLong {
                max: self.max_secret_length,
                actual,
            })
        } else {
            Ok(())
        }
    }

    /// Convert the policy into Argon2 cost parameters.
    ///
    /// # Errors
    /// * `InvalidParams` - Argon2 rejects the combination (e.g. memory below 8 KiB per thread)
    pub fn argon2_params(&self) -> Result<Params, HashingConfigError> {
        Params::new(
            self.memory,
            self.time,
            u32::from(self.threads),
            Some(self.key_length as usize),
        )
        .map_err(|e| HashingConfigError::InvalidParams(e.to_string()))
    }

    /// Build an Argon2id context carrying this policy's cost parameters.
    ///
    /// # Errors
    /// * `InvalidParams` - Argon2 rejects the parameters
    pub fn argon2(&self) -> Result<Argon2<'static>, HashingConfigError> {
        Ok(Argon2::new(
            Algorithm::Argon2id,
            Version::V0x13,
            self.argon2_params()?,
        ))
    }
}

impl Default for CredentialHashingConfig {
    fn default() -> Self {
        Self {
            time: Self::DEFAULT_TIME,
            memory: Self::DEFAULT_MEMORY_KIB,
            threads: Self::DEFAULT_THREADS,
            key_length: Self::DEFAULT_KEY_LENGTH,
            salt_length: Self::DEFAULT_SALT_LENGTH,
            min_secret_length: Self::DEFAULT_MIN_SECRET_LENGTH,
            max_secret_length: Self::DEFAULT_MAX_SECRET_LENGTH,
        }
    }
}

/// Names a single hashing policy parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Time,
    Memory,
    Threads,
    KeyLength,
    SaltLength,
    MinSecretLength,
    MaxSecretLength,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Time,
        Field::Memory,
        Field::Threads,
        Field::KeyLength,
        Field::SaltLength,
        Field::MinSecretLength,
        Field::MaxSecretLength,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Time => "time",
            Field::Memory => "memory",
            Field::Threads => "threads",
            Field::KeyLength => "key_length",
            Field::SaltLength => "salt_length",
            Field::MinSecretLength => "min_secret_length",
            Field::MaxSecretLength => "max_secret_length",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a parameter's current value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provenance {
    #[default]
    Default,
    External,
    Override,
}

/// Mutable staging area for a [`CredentialHashingConfig`].
///
/// Setters perform no validation; [`finalize`](Self::finalize) is the only
/// way out and rejects values the hashing routine cannot use. Every field
/// remembers its [`Provenance`], so a [`load_from`](Self::load_from) that
/// discards earlier overrides is visible rather than silent.
#[derive(Debug, Clone)]
pub struct CredentialHashingConfigBuilder {
    values: CredentialHashingConfig,
    provenance: [Provenance; 7],
}

impl CredentialHashingConfigBuilder {
    /// Create a builder seeded with the default policy.
    pub fn new() -> Self {
        Self {
            values: CredentialHashingConfig::default(),
            provenance: [Provenance::Default; 7],
        }
    }

    /// Replace every parameter with the values held by an external source.
    ///
    /// This is a wholesale replacement, not a merge: overrides applied
    /// earlier are discarded and keys missing from the source arrive as zero,
    /// which [`finalize`](Self::finalize) then rejects.
    ///
    /// # Arguments
    /// * `source` - Configuration backend exposing the seven typed getters
    pub fn load_from<S>(&mut self, source: &S) -> &mut Self
    where
        S: HashingConfigSource + ?Sized,
    {
        self.values = CredentialHashingConfig {
            time: source.time(),
            memory: source.memory(),
            threads: source.threads(),
            key_length: source.key_length(),
            salt_length: source.salt_length(),
            min_secret_length: source.min_secret_length(),
            max_secret_length: source.max_secret_length(),
        };
        self.provenance = [Provenance::External; 7];
        self
    }

    /// Set the number of hashing iterations.
    pub fn set_time(&mut self, time: u32) -> &mut Self {
        self.values.time = time;
        self.mark(Field::Time)
    }

    /// Set the memory cost in megabytes.
    ///
    /// Stored in kibibytes (`megabytes * 1024`), saturating at `u32::MAX`.
    pub fn set_memory(&mut self, megabytes: u32) -> &mut Self {
        self.values.memory = megabytes.saturating_mul(1024);
        self.mark(Field::Memory)
    }

    /// Set the degree of parallelism.
    pub fn set_threads(&mut self, threads: u8) -> &mut Self {
        self.values.threads = threads;
        self.mark(Field::Threads)
    }

    /// Set the length in bytes of the derived hash.
    pub fn set_key_length(&mut self, length: u32) -> &mut Self {
        self.values.key_length = length;
        self.mark(Field::KeyLength)
    }

    /// Set the length in bytes of the generated salt.
    pub fn set_salt_length(&mut self, length: u32) -> &mut Self {
        self.values.salt_length = length;
        self.mark(Field::SaltLength)
    }

    /// Set the minimum accepted plaintext secret length.
    pub fn set_min_secret_length(&mut self, length: u32) -> &mut Self {
        self.values.min_secret_length = length;
        self.mark(Field::MinSecretLength)
    }

    /// Set the maximum accepted plaintext secret length.
    pub fn set_max_secret_length(&mut self, length: u32) -> &mut Self {
        self.values.max_secret_length = length;
        self.mark(Field::MaxSecretLength)
    }

    /// Report where a parameter's current value came from.
    pub fn provenance(&self, field: Field) -> Provenance {
        self.provenance[field as usize]
    }

    /// Validate the staged parameters and produce the immutable policy.
    ///
    /// # Errors
    /// * `ZeroValue` - A parameter is zero (typically a key missing from the external source)
    /// * `SecretLengthRange` - Minimum secret length exceeds the maximum
    /// * `InvalidParams` - Argon2 rejects the cost parameters
    pub fn finalize(&self) -> Result<CredentialHashingConfig, HashingConfigError> {
        let values = &self.values;

        let zero_checks = [
            (Field::Time, values.time == 0),
            (Field::Memory, values.memory == 0),
            (Field::Threads, values.threads == 0),
            (Field::KeyLength, values.key_length == 0),
            (Field::SaltLength, values.salt_length == 0),
            (Field::MinSecretLength, values.min_secret_length == 0),
            (Field::MaxSecretLength, values.max_secret_length == 0),
        ];
        if let Some((field, _)) = zero_checks.into_iter().find(|(_, is_zero)| *is_zero) {
            return Err(HashingConfigError::ZeroValue { field });
        }

        if values.min_secret_length > values.max_secret_length {
            return Err(HashingConfigError::SecretLengthRange {
                min: values.min_secret_length,
                max: values.max_secret_length,
            });
        }

        values.argon2_params()?;

        tracing::debug!(
            time = values.time,
            memory_kib = values.memory,
            threads = values.threads,
            key_length = values.key_length,
            salt_length = values.salt_length,
            min_secret_length = values.min_secret_length,
            max_secret_length = values.max_secret_length,
            "Hashing policy finalized"
        );

        Ok(values.clone())
    }

    fn mark(&mut self, field: Field) -> &mut Self {
        self.provenance[field as usize] = Provenance::Override;
        self
    }
}

impl Default for CredentialHashingConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

use std::sync::Once;

use credential::generate_client_secret;
use credential::generate_identifier;
use credential::issue_shared_secret_token;
use credential::Claims;
use credential::CredentialHashingConfig;
use credential::HashingConfigError;
use credential::HashingConfigSource;
use credential::SharedSecret;
use credential::TokenError;
use credential::TokenIssuer;
use credential::TokenType;
use jsonwebtoken::decode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("credential=debug")
            .with_test_writer()
            .init();
    });
}

/// Fixed in-memory backend standing in for a deployment's configuration store.
struct StaticSource {
    memory_kib: u32,
    threads: u8,
}

impl HashingConfigSource for StaticSource {
    fn time(&self) -> u32 {
        2
    }
    fn memory(&self) -> u32 {
        self.memory_kib
    }
    fn threads(&self) -> u8 {
        self.threads
    }
    fn key_length(&self) -> u32 {
        32
    }
    fn salt_length(&self) -> u32 {
        16
    }
    fn min_secret_length(&self) -> u32 {
        16
    }
    fn max_secret_length(&self) -> u32 {
        64
    }
}

#[test]
fn test_client_credentials_flow() {
    init_tracing();

    let client_id = generate_identifier("acme-billing");
    let client_secret = generate_client_secret(32);
    let issuer = TokenIssuer::new("https://auth.example.com", "billing-api", 3600);

    let response = issuer
        .issue_for_client(&client_id, &client_secret)
        .expect("Failed to issue token");

    assert_eq!(response.token_type, TokenType::Bearer);
    assert_eq!(response.expires_in, 3600);

    let key = SharedSecret::from_base64(&client_secret).unwrap();
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&["billing-api"]);
    validation.set_issuer(&["https://auth.example.com"]);

    let claims = decode::<Claims>(
        &response.access_token,
        &DecodingKey::from_secret(key.as_bytes()),
        &validation,
    )
    .expect("Token should verify with the client secret")
    .claims;

    assert_eq!(claims.sub, Some(client_id));
}

#[test]
fn test_token_rejected_with_other_secret() {
    init_tracing();

    let claims = Claims::for_client("client-alpha", "https://auth.example.com", "api", 60);
    let response = issue_shared_secret_token(&generate_client_secret(32), &claims, 60).unwrap();

    let other = SharedSecret::generate(32);
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&["api"]);

    let result = decode::<Claims>(
        &response.access_token,
        &DecodingKey::from_secret(other.as_bytes()),
        &validation,
    );
    assert!(result.is_err());
}

#[test]
fn test_malformed_secret_returns_decode_error() {
    init_tracing();

    let claims = Claims::new().with_subject("client-alpha");
    let result = issue_shared_secret_token("c2VjcmV0!", &claims, 3600);

    match result {
        Err(TokenError::Decode(source)) => {
            assert!(!source.to_string().is_empty());
        }
        other => panic!("Expected decode error, got {:?}", other),
    }
}

#[test]
fn test_hashing_policy_from_external_source() {
    init_tracing();

    let source = StaticSource {
        memory_kib: 65536,
        threads: 4,
    };

    let mut builder = CredentialHashingConfig::builder();
    builder.set_time(10).load_from(&source);
    let policy = builder.finalize().expect("Failed to finalize policy");

    // Wholesale replacement discards the earlier override.
    assert_eq!(policy.time(), 2);
    assert_eq!(policy.memory(), 65536);
    assert_eq!(policy.threads(), 4);

    let params = policy.argon2_params().unwrap();
    assert_eq!(params.m_cost(), 65536);
    assert_eq!(params.p_cost(), 4);

    assert!(policy.check_secret_length(&"s".repeat(16)).is_ok());
    assert!(policy.check_secret_length(&"s".repeat(15)).is_err());
}

#[test]
fn test_hashing_policy_rejects_memory_below_thread_minimum() {
    init_tracing();

    let source = StaticSource {
        memory_kib: 16,
        threads: 4,
    };

    let result = CredentialHashingConfig::builder()
        .load_from(&source)
        .finalize();

    assert!(matches!(result, Err(HashingConfigError::InvalidParams(_))));
}

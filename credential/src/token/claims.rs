use std::collections::BTreeMap;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::identifier::generate_identifier;

/// Registered token claims.
///
/// Standard RFC 7519 claims serialize in declaration order, followed by any
/// custom claims in key order, so identical claim sets always encode to
/// identical payloads.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Subject (client identifier in the client-credentials flow)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Audience
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Not before (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// JWT ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    /// Additional custom claims (flattened into token)
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create claims for a client-credentials grant.
    ///
    /// # Arguments
    /// * `client_id` - Client identifier, stored as the subject
    /// * `issuer` - Issuing authority
    /// * `audience` - Intended recipient of the token
    /// * `lifetime_secs` - Seconds from now until the token expires
    ///
    /// # Returns
    /// Claims with iss, sub, aud, iat, exp and a jti unique to this issuance
    pub fn for_client(
        client_id: impl ToString,
        issuer: impl ToString,
        audience: impl ToString,
        lifetime_secs: u32,
    ) -> Self {
        let client_id = client_id.to_string();
        let now = Utc::now();
        let expiration = now + Duration::seconds(i64::from(lifetime_secs));
        let nonce = Uuid::new_v4();
        let jti = generate_identifier(&format!("{}:{}:{}", client_id, now.timestamp(), nonce));

        Self {
            iss: Some(issuer.to_string()),
            sub: Some(client_id),
            aud: Some(audience.to_string()),
            exp: Some(expiration.timestamp()),
            nbf: None,
            iat: Some(now.timestamp()),
            jti: Some(jti),
            extra: BTreeMap::new(),
        }
    }

    /// Set issuer.
    pub fn with_issuer(mut self, iss: impl ToString) -> Self {
        self.iss = Some(iss.to_string());
        self
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set audience.
    pub fn with_audience(mut self, aud: impl ToString) -> Self {
        self.aud = Some(aud.to_string());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set not-before (Unix timestamp).
    pub fn with_not_before(mut self, nbf: i64) -> Self {
        self.nbf = Some(nbf);
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Set JWT ID.
    pub fn with_jwt_id(mut self, jti: impl ToString) -> Self {
        self.jti = Some(jti.to_string());
        self
    }

    /// Add a custom claim. Values that fail to serialize are skipped with a warning.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        let key = key.to_string();
        match serde_json::to_value(value) {
            Ok(json_value) => {
                self.extra.insert(key, json_value);
            }
            Err(e) => {
                tracing::warn!(claim = %key, error = %e, "Dropping unserializable claim");
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let claims = Claims::new().with_subject("client-alpha");
        assert_eq!(claims.sub, Some("client-alpha".to_string()));
        assert!(claims.exp.is_none());
    }

    #[test]
    fn test_for_client() {
        let claims = Claims::for_client("client-alpha", "https://auth.example.com", "api", 3600);

        assert_eq!(claims.sub, Some("client-alpha".to_string()));
        assert_eq!(claims.iss, Some("https://auth.example.com".to_string()));
        assert_eq!(claims.aud, Some("api".to_string()));

        let exp = claims.exp.unwrap();
        let iat = claims.iat.unwrap();
        assert_eq!(exp - iat, 3600);

        let jti = claims.jti.expect("jti should be set");
        let parsed = Uuid::parse_str(&jti).expect("jti should be a UUID");
        assert_eq!(parsed.get_version_num(), 5);
    }

    #[test]
    fn test_for_client_jti_unique_per_issuance() {
        let first = Claims::for_client("client-alpha", "https://auth.example.com", "api", 60);
        let second = Claims::for_client("client-alpha", "https://auth.example.com", "api", 60);

        assert!(first.jti.is_some());
        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_with_extra_skips_unserializable_value() {
        let mut bad = BTreeMap::new();
        bad.insert(vec![1u8, 2], "value");

        let claims = Claims::new()
            .with_extra("scope", "read")
            .with_extra("bad", bad);

        assert!(!claims.extra.contains_key("bad"));
        assert_eq!(claims.extra.get("scope").unwrap().as_str(), Some("read"));
    }

    #[test]
    fn test_builder_pattern() {
        let claims = Claims::new()
            .with_subject("client-alpha")
            .with_expiration(1234567890)
            .with_issued_at(1234567800)
            .with_not_before(1234567800)
            .with_issuer("my-service")
            .with_jwt_id("token-1")
            .with_extra("scope", "read");

        assert_eq!(claims.sub, Some("client-alpha".to_string()));
        assert_eq!(claims.exp, Some(1234567890));
        assert_eq!(claims.iat, Some(1234567800));
        assert_eq!(claims.nbf, Some(1234567800));
        assert_eq!(claims.iss, Some("my-service".to_string()));
        assert_eq!(claims.jti, Some("token-1".to_string()));
        assert_eq!(claims.extra.get("scope").unwrap().as_str(), Some("read"));
    }

    #[test]
    fn test_serialization_order_is_stable() {
        let claims = Claims::new()
            .with_extra("zeta", 1)
            .with_extra("alpha", 2)
            .with_subject("client-alpha")
            .with_issuer("my-service");

        let json = serde_json::to_string(&claims).unwrap();
        assert_eq!(
            json,
            r#"{"iss":"my-service","sub":"client-alpha","alpha":2,"zeta":1}"#
        );
    }

    #[test]
    fn test_empty_claims_serialize_to_empty_object() {
        let json = serde_json::to_string(&Claims::new()).unwrap();
        assert_eq!(json, "{}");
    }
}

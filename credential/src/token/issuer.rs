use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::errors::TokenError;
use super::response::marshal_token_response;
use super::response::TokenResponse;
use super::secret::SharedSecret;
use crate::settings::TokenSettings;

/// Sign claims with a client's shared secret and wrap the result in a bearer response.
///
/// The token is signed with HS256 using the decoded secret as the key. The
/// header carries no `kid`: issuer and validator both hold the same secret.
///
/// `expires_in` is reported as-is in the response and is independent of any
/// `exp` claim in `claims`; callers wanting them to agree must compute both
/// from the same lifetime (see [`TokenIssuer`]).
///
/// # Arguments
/// * `secret` - Base64-encoded client secret
/// * `claims` - Fully populated claim set
/// * `expires_in` - Declared token lifetime in seconds
///
/// # Errors
/// * `Decode` - Secret is not valid base64
/// * `Signing` - Secret decodes to an empty key, or signing failed
/// * `Marshal` - Response could not be built from the signed token
pub fn issue_shared_secret_token(
    secret: &str,
    claims: &Claims,
    expires_in: u32,
) -> Result<TokenResponse, TokenError> {
    let secret = SharedSecret::from_base64(secret)?;
    let access_token = sign(&secret, claims)?;
    let response = marshal_token_response(access_token, expires_in)?;

    tracing::debug!(
        subject = claims.sub.as_deref().unwrap_or_default(),
        expires_in,
        token_type = ?response.token_type,
        "Shared-secret token issued"
    );

    Ok(response)
}

fn sign(secret: &SharedSecret, claims: &Claims) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::Signing("shared secret is empty".to_string()));
    }

    let header = Header::new(Algorithm::HS256);

    encode(&header, claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| TokenError::Signing(e.to_string()))
}

/// Client-credentials token issuer for a single authority.
///
/// Builds the claim set for each client and keeps `exp` and `expires_in`
/// derived from the same configured lifetime.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    issuer: String,
    audience: String,
    expires_in: u32,
}

impl TokenIssuer {
    /// Create a new token issuer.
    ///
    /// # Arguments
    /// * `issuer` - Value of the `iss` claim
    /// * `audience` - Value of the `aud` claim
    /// * `expires_in` - Token lifetime in seconds
    pub fn new(issuer: impl ToString, audience: impl ToString, expires_in: u32) -> Self {
        Self {
            issuer: issuer.to_string(),
            audience: audience.to_string(),
            expires_in,
        }
    }

    pub fn from_settings(settings: &TokenSettings) -> Self {
        Self::new(&settings.issuer, &settings.audience, settings.expires_in)
    }

    pub fn expires_in(&self) -> u32 {
        self.expires_in
    }

    /// Issue an access token to a client authenticating with its shared secret.
    ///
    /// # Arguments
    /// * `client_id` - Client identifier, becomes the token subject
    /// * `client_secret` - Base64-encoded secret previously issued to the client
    ///
    /// # Errors
    /// * `Decode` - Secret is not valid base64
    /// * `Signing` - Secret is empty or signing failed
    pub fn issue_for_client(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<TokenResponse, TokenError> {
        let claims = Claims::for_client(client_id, &self.issuer, &self.audience, self.expires_in);
        issue_shared_secret_token(client_secret, &claims, self.expires_in)
    }
}

use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;

/// Token type reported in a token response.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum TokenType {
    #[default]
    Bearer,
}

/// Token endpoint response body.
///
/// `refresh_token`, `id_token` and `scope` are not produced by the
/// client-credentials flow; they stay `None` and are left out of the
/// serialized body until a flow that issues them sets them.
///
/// `expires_in` is the lifetime declared by the caller. It is not derived
/// from, nor checked against, the `exp` claim inside `access_token`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: TokenType,
    pub expires_in: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl TokenResponse {
    /// Attach a refresh token.
    pub fn with_refresh_token(mut self, refresh_token: impl ToString) -> Self {
        self.refresh_token = Some(refresh_token.to_string());
        self
    }

    /// Attach an ID token.
    pub fn with_id_token(mut self, id_token: impl ToString) -> Self {
        self.id_token = Some(id_token.to_string());
        self
    }

    /// Attach the granted scope.
    pub fn with_scope(mut self, scope: impl ToString) -> Self {
        self.scope = Some(scope.to_string());
        self
    }
}

/// Wrap a signed access token in a bearer token response.
///
/// # Arguments
/// * `access_token` - Signed token string
/// * `expires_in` - Declared token lifetime in seconds
///
/// # Errors
/// * `Marshal` - Access token is empty
pub fn marshal_token_response(
    access_token: String,
    expires_in: u32,
) -> Result<TokenResponse, TokenError> {
    if access_token.is_empty() {
        return Err(TokenError::Marshal("access token is empty".to_string()));
    }

    Ok(TokenResponse {
        access_token,
        token_type: TokenType::Bearer,
        expires_in,
        refresh_token: None,
        id_token: None,
        scope: None,
    })
}

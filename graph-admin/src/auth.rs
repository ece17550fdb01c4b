//! Client-credentials token exchange against the tenant's OAuth2 v2
//! endpoint.
//!
//! The token is requested once per run. It is neither cached across runs
//! nor refreshed before expiry.

use crate::error::{GraphError, GraphResult};
use crate::transport::{RequestBody, RequestOptions, Transport};
use config::{Credentials, GraphEndpoints};
use serde::Deserialize;
use std::fmt;
use tracing::{debug, info};

/// Opaque bearer credential. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

#[derive(Debug, Deserialize)]
struct OAuthTokenResponse {
    access_token: Option<String>,
    token_type: Option<String>,
    expires_in: Option<u64>
}

/// Exchange the application credentials for a bearer token.
///
/// Fails with [`GraphError::RequestFailure`] when the token endpoint rejects
/// the request and with [`GraphError::MissingField`] when the reply carries
/// no `access_token`.
pub async fn get_token(
    transport: &Transport,
    credentials: &Credentials,
    endpoints: &GraphEndpoints
) -> GraphResult<AccessToken> {
    let token_url = endpoints.token_url(&credentials.tenant_id);

    let form = vec![
        ("grant_type".to_string(), "client_credentials".to_string()),
        ("client_id".to_string(), credentials.client_id.clone()),
        ("client_secret".to_string(), credentials.client_secret.clone()),
        ("scope".to_string(), endpoints.scope.clone()),
    ];

    let raw = transport
        .fetch(
            &token_url,
            RequestBody::Form(form),
            None,
            RequestOptions::default()
        )
        .await?;

    let response: OAuthTokenResponse =
        serde_json::from_slice(&raw.body).map_err(|source| GraphError::Decode {
            url: raw.url.clone(),
            source
        })?;

    let token = response
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| GraphError::MissingField {
            field: "access_token".to_string()
        })?;

    debug!(
        token_type = response.token_type.as_deref().unwrap_or("unknown"),
        expires_in = response.expires_in.unwrap_or_default(),
        "Token response decoded"
    );
    info!(tenant_id = %credentials.tenant_id, "Obtained access token");

    Ok(AccessToken::new(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_debug_redacted() {
        let token = AccessToken::new("eyJ0eXAiOiJKV1QiLCJhbGciOi");
        assert_eq!(format!("{:?}", token), "AccessToken([REDACTED])");
        assert_eq!(token.as_str(), "eyJ0eXAiOiJKV1QiLCJhbGciOi");
    }

    #[test]
    fn test_token_response_tolerates_missing_fields() {
        let response: OAuthTokenResponse =
            serde_json::from_str(r#"{"token_type":"Bearer"}"#).unwrap();
        assert!(response.access_token.is_none());
        assert_eq!(response.token_type.as_deref(), Some("Bearer"));
    }
}

//! Authenticated request layer over [`Transport`].
//!
//! [`GraphClient`] is the per-run context value: it owns the pooled HTTP
//! transport, the immutable credentials and endpoints, and the bearer token
//! once one has been obtained. Every directory operation borrows it.

use crate::auth::{AccessToken, get_token};
use crate::error::{GraphError, GraphResult};
use crate::transport::{RawResponse, RequestBody, RequestOptions, Transport};
use config::{Credentials, GraphEndpoints};
use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Normalized response: a decoded body, or a status-only marker when the
/// upstream returned (almost) nothing, as deletes and actions do.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiResponse {
    Body(Value),
    Status { status_code: u16 }
}

impl ApiResponse {
    pub fn from_raw(raw: &RawResponse) -> GraphResult<Self> {
        if raw.body.len() > 1 {
            let value = serde_json::from_slice(&raw.body).map_err(|source| GraphError::Decode {
                url: raw.url.clone(),
                source
            })?;
            Ok(Self::Body(value))
        } else {
            Ok(Self::Status {
                status_code: raw.status
            })
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status_code } => Some(*status_code),
            Self::Body(_) => None
        }
    }

    pub fn into_body(self) -> Option<Value> {
        match self {
            Self::Body(value) => Some(value),
            Self::Status { .. } => None
        }
    }
}

/// Join a sub-path onto the API base with exactly one separating slash.
///
/// Anything containing "http" is taken to be absolute already and returned
/// untouched.
pub fn build_url(base_url: &str, sub_path: &str) -> String {
    if sub_path.contains("http") {
        return sub_path.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        sub_path.trim_matches('/')
    )
}

pub struct GraphClient {
    transport: Transport,
    credentials: Credentials,
    endpoints: GraphEndpoints,
    token: Option<AccessToken>
}

impl GraphClient {
    pub fn new(credentials: Credentials, endpoints: GraphEndpoints) -> GraphResult<Self> {
        let transport = Transport::new(endpoints.timeout())?;

        Ok(Self {
            transport,
            credentials,
            endpoints,
            token: None
        })
    }

    pub fn with_token(mut self, token: AccessToken) -> Self {
        self.token = Some(token);
        self
    }

    pub fn set_token(&mut self, token: AccessToken) {
        self.token = Some(token);
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn endpoints(&self) -> &GraphEndpoints {
        &self.endpoints
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Runs the client-credentials exchange and keeps the token for every
    /// later call. Call once per run, before any directory operation.
    pub async fn authenticate(&mut self) -> GraphResult<()> {
        let token = get_token(&self.transport, &self.credentials, &self.endpoints).await?;
        self.token = Some(token);
        Ok(())
    }

    pub fn url_for(&self, sub_path: &str) -> String {
        build_url(&self.endpoints.api_base_url, sub_path)
    }

    /// Issue one authenticated request and normalize the response.
    pub async fn api(
        &self,
        sub_path: &str,
        query: &[(&str, &str)],
        body: RequestBody,
        method: Option<Method>
    ) -> GraphResult<ApiResponse> {
        let raw = self.request(sub_path, query, body, method).await?;
        ApiResponse::from_raw(&raw)
    }

    /// GET a sub-path and decode the body into `T`. A status-only reply is
    /// an error here since there is no data to read.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        sub_path: &str,
        query: &[(&str, &str)]
    ) -> GraphResult<T> {
        let raw = self
            .request(sub_path, query, RequestBody::Empty, Some(Method::GET))
            .await?;

        if raw.body.len() <= 1 {
            return Err(GraphError::MissingBody {
                url: raw.url,
                status: raw.status
            });
        }

        serde_json::from_slice(&raw.body).map_err(|source| GraphError::Decode {
            url: raw.url,
            source
        })
    }

    /// POST a JSON payload. Either response shape counts as success.
    pub async fn post_json<B: Serialize>(
        &self,
        sub_path: &str,
        payload: &B
    ) -> GraphResult<ApiResponse> {
        let body = RequestBody::Json(serde_json::to_value(payload)?);
        self.api(sub_path, &[], body, None).await
    }

    async fn request(
        &self,
        sub_path: &str,
        query: &[(&str, &str)],
        body: RequestBody,
        method: Option<Method>
    ) -> GraphResult<RawResponse> {
        let url = self.url_for(sub_path);

        // An absent token still produces a header; the upstream rejects it.
        let bearer = self.token.as_ref().map_or("", |t| t.as_str());
        let mut options = RequestOptions::default()
            .with_header(AUTHORIZATION.as_str(), format!("Bearer {}", bearer));
        for (key, value) in query {
            options = options.with_query(*key, *value);
        }

        self.transport.fetch(&url, body, method, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://graph.microsoft.com/v1.0/";

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            url: "https://graph.microsoft.com/v1.0/users/x".to_string(),
            status,
            body: body.as_bytes().to_vec()
        }
    }

    #[test]
    fn test_build_url_single_separator() {
        assert_eq!(
            build_url(BASE, "/users"),
            "https://graph.microsoft.com/v1.0/users"
        );
        assert_eq!(
            build_url(BASE, "users/"),
            "https://graph.microsoft.com/v1.0/users"
        );
        assert_eq!(
            build_url("https://graph.microsoft.com/v1.0", "//subscribedSkus//"),
            "https://graph.microsoft.com/v1.0/subscribedSkus"
        );
        assert_eq!(
            build_url("https://graph.microsoft.com/v1.0///", "/users/a@b.com/drive/root:/1.txt:/content"),
            "https://graph.microsoft.com/v1.0/users/a@b.com/drive/root:/1.txt:/content"
        );
    }

    #[test]
    fn test_build_url_never_doubles_slashes() {
        for sub_path in ["users", "/users", "users/", "/users/", "//users//", "sites/root/lists"] {
            let url = build_url(BASE, sub_path);
            let after_scheme = url.trim_start_matches("https://");
            assert!(!after_scheme.contains("//"), "{}", url);
            assert!(url.starts_with("https://graph.microsoft.com/v1.0/"));
        }
    }

    #[test]
    fn test_build_url_absolute_passthrough() {
        let next = "https://graph.microsoft.com/v1.0/users?$skiptoken=abc";
        assert_eq!(build_url(BASE, next), next);
        assert_eq!(
            build_url(BASE, "http://localhost:9000/x/"),
            "http://localhost:9000/x/"
        );
    }

    #[test]
    fn test_short_bodies_become_status_marker() {
        for body in ["", " ", "\n"] {
            let response = ApiResponse::from_raw(&raw(204, body)).unwrap();
            assert_eq!(response, ApiResponse::Status { status_code: 204 });
            assert_eq!(response.status_code(), Some(204));
        }
    }

    #[test]
    fn test_longer_bodies_are_decoded() {
        let response = ApiResponse::from_raw(&raw(200, r#"{"value":[]}"#)).unwrap();
        assert_eq!(
            response.clone().into_body(),
            Some(serde_json::json!({"value": []}))
        );
        assert_eq!(response.status_code(), None);

        let empty_object = ApiResponse::from_raw(&raw(201, "{}")).unwrap();
        assert_eq!(empty_object, ApiResponse::Body(serde_json::json!({})));
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        let err = ApiResponse::from_raw(&raw(200, "<html>")).unwrap_err();
        assert!(matches!(err, GraphError::Decode { .. }));
    }

    #[test]
    fn test_status_marker_serializes_as_object() {
        let marker = ApiResponse::Status { status_code: 204 };
        assert_eq!(
            serde_json::to_value(&marker).unwrap(),
            serde_json::json!({"status_code": 204})
        );
    }
}

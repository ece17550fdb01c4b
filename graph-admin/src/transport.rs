//! Single-request HTTP transport.
//!
//! One pooled `reqwest::Client` is built per run and reused for every call.
//! There is no retry and no backoff: any non-success status becomes a
//! [`GraphError::RequestFailure`].

use crate::error::{GraphError, GraphResult};
use reqwest::{Client, Method, Url};
use std::time::Duration;
use tracing::debug;

/// Request payload variants.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    /// `application/x-www-form-urlencoded` fields.
    Form(Vec<(String, String)>),
    Json(serde_json::Value),
    /// Raw upload content.
    Bytes(Vec<u8>)
}

impl RequestBody {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    /// Overrides the transport's default timeout for this request only.
    pub timeout: Option<Duration>
}

impl RequestOptions {
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// A response that already passed the status check.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub url: String,
    pub status: u16,
    pub body: Vec<u8>
}

/// POST when a body is present and no method was requested, GET otherwise.
pub fn infer_method(body: &RequestBody, method: Option<Method>) -> Method {
    match method {
        Some(method) => method,
        None if !body.is_empty() => Method::POST,
        None => Method::GET
    }
}

pub struct Transport {
    http_client: Client,
    default_timeout: Duration
}

impl Transport {
    pub fn new(default_timeout: Duration) -> GraphResult<Self> {
        let http_client = Client::builder()
            .timeout(default_timeout)
            .build()
            .map_err(GraphError::Http)?;

        Ok(Self {
            http_client,
            default_timeout
        })
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    pub async fn fetch(
        &self,
        url: &str,
        body: RequestBody,
        method: Option<Method>,
        options: RequestOptions
    ) -> GraphResult<RawResponse> {
        let method = infer_method(&body, method);

        let mut target = Url::parse(url).map_err(|e| GraphError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string()
        })?;
        if !options.query.is_empty() {
            target
                .query_pairs_mut()
                .extend_pairs(options.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        debug!(method = %method, url = %target, "Sending request");

        let mut request = self
            .http_client
            .request(method, target)
            .timeout(options.timeout.unwrap_or(self.default_timeout));

        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        request = match body {
            RequestBody::Empty => request,
            RequestBody::Form(fields) => request.form(&fields),
            RequestBody::Json(value) => request.json(&value),
            RequestBody::Bytes(bytes) => request.body(bytes)
        };

        let response = request.send().await?;
        let status = response.status();
        let final_url = response.url().to_string();

        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(GraphError::RequestFailure {
                url: final_url,
                status: status.as_u16(),
                body
            });
        }

        let body = response.bytes().await?.to_vec();
        debug!(status = status.as_u16(), bytes = body.len(), "Received response");

        Ok(RawResponse {
            url: final_url,
            status: status.as_u16(),
            body
        })
    }
}

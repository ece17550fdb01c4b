use thiserror::Error;

pub type GraphResult<T> = Result<T, GraphError>;

#[derive(Debug, Error)]
pub enum GraphError {
    /// The upstream answered with a status outside 2xx/3xx.
    #[error("Request to {url} failed with status {status}: {body}")]
    RequestFailure {
        url: String,
        status: u16,
        body: String
    },

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error
    },

    #[error("Expected a response body from {url} but got status {status} only")]
    MissingBody { url: String, status: u16 },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Tenant has no default domain")]
    NoDefaultDomain,

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error)
}

impl GraphError {
    /// HTTP status carried by the failure, if the upstream produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailure { status, .. } | Self::MissingBody { status, .. } => {
                Some(*status)
            }
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failure_display() {
        let err = GraphError::RequestFailure {
            url: "https://graph.microsoft.com/v1.0/users".to_string(),
            status: 403,
            body: "{\"error\":\"Authorization_RequestDenied\"}".to_string()
        };

        let message = err.to_string();
        assert!(message.contains("403"));
        assert!(message.contains("/v1.0/users"));
        assert!(message.contains("Authorization_RequestDenied"));
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn test_status_absent_for_local_errors() {
        assert_eq!(GraphError::NoDefaultDomain.status(), None);
        assert_eq!(GraphError::UnknownAction("x".to_string()).status(), None);
    }
}

//! # Configuration Structures
//!
//! Typed configuration for the tenant administration client. All values are
//! immutable for the lifetime of a run once loaded.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use validator::{Validate, ValidationError};

pub const DEFAULT_API_BASE_URL: &str = "https://graph.microsoft.com/v1.0/";
pub const DEFAULT_LOGIN_AUTHORITY: &str = "https://login.microsoftonline.com";
pub const DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 20;

/// Everything a run needs, resolved from defaults, environment and CLI.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub credentials: Credentials,
    pub endpoints: GraphEndpoints,
    pub maintenance: MaintenanceConfig
}

/// Tenant application credentials plus the principal the operations act on.
///
/// `username` is the user principal name whose drive and mailbox are used by
/// the file and mail operations.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Credentials {
    #[validate(length(min = 1, message = "tenant_id must not be empty"))]
    pub tenant_id: String,

    #[validate(length(min = 1, message = "client_id must not be empty"))]
    pub client_id: String,

    #[validate(length(min = 1, message = "client_secret must not be empty"))]
    pub client_secret: String,

    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("username", &self.username)
            .finish()
    }
}

/// Upstream endpoints. Overridable so tests and sovereign clouds can point
/// the client elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GraphEndpoints {
    #[validate(length(min = 1))]
    pub api_base_url: String,

    #[validate(length(min = 1))]
    pub login_authority: String,

    #[validate(length(min = 1))]
    pub scope: String,

    #[validate(range(min = 1, max = 300))]
    pub timeout_seconds: u64
}

impl Default for GraphEndpoints {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            login_authority: DEFAULT_LOGIN_AUTHORITY.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS
        }
    }
}

impl GraphEndpoints {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// OAuth2 v2 token endpoint for the given tenant.
    pub fn token_url(&self, tenant_id: &str) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.login_authority.trim_end_matches('/'),
            tenant_id
        )
    }
}

/// Knobs for the unattended maintenance routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MaintenanceConfig {
    /// Files are pruned only when the listing holds more than this many.
    pub file_prune_threshold: usize,

    /// Users are pruned only when the listing holds more than this many.
    pub user_prune_threshold: usize,

    /// Accounts whose principal name contains this substring are never
    /// pruned.
    #[validate(length(min = 1))]
    pub protected_substring: String,

    #[validate(
        range(min = 0.0, max = 1.0),
        custom(function = "validate_finite_probability")
    )]
    pub user_prune_probability: f64,

    /// Where the marker file is written before upload. Defaults to the
    /// system temp directory.
    pub marker_dir: Option<PathBuf>
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            file_prune_threshold: 10,
            user_prune_threshold: 10,
            protected_substring: "root".to_string(),
            user_prune_probability: 0.5,
            marker_dir: None
        }
    }
}

/// NaN slips past range checks since every comparison with it is false.
#[allow(clippy::trivially_copy_pass_by_ref)]
fn validate_finite_probability(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("not_finite"))
    }
}

impl MaintenanceConfig {
    pub fn marker_dir(&self) -> PathBuf {
        self.marker_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let endpoints = GraphEndpoints::default();
        assert_eq!(endpoints.api_base_url, "https://graph.microsoft.com/v1.0/");
        assert_eq!(endpoints.timeout(), Duration::from_secs(20));
    }

    #[test]
    fn test_token_url_trims_authority_slash() {
        let endpoints = GraphEndpoints {
            login_authority: "http://127.0.0.1:9000/".to_string(),
            ..GraphEndpoints::default()
        };
        assert_eq!(
            endpoints.token_url("contoso"),
            "http://127.0.0.1:9000/contoso/oauth2/v2.0/token"
        );
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let credentials = Credentials {
            tenant_id: "tenant".to_string(),
            client_id: "client".to_string(),
            client_secret: "hunter2".to_string(),
            username: "admin@contoso.com".to_string()
        };

        let debug = format!("{:?}", credentials);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_maintenance_defaults() {
        let config = MaintenanceConfig::default();
        assert_eq!(config.file_prune_threshold, 10);
        assert_eq!(config.user_prune_threshold, 10);
        assert_eq!(config.protected_substring, "root");
        assert!((config.user_prune_probability - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.marker_dir(), std::env::temp_dir());
    }
}

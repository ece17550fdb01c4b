//! # Environment Variable Loader
//!
//! Loads configuration from environment variables following 12-factor app
//! principles.
//!
//! # Naming Convention
//! - `tenant_id`, `client_id`, `client_secret`, `username`: credentials
//! - `GRAPH_*`: upstream endpoint overrides
//! - `GRAPHCTL_*`: maintenance routine knobs

use crate::config::{Credentials, GraphEndpoints, MaintenanceConfig, Settings};
use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::path::PathBuf;

/// Load configuration from environment variables.
///
/// Missing credentials are left empty here; they may still be supplied on
/// the command line and are validated after precedence is applied.
///
/// ## Environment Variables
/// ### Credentials
/// - `tenant_id`: Directory (tenant) identifier
/// - `client_id`: Application (client) identifier
/// - `client_secret`: Application secret
/// - `username`: Principal whose drive and mailbox are used
///
/// ### Endpoints (`GRAPH_*`)
/// - `GRAPH_API_BASE_URL`: API base (default: "https://graph.microsoft.com/v1.0/")
/// - `GRAPH_LOGIN_AUTHORITY`: OAuth authority (default: "https://login.microsoftonline.com")
/// - `GRAPH_SCOPE`: Requested scope (default: "https://graph.microsoft.com/.default")
/// - `GRAPH_TIMEOUT_SECONDS`: Per-request timeout (default: 20)
///
/// ### Maintenance (`GRAPHCTL_*`)
/// - `GRAPHCTL_FILE_PRUNE_THRESHOLD`: (default: 10)
/// - `GRAPHCTL_USER_PRUNE_THRESHOLD`: (default: 10)
/// - `GRAPHCTL_PROTECTED_SUBSTRING`: (default: "root")
/// - `GRAPHCTL_USER_PRUNE_PROBABILITY`: 0.0-1.0 (default: 0.5)
/// - `GRAPHCTL_MARKER_DIR`: marker file directory (default: system temp dir)
pub fn load_from_env() -> ConfigResult<Settings> {
    Ok(Settings {
        credentials: load_credentials_from_env(),
        endpoints: load_endpoints_from_env()?,
        maintenance: load_maintenance_from_env()?
    })
}

fn load_credentials_from_env() -> Credentials {
    Credentials {
        tenant_id: env::var("tenant_id").unwrap_or_default(),
        client_id: env::var("client_id").unwrap_or_default(),
        client_secret: env::var("client_secret").unwrap_or_default(),
        username: env::var("username").unwrap_or_default()
    }
}

fn load_endpoints_from_env() -> ConfigResult<GraphEndpoints> {
    let defaults = GraphEndpoints::default();
    Ok(GraphEndpoints {
        api_base_url: env::var("GRAPH_API_BASE_URL").unwrap_or(defaults.api_base_url),
        login_authority: env::var("GRAPH_LOGIN_AUTHORITY").unwrap_or(defaults.login_authority),
        scope: env::var("GRAPH_SCOPE").unwrap_or(defaults.scope),
        timeout_seconds: parse_env("GRAPH_TIMEOUT_SECONDS")?.unwrap_or(defaults.timeout_seconds)
    })
}

fn load_maintenance_from_env() -> ConfigResult<MaintenanceConfig> {
    let defaults = MaintenanceConfig::default();
    let user_prune_probability: f64 = parse_env("GRAPHCTL_USER_PRUNE_PROBABILITY")?
        .unwrap_or(defaults.user_prune_probability);
    if !user_prune_probability.is_finite() {
        return Err(ConfigError::InvalidValue {
            key: "GRAPHCTL_USER_PRUNE_PROBABILITY".to_string(),
            reason: "must be a finite number".to_string()
        });
    }

    Ok(MaintenanceConfig {
        file_prune_threshold: parse_env("GRAPHCTL_FILE_PRUNE_THRESHOLD")?
            .unwrap_or(defaults.file_prune_threshold),
        user_prune_threshold: parse_env("GRAPHCTL_USER_PRUNE_THRESHOLD")?
            .unwrap_or(defaults.user_prune_threshold),
        protected_substring: env::var("GRAPHCTL_PROTECTED_SUBSTRING")
            .unwrap_or(defaults.protected_substring),
        user_prune_probability,
        marker_dir: env::var("GRAPHCTL_MARKER_DIR").ok().map(PathBuf::from)
    })
}

/// Unset variables yield `None`; set but unparsable variables are an error
/// rather than a silent fallback to the default.
fn parse_env<T>(key: &str) -> ConfigResult<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                reason: e.to_string()
            }),
        Err(_) => Ok(None)
    }
}

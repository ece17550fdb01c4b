//! # Configuration Precedence
//!
//! Merges command-line values over the environment-derived settings.
//!
//! # Precedence Order
//! 1. CLI arguments (highest priority)
//! 2. Environment variables
//! 3. Default values (lowest priority)

use crate::config::Settings;
use tracing::debug;

/// Credential values supplied on the command line. `None` or empty values
/// leave the lower-precedence value in place.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub tenant_id: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub username: Option<String>
}

pub fn apply_overrides(mut settings: Settings, overrides: CliOverrides) -> Settings {
    let credentials = &mut settings.credentials;
    override_field(&mut credentials.tenant_id, overrides.tenant_id, "tenant_id");
    override_field(&mut credentials.client_id, overrides.client_id, "client_id");
    override_field(
        &mut credentials.client_secret,
        overrides.client_secret,
        "client_secret"
    );
    override_field(&mut credentials.username, overrides.username, "username");
    settings
}

fn override_field(target: &mut String, value: Option<String>, field: &str) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        debug!(field, "Overriding configuration from cli");
        *target = value;
    }
}

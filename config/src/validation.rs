//! # Configuration Validation
//!
//! Provides validation for the resolved settings using the `validator`
//! crate.
//!
//! ## Validation Rules
//! - Credentials: every field non-empty
//! - Endpoints: non-empty URLs, `timeout_seconds` 1-300
//! - Maintenance: non-empty protected substring, probability 0.0-1.0

use crate::config::Settings;
use crate::error::ConfigResult;
use validator::Validate;

/// Validate everything a run depends on before any request is issued.
pub fn validate_settings(settings: &Settings) -> ConfigResult<()> {
    settings.credentials.validate()?;
    settings.endpoints.validate()?;
    settings.maintenance.validate()?;
    Ok(())
}

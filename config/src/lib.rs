//! # Configuration System
//!
//! Credential and endpoint configuration for the tenant administration
//! client.
//!
//! This crate provides:
//! - Configuration structures (credentials, Graph endpoints, maintenance
//!   knobs)
//! - Environment variable loading (12-factor app principles)
//! - Configuration precedence (CLI > env > defaults)
//! - Configuration validation

pub mod config;
pub mod error;
pub mod loader;
pub mod precedence;
pub mod validation;

pub use config::{
    Credentials, DEFAULT_API_BASE_URL, DEFAULT_LOGIN_AUTHORITY, DEFAULT_SCOPE,
    DEFAULT_TIMEOUT_SECONDS, GraphEndpoints, MaintenanceConfig, Settings,
};
pub use error::{ConfigError, ConfigResult};
pub use loader::load_from_env;
pub use precedence::{CliOverrides, apply_overrides};
pub use validation::validate_settings;

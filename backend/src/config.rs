//! Backend configuration loaded via OrthoConfig.
//!
//! Values come from `SINGLE_USER_GROUP_*` environment variables, command-line
//! flags, or a configuration file, in OrthoConfig's usual precedence.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;
use crate::outbound::{UnknownVisibilityPolicy, VisibilityPolicy};
use crate::telemetry::{LogFormat, UnknownLogFormat};

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error(transparent)]
    Visibility(#[from] UnknownVisibilityPolicy),
    #[error(transparent)]
    LogFormat(#[from] UnknownLogFormat),
    #[error("database_url is required for the PostgreSQL directory")]
    MissingDatabaseUrl,
}

/// Settings for a host embedding the single-user group backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SINGLE_USER_GROUP")]
pub struct BackendSettings {
    /// Host-wide account visibility: `all` or `none`.
    pub accounts_visibility: Option<String>,
    /// PostgreSQL URL for the account directory.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
    /// Log output format: `json` or `plain`.
    pub log_format: Option<String>,
}

impl BackendSettings {
    /// Parsed visibility policy, `all` when unset.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Visibility`] for unrecognised values.
    pub fn visibility_policy(&self) -> Result<VisibilityPolicy, SettingsError> {
        Ok(self
            .accounts_visibility
            .as_deref()
            .map(str::parse::<VisibilityPolicy>)
            .transpose()?
            .unwrap_or_default())
    }

    /// Parsed log format, `json` when unset.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::LogFormat`] for unrecognised values.
    pub fn log_format(&self) -> Result<LogFormat, SettingsError> {
        Ok(self
            .log_format
            .as_deref()
            .map(str::parse::<LogFormat>)
            .transpose()?
            .unwrap_or_default())
    }

    /// Pool settings for the PostgreSQL directory.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingDatabaseUrl`] when no URL is set.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        let url = self
            .database_url
            .as_deref()
            .ok_or(SettingsError::MissingDatabaseUrl)?;
        Ok(PoolConfig::new(url).with_max_size(self.pool_max_size))
    }
}

//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `REGISTRY_*` environment variables, or a
//! configuration file, in that order of precedence.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Problems with otherwise well-formed settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {message}")]
    InvalidBindAddr { value: String, message: String },
    #[error("REGISTRY_ADMIN_PASSWORD must be set to a non-empty value")]
    MissingAdminPassword,
}

/// Registry server settings.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REGISTRY")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Users are kept in memory when unset.
    pub database_url: Option<String>,
    /// Shared password authorising deletes.
    pub admin_password: Option<String>,
    /// Browser origin allowed by CORS.
    pub allowed_origin: Option<String>,
}

impl ServerSettings {
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] when the value does not
    /// parse as `host:port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                message: err.to_string(),
            })
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// # Errors
    ///
    /// Returns [`SettingsError::MissingAdminPassword`] when no password is
    /// configured.
    pub fn admin_password(&self) -> Result<Zeroizing<String>, SettingsError> {
        match self.admin_password.as_deref() {
            Some(password) if !password.is_empty() => Ok(Zeroizing::new(password.to_owned())),
            _ => Err(SettingsError::MissingAdminPassword),
        }
    }

    pub fn allowed_origin(&self) -> &str {
        self.allowed_origin
            .as_deref()
            .unwrap_or(DEFAULT_ALLOWED_ORIGIN)
    }
}

impl std::fmt::Debug for ServerSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerSettings")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("admin_password", &self.admin_password.as_ref().map(|_| "<redacted>"))
            .field("allowed_origin", &self.allowed_origin)
            .finish()
    }
}

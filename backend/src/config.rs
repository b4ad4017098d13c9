//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `INTRANET_*` environment variables or a config
//! file. The admin credentials have no default: the server refuses to start
//! without them.

use std::fmt;
use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{LoginCredentials, LoginValidationError};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const ADMIN_USERNAME_KEY: &str = "INTRANET_ADMIN_USERNAME";
const ADMIN_PASSWORD_KEY: &str = "INTRANET_ADMIN_PASSWORD";

/// Errors raised while turning loaded settings into runtime configuration.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Settings could not be loaded from any source.
    #[error("failed to load settings: {0}")]
    Load(String),
    /// A required credential is absent or blank.
    #[error("missing required setting: {key}")]
    MissingCredential { key: &'static str },
    /// Host and port do not form a socket address.
    #[error("invalid bind address {host}:{port}")]
    InvalidBind { host: String, port: u16 },
}

/// Server settings.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "INTRANET")]
pub struct IntranetSettings {
    /// IP address to bind (default 0.0.0.0). Hostnames such as `localhost`
    /// are rejected; use `127.0.0.1` instead.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// Admin login name.
    pub admin_username: Option<String>,
    /// Admin password.
    pub admin_password: Option<String>,
}

impl fmt::Debug for IntranetSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntranetSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("admin_username", &self.admin_username)
            .field(
                "admin_password",
                &self.admin_password.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl IntranetSettings {
    /// Load settings from the process arguments, environment and files.
    ///
    /// # Errors
    /// Returns [`SettingsError::Load`] when a source is malformed.
    pub fn load_from_process() -> Result<Self, SettingsError> {
        Self::load_from_iter(std::env::args_os()).map_err(|err| SettingsError::Load(err.to_string()))
    }

    /// Configured host, defaulting to all interfaces.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Configured port, defaulting to 3000.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Socket address to bind.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidBind`] when the host is not an IP
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        self.host()
            .parse::<IpAddr>()
            .map(|ip| SocketAddr::new(ip, self.port()))
            .map_err(|_| SettingsError::InvalidBind {
                host: self.host().to_owned(),
                port: self.port(),
            })
    }

    /// Admin credentials the login service compares against.
    ///
    /// # Errors
    /// Returns [`SettingsError::MissingCredential`] naming the first absent or
    /// blank value.
    pub fn admin_credentials(&self) -> Result<LoginCredentials, SettingsError> {
        let username = self.admin_username.as_deref().unwrap_or_default();
        let password = self.admin_password.as_deref().unwrap_or_default();
        LoginCredentials::try_from_parts(username, password).map_err(|err| match err {
            LoginValidationError::EmptyUsername => SettingsError::MissingCredential {
                key: ADMIN_USERNAME_KEY,
            },
            LoginValidationError::EmptyPassword => SettingsError::MissingCredential {
                key: ADMIN_PASSWORD_KEY,
            },
        })
    }
}

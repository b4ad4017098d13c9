//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::domain::ports::FlagSource;
use crate::domain::{LoginCredentials, StaticDirectory};
use crate::inbound::http::session::SessionCookie;
use crate::outbound::CapFlagSource;

/// Everything needed to build the HTTP server.
pub struct ServerConfig {
    pub(crate) cookie: SessionCookie,
    pub(crate) admin: LoginCredentials,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) directory: StaticDirectory,
    pub(crate) flag: Arc<dyn FlagSource>,
}

impl ServerConfig {
    /// Configuration serving the demo directory and the fixed flag file.
    #[must_use]
    pub fn new(cookie: SessionCookie, admin: LoginCredentials, bind_addr: SocketAddr) -> Self {
        Self {
            cookie,
            admin,
            bind_addr,
            directory: StaticDirectory::demo(),
            flag: Arc::new(CapFlagSource::fixed()),
        }
    }

    /// Replace the directory served by `/search`.
    #[must_use]
    pub fn with_directory(mut self, directory: StaticDirectory) -> Self {
        self.directory = directory;
        self
    }

    /// Replace the flag reader.
    #[must_use]
    pub fn with_flag_source(mut self, flag: Arc<dyn FlagSource>) -> Self {
        self.flag = flag;
        self
    }

    /// Socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

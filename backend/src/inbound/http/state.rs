//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{DirectoryQuery, FlagSource, LoginService};

/// Dependency bundle for HTTP handlers.
///
/// Session state is not part of the bundle: handlers reach it through the
/// [`SessionContext`](super::session::SessionContext) extractor.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub directory: Arc<dyn DirectoryQuery>,
    pub flag: Arc<dyn FlagSource>,
}

impl HttpState {
    /// Bundle the port implementations.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use intranet::domain::{ConfiguredLoginService, LoginCredentials, StaticDirectory};
    /// use intranet::inbound::http::state::HttpState;
    /// use intranet::outbound::CapFlagSource;
    ///
    /// let admin = LoginCredentials::try_from_parts("admin", "s3cret").expect("valid");
    /// let state = HttpState::new(
    ///     Arc::new(ConfiguredLoginService::new(&admin).expect("login service")),
    ///     Arc::new(StaticDirectory::demo()),
    ///     Arc::new(CapFlagSource::fixed()),
    /// );
    /// let _directory = state.directory.clone();
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        directory: Arc<dyn DirectoryQuery>,
        flag: Arc<dyn FlagSource>,
    ) -> Self {
        Self {
            login,
            directory,
            flag,
        }
    }
}

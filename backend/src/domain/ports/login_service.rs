//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to check credentials without knowing where the
//! reference credentials live, so handler tests can swap in a double.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Privilege};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the privilege they grant.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Privilege, Error>;
}

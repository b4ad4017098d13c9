//! Driven port supplying the admin flag download.
//!
//! The port takes no path argument: there is exactly one resource and the
//! adapter decides where it lives.

use async_trait::async_trait;

use crate::domain::Error;

/// The downloadable flag document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagDocument {
    /// File name offered to the client.
    pub file_name: &'static str,
    /// Raw file contents.
    pub contents: Vec<u8>,
}

/// Source of the single fixed flag resource.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FlagSource: Send + Sync {
    /// Read the flag. Failures surface as internal errors.
    async fn fetch(&self) -> Result<FlagDocument, Error>;
}

//! Driving port for directory lookups.

use async_trait::async_trait;

use crate::domain::{DirectoryMatch, Error, SearchQuery};

/// Read-only search over the employee directory.
#[async_trait]
pub trait DirectoryQuery: Send + Sync {
    /// Return at most three matches for a validated query.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<DirectoryMatch>, Error>;
}

//! Read-only employee directory searched by name.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ports::DirectoryQuery;
use super::{Error, SearchQuery};

/// Maximum number of matches returned by a search.
pub const MAX_RESULTS: usize = 3;

/// One employee record.
///
/// The email address is kept internal: it has no serde representation and
/// search results project it away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    id: u32,
    name: String,
    email: String,
}

impl DirectoryEntry {
    /// Construct an entry.
    pub fn new(id: u32, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Contact address; never part of a search response.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }
}

/// Public projection of a [`DirectoryEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DirectoryMatch {
    /// Stable identifier.
    #[schema(example = 1)]
    pub id: u32,
    /// Display name.
    #[schema(example = "Alice")]
    pub name: String,
}

impl From<&DirectoryEntry> for DirectoryMatch {
    fn from(entry: &DirectoryEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name.clone(),
        }
    }
}

/// Directory fixed at startup and shared read-only between requests.
///
/// # Examples
/// ```
/// use intranet::domain::{SearchQuery, StaticDirectory};
///
/// let directory = StaticDirectory::demo();
/// let hits = directory.lookup(&SearchQuery::parse("ali").unwrap());
/// assert_eq!(hits[0].name, "Alice");
/// ```
#[derive(Debug, Clone)]
pub struct StaticDirectory {
    entries: Arc<[DirectoryEntry]>,
}

impl StaticDirectory {
    /// Build a directory from entries in their natural order.
    #[must_use]
    pub fn new(entries: Vec<DirectoryEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// The demonstration dataset.
    #[must_use]
    pub fn demo() -> Self {
        Self::new(vec![
            DirectoryEntry::new(1, "Alice", "alice@example.com"),
            DirectoryEntry::new(2, "Bob", "bob@example.com"),
            DirectoryEntry::new(3, "Charlie", "charlie@example.com"),
        ])
    }

    /// Case-insensitive substring match on name, first [`MAX_RESULTS`] hits
    /// in insertion order.
    #[must_use]
    pub fn lookup(&self, query: &SearchQuery) -> Vec<DirectoryMatch> {
        self.entries
            .iter()
            .filter(|entry| query.matches(entry.name()))
            .take(MAX_RESULTS)
            .map(DirectoryMatch::from)
            .collect()
    }
}

#[async_trait]
impl DirectoryQuery for StaticDirectory {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<DirectoryMatch>, Error> {
        Ok(self.lookup(query))
    }
}

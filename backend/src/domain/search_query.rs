//! Directory search query validation.
//!
//! A query is accepted only when it is a non-empty string of at most
//! [`MAX_QUERY_CHARS`] code points drawn from ASCII letters, whitespace and
//! hyphens. Accepted queries keep the caller's original text.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Upper bound on query length, in Unicode code points.
pub const MAX_QUERY_CHARS: usize = 20;

static QUERY_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s-]+$").expect("valid regex"));

/// Reasons a raw query is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryRejection {
    /// No query was supplied, or it was empty.
    #[error("query is required")]
    Missing,
    /// The query was present but not a string.
    #[error("query must be a string")]
    NotText,
    /// The query exceeds the length limit.
    #[error("query must be at most {max} characters, got {length}")]
    TooLong {
        /// Length of the rejected input in code points.
        length: usize,
        /// Maximum accepted length.
        max: usize,
    },
    /// The query contains a character outside the allowed class.
    #[error("query may only contain letters, spaces and hyphens")]
    DisallowedCharacters,
}

impl QueryRejection {
    /// Stable detail code reported to clients.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Missing => "missing_query",
            Self::NotText => "invalid_type",
            Self::TooLong { .. } => "too_long",
            Self::DisallowedCharacters => "invalid_characters",
        }
    }
}

/// A validated search term.
///
/// # Examples
/// ```
/// use intranet::domain::SearchQuery;
///
/// let query = SearchQuery::parse("Mary-Jane").unwrap();
/// assert_eq!(query.as_str(), "Mary-Jane");
/// assert!(SearchQuery::parse("xyz123").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Validate a textual query.
    pub fn parse(raw: &str) -> Result<Self, QueryRejection> {
        if raw.is_empty() {
            return Err(QueryRejection::Missing);
        }
        let length = raw.chars().count();
        if length > MAX_QUERY_CHARS {
            return Err(QueryRejection::TooLong {
                length,
                max: MAX_QUERY_CHARS,
            });
        }
        if !QUERY_CHARSET.is_match(raw) {
            return Err(QueryRejection::DisallowedCharacters);
        }
        Ok(Self(raw.to_owned()))
    }

    /// Validate a loosely-typed request value.
    ///
    /// Absent values, `null` and non-string JSON values are rejected before
    /// any text checks run.
    pub fn from_value(raw: Option<&Value>) -> Result<Self, QueryRejection> {
        match raw {
            None | Some(Value::Null) => Err(QueryRejection::Missing),
            Some(Value::String(text)) => Self::parse(text),
            Some(_) => Err(QueryRejection::NotText),
        }
    }

    /// The query exactly as supplied.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether `name` contains this query, ignoring case.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.0.to_lowercase())
    }
}

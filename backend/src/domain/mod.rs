//! Domain primitives, policies and ports.
//!
//! Purpose: keep authentication, authorisation and query validation free of
//! HTTP concerns so each piece can be tested on its own.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - LoginCredentials / ConfiguredLoginService: credential check.
//! - SessionId / SessionRecord / Privilege: session state.
//! - Access / DenyReason / require_admin: authorisation guard.
//! - SearchQuery / QueryRejection: search input validation.
//! - StaticDirectory / DirectoryEntry / DirectoryMatch: employee directory.

pub mod auth;
pub mod directory;
pub mod error;
pub mod guard;
pub mod ports;
pub mod search_query;
pub mod session;
pub mod trace_id;

pub use self::auth::{ConfiguredLoginService, LoginCredentials, LoginValidationError};
pub use self::directory::{DirectoryEntry, DirectoryMatch, MAX_RESULTS, StaticDirectory};
pub use self::error::{Error, ErrorCode};
pub use self::guard::{Access, DenyReason, require_admin};
pub use self::search_query::{MAX_QUERY_CHARS, QueryRejection, SearchQuery};
pub use self::session::{Privilege, SessionId, SessionIdError, SessionRecord};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient result alias for handlers and services.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use intranet::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

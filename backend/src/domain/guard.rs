//! Authorisation guard for protected routes.
//!
//! The guard is a pure decision over the resolved session record. Callers
//! decide how a denial is logged and rendered.

use super::SessionRecord;

/// Why the guard refused access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No session record could be resolved for the request.
    NoSession,
    /// A session exists but lacks admin privilege.
    InsufficientPrivilege,
}

impl DenyReason {
    /// Short label used in security log events.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoSession => "no_session",
            Self::InsufficientPrivilege => "insufficient_privilege",
        }
    }
}

/// Outcome of an authorisation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The request may proceed.
    Permit,
    /// The request must be refused.
    Deny(DenyReason),
}

/// Permit only sessions carrying admin privilege.
///
/// # Examples
/// ```
/// use intranet::domain::{require_admin, Access, DenyReason};
///
/// assert_eq!(require_admin(None), Access::Deny(DenyReason::NoSession));
/// ```
#[must_use]
pub fn require_admin(session: Option<&SessionRecord>) -> Access {
    match session {
        None => Access::Deny(DenyReason::NoSession),
        Some(record) if record.is_admin() => Access::Permit,
        Some(_) => Access::Deny(DenyReason::InsufficientPrivilege),
    }
}

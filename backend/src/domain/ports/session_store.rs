//! Driven port for server-side session state.
//!
//! Implementations must tolerate concurrent calls from independent requests;
//! operations on different identifiers never contend for the same record.

use crate::domain::{Privilege, SessionId, SessionRecord};

/// Process-scoped mapping from session identifier to session record.
pub trait SessionStore: Send + Sync {
    /// Create an anonymous session and return its fresh identifier.
    fn create(&self) -> SessionId;

    /// Resolve an identifier. Unknown or destroyed ids yield `None`.
    fn get(&self, id: &SessionId) -> Option<SessionRecord>;

    /// Grant a privilege to an existing session.
    ///
    /// Returns `false` when the identifier is unknown.
    fn grant(&self, id: &SessionId, privilege: Privilege) -> bool;

    /// Mark a session as admin. Unknown ids are ignored.
    fn set_admin(&self, id: &SessionId) -> bool {
        self.grant(id, Privilege::Admin)
    }

    /// Remove a session. Destroying an unknown id is a no-op.
    fn destroy(&self, id: &SessionId);
}

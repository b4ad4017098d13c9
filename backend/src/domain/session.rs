//! Session identity and the server-side session record.
//!
//! Identifiers are drawn from the operating system CSPRNG and hex encoded, so
//! they carry no ordering and cannot be predicted from earlier values.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::RngCore;
use rand::rngs::OsRng;

const SESSION_ID_BYTES: usize = 32;
const SESSION_ID_HEX_LEN: usize = SESSION_ID_BYTES * 2;

/// Validation errors raised when parsing a [`SessionId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionIdError {
    /// The identifier does not have the expected length.
    #[error("session id must be {expected} characters, got {actual}")]
    InvalidLength {
        /// Required length in characters.
        expected: usize,
        /// Length supplied by the caller.
        actual: usize,
    },
    /// The identifier contains characters outside lowercase hex.
    #[error("session id must be lowercase hex")]
    InvalidCharacters,
}

/// Opaque, unguessable session identifier.
///
/// # Examples
/// ```
/// use intranet::domain::SessionId;
///
/// let id = SessionId::generate();
/// let parsed = SessionId::parse(id.as_str()).unwrap();
/// assert_eq!(parsed, id);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Draw a fresh identifier from the OS random number generator.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; SESSION_ID_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Parse an identifier presented by a client.
    pub fn parse(raw: &str) -> Result<Self, SessionIdError> {
        if raw.len() != SESSION_ID_HEX_LEN {
            return Err(SessionIdError::InvalidLength {
                expected: SESSION_ID_HEX_LEN,
                actual: raw.len(),
            });
        }
        if !raw
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        {
            return Err(SessionIdError::InvalidCharacters);
        }
        Ok(Self(raw.to_owned()))
    }

    /// Borrow the hex representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

// Keep identifiers out of logs; the prefix is enough to correlate.
impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = self.0.get(..8).unwrap_or_default();
        write!(f, "SessionId({prefix}…)")
    }
}

/// Privilege carried by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Privilege {
    /// Anonymous visitor; may browse and search.
    Visitor,
    /// Authenticated administrator; may open the admin panel and the flag.
    Admin,
}

/// Server-side state for one client session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    id: SessionId,
    privilege: Privilege,
    created_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Create an anonymous record.
    #[must_use]
    pub fn new(id: SessionId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            privilege: Privilege::Visitor,
            created_at,
        }
    }

    /// Identifier of this session.
    #[must_use]
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Current privilege.
    #[must_use]
    pub fn privilege(&self) -> Privilege {
        self.privilege
    }

    /// Whether the session unlocks admin routes.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self.privilege, Privilege::Admin)
    }

    /// Creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn grant(&mut self, privilege: Privilege) {
        self.privilege = privilege;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_hex_and_parse_back() {
        let id = SessionId::generate();
        assert_eq!(id.as_str().len(), SESSION_ID_HEX_LEN);
        assert_eq!(SessionId::parse(id.as_str()), Ok(id));
    }

    #[test]
    fn generated_ids_do_not_repeat() {
        let ids: HashSet<SessionId> = (0..1_000).map(|_| SessionId::generate()).collect();
        assert_eq!(ids.len(), 1_000);
    }

    #[rstest]
    #[case("")]
    #[case("1")]
    #[case("../../etc/passwd")]
    fn short_ids_are_rejected(#[case] raw: &str) {
        assert!(matches!(
            SessionId::parse(raw),
            Err(SessionIdError::InvalidLength { .. })
        ));
    }

    #[test]
    fn uppercase_hex_is_rejected() {
        let raw = "A".repeat(SESSION_ID_HEX_LEN);
        assert_eq!(
            SessionId::parse(&raw),
            Err(SessionIdError::InvalidCharacters)
        );
    }

    #[test]
    fn debug_does_not_print_full_id() {
        let id = SessionId::generate();
        assert!(!format!("{id:?}").contains(id.as_str()));
    }

    #[test]
    fn new_records_are_visitors_until_granted() {
        let mut record = SessionRecord::new(SessionId::generate(), Utc::now());
        assert!(!record.is_admin());
        record.grant(Privilege::Admin);
        assert!(record.is_admin());
        assert_eq!(record.privilege(), Privilege::Admin);
    }
}

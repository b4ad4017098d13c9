//! In-memory session store backed by a concurrent hash map.
//!
//! Records live until explicitly destroyed or the process exits. Each record
//! is keyed by its own identifier, so writes to different sessions only touch
//! their own shard entry.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use mockable::{Clock, DefaultClock};
use tracing::debug;

use crate::domain::ports::SessionStore;
use crate::domain::{Privilege, SessionId, SessionRecord};

/// Process-wide session map.
///
/// Records are never evicted. Every request arriving without a live session
/// cookie creates one (unknown routes and scripted clients included), so the
/// map grows for the life of the process. That is acceptable for a demo
/// server restarted often; a long-running deployment needs expiry here.
pub struct InMemorySessionStore {
    sessions: DashMap<SessionId, SessionRecord>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemorySessionStore {
    /// Create an empty store stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            sessions: DashMap::new(),
            clock,
        }
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Copy of every live record, in no particular order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<SessionRecord> {
        self.sessions
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Whether no sessions are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl SessionStore for InMemorySessionStore {
    fn create(&self) -> SessionId {
        loop {
            let id = SessionId::generate();
            match self.sessions.entry(id.clone()) {
                // 256-bit ids make this branch practically unreachable.
                Entry::Occupied(_) => continue,
                Entry::Vacant(slot) => {
                    slot.insert(SessionRecord::new(id.clone(), self.clock.utc()));
                    debug!(session = ?id, "session created");
                    return id;
                }
            }
        }
    }

    fn get(&self, id: &SessionId) -> Option<SessionRecord> {
        self.sessions.get(id).map(|record| record.value().clone())
    }

    fn grant(&self, id: &SessionId, privilege: Privilege) -> bool {
        match self.sessions.get_mut(id) {
            Some(mut record) => {
                record.grant(privilege);
                true
            }
            None => false,
        }
    }

    fn destroy(&self, id: &SessionId) {
        if self.sessions.remove(id).is_some() {
            debug!(session = ?id, "session destroyed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Local, TimeZone, Utc};
    use std::collections::HashSet;
    use std::thread;

    struct FixtureClock {
        utc_now: DateTime<Utc>,
    }

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.utc_now.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.utc_now
        }
    }

    fn fixture_timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    fn store() -> InMemorySessionStore {
        InMemorySessionStore::new(Arc::new(FixtureClock {
            utc_now: fixture_timestamp(),
        }))
    }

    #[test]
    fn create_then_get_returns_anonymous_record() {
        let store = store();
        let id = store.create();
        let record = store.get(&id).expect("record present");
        assert_eq!(record.id(), &id);
        assert!(!record.is_admin());
        assert_eq!(record.created_at(), fixture_timestamp());
    }

    #[test]
    fn unknown_id_is_absent() {
        assert!(store().get(&SessionId::generate()).is_none());
    }

    #[test]
    fn set_admin_elevates_only_that_session() {
        let store = store();
        let admin = store.create();
        let visitor = store.create();
        assert!(store.set_admin(&admin));
        assert!(store.get(&admin).expect("admin").is_admin());
        assert!(!store.get(&visitor).expect("visitor").is_admin());
    }

    #[test]
    fn set_admin_on_unknown_id_is_ignored() {
        let store = store();
        assert!(!store.set_admin(&SessionId::generate()));
        assert!(store.is_empty());
    }

    #[test]
    fn destroy_removes_record_and_is_idempotent() {
        let store = store();
        let id = store.create();
        store.destroy(&id);
        store.destroy(&id);
        assert!(store.get(&id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn concurrent_creates_yield_unique_ids() {
        let store = Arc::new(store());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || (0..250).map(|_| store.create()).collect::<Vec<_>>())
            })
            .collect();
        let ids: HashSet<SessionId> = handles
            .into_iter()
            .flat_map(|handle| handle.join().expect("worker thread"))
            .collect();
        assert_eq!(ids.len(), 2_000);
        assert_eq!(store.len(), 2_000);
    }

    #[test]
    fn concurrent_grants_do_not_disturb_other_sessions() {
        let store = Arc::new(store());
        let ids: Vec<SessionId> = (0..64).map(|_| store.create()).collect();
        let handles: Vec<_> = ids
            .iter()
            .step_by(2)
            .cloned()
            .map(|id| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.set_admin(&id))
            })
            .collect();
        for handle in handles {
            assert!(handle.join().expect("worker thread"));
        }
        for (index, id) in ids.iter().enumerate() {
            let record = store.get(id).expect("record present");
            assert_eq!(record.is_admin(), index % 2 == 0);
        }
    }
}

//! Session cookie handling and the handler-facing session context.
//!
//! The cookie carries only the opaque session id, signed with the configured
//! key. [`SessionContext`] is resolved by [`SessionLayer`](crate::middleware::SessionLayer)
//! and handed to handlers as an extractor, so they deal in domain operations
//! rather than cookies.

use std::future::{Ready, ready};
use std::sync::Arc;

use actix_web::cookie::{Cookie, CookieJar, Key, SameSite};
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};

use crate::domain::ports::SessionStore;
use crate::domain::{Error, Privilege, SessionId, SessionRecord};

/// Default name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "session";

/// How the session id travels in a cookie.
#[derive(Clone)]
pub struct SessionCookie {
    key: Key,
    name: String,
    secure: bool,
    same_site: SameSite,
}

impl SessionCookie {
    /// Cookie named [`SESSION_COOKIE_NAME`] signed with `key`.
    #[must_use]
    pub fn new(key: Key, secure: bool, same_site: SameSite) -> Self {
        Self {
            key,
            name: SESSION_COOKIE_NAME.to_owned(),
            secure,
            same_site,
        }
    }

    /// Cookie name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Extract and verify the session id presented by the client.
    ///
    /// Missing cookies, bad signatures and malformed ids all yield `None`.
    #[must_use]
    pub fn presented_id(&self, req: &HttpRequest) -> Option<SessionId> {
        let cookie = req.cookie(&self.name)?;
        let mut jar = CookieJar::new();
        jar.add_original(cookie);
        let verified = jar.signed(&self.key).get(&self.name)?;
        match SessionId::parse(verified.value()) {
            Ok(id) => Some(id),
            Err(error) => {
                tracing::warn!(%error, "signed session cookie held a malformed id");
                None
            }
        }
    }

    /// Signed cookie carrying `id`.
    #[must_use]
    pub fn issue(&self, id: &SessionId) -> Option<Cookie<'static>> {
        let mut jar = CookieJar::new();
        jar.signed_mut(&self.key)
            .add(self.base(id.as_str().to_owned()));
        jar.get(&self.name).cloned()
    }

    /// Cookie instructing the client to drop its session id.
    #[must_use]
    pub fn expire(&self) -> Cookie<'static> {
        let mut cookie = self.base(String::new());
        cookie.make_removal();
        cookie
    }

    fn base(&self, value: String) -> Cookie<'static> {
        Cookie::build(self.name.clone(), value)
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .finish()
    }
}

/// Session bound to the current request.
#[derive(Clone)]
pub struct SessionContext {
    id: SessionId,
    store: Arc<dyn SessionStore>,
    cookie: Arc<SessionCookie>,
}

impl SessionContext {
    pub(crate) fn new(id: SessionId, store: Arc<dyn SessionStore>, cookie: Arc<SessionCookie>) -> Self {
        Self { id, store, cookie }
    }

    /// Identifier of the bound session.
    #[must_use]
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Current record, read fresh from the store.
    #[must_use]
    pub fn record(&self) -> Option<SessionRecord> {
        self.store.get(&self.id)
    }

    /// Whether the session currently holds admin privilege.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.record().is_some_and(|record| record.is_admin())
    }

    /// Grant a privilege to the bound session.
    ///
    /// # Errors
    /// Returns an internal error if the session disappeared mid-request.
    pub fn grant(&self, privilege: Privilege) -> Result<(), Error> {
        if self.store.grant(&self.id, privilege) {
            Ok(())
        } else {
            Err(Error::internal("session vanished before privilege grant"))
        }
    }

    /// Move the client to a fresh session holding `privilege`.
    ///
    /// The previous session is destroyed so an id observed before login is
    /// worthless afterwards. Returns the cookie naming the new session.
    ///
    /// # Errors
    /// Returns an internal error if the new session cannot be granted the
    /// privilege or its cookie cannot be signed.
    pub fn elevate(&self, privilege: Privilege) -> Result<Cookie<'static>, Error> {
        let fresh = self.store.create();
        if !self.store.grant(&fresh, privilege) {
            return Err(Error::internal("fresh session vanished before privilege grant"));
        }
        self.store.destroy(&self.id);
        self.cookie
            .issue(&fresh)
            .ok_or_else(|| Error::internal("failed to sign session cookie"))
    }

    /// Destroy the bound session and return the cookie that clears it.
    #[must_use]
    pub fn destroy(&self) -> Cookie<'static> {
        self.store.destroy(&self.id);
        self.cookie.expire()
    }
}

impl FromRequest for SessionContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<SessionContext>()
                .cloned()
                .ok_or_else(|| Error::internal("session middleware not installed")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn cookie_config() -> SessionCookie {
        SessionCookie::new(Key::generate(), false, SameSite::Lax)
    }

    #[test]
    fn issued_cookie_round_trips() {
        let config = cookie_config();
        let id = SessionId::generate();
        let cookie = config.issue(&id).expect("cookie issued");
        assert_eq!(cookie.name(), SESSION_COOKIE_NAME);
        assert_ne!(cookie.value(), id.as_str(), "value must be signed");
        assert_eq!(cookie.http_only(), Some(true));

        let req = TestRequest::default().cookie(cookie).to_http_request();
        assert_eq!(config.presented_id(&req), Some(id));
    }

    #[test]
    fn unsigned_cookie_is_ignored() {
        let config = cookie_config();
        let id = SessionId::generate();
        let req = TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE_NAME, id.as_str().to_owned()))
            .to_http_request();
        assert!(config.presented_id(&req).is_none());
    }

    #[test]
    fn cookie_signed_with_another_key_is_ignored() {
        let issued = cookie_config()
            .issue(&SessionId::generate())
            .expect("cookie issued");
        let req = TestRequest::default().cookie(issued).to_http_request();
        assert!(cookie_config().presented_id(&req).is_none());
    }

    #[test]
    fn elevation_replaces_the_session() {
        let store: Arc<dyn SessionStore> =
            Arc::new(crate::outbound::InMemorySessionStore::default());
        let config = Arc::new(cookie_config());
        let original = store.create();
        let context = SessionContext::new(original.clone(), Arc::clone(&store), Arc::clone(&config));

        let cookie = context.elevate(Privilege::Admin).expect("elevated");

        assert!(store.get(&original).is_none(), "pre-login id is retired");
        let req = TestRequest::default().cookie(cookie).to_http_request();
        let fresh = config.presented_id(&req).expect("new id in cookie");
        assert_ne!(fresh, original);
        assert!(store.get(&fresh).expect("fresh session").is_admin());
    }

    #[test]
    fn destroy_removes_record_and_is_repeatable() {
        let store: Arc<dyn SessionStore> =
            Arc::new(crate::outbound::InMemorySessionStore::default());
        let id = store.create();
        let context = SessionContext::new(id.clone(), Arc::clone(&store), Arc::new(cookie_config()));

        let _ = context.destroy();
        let removal = context.destroy();

        assert!(store.get(&id).is_none());
        assert!(!context.is_admin());
        assert_eq!(removal.value(), "");
    }

    #[test]
    fn expire_cookie_is_a_removal() {
        let cookie = cookie_config().expire();
        assert_eq!(cookie.name(), SESSION_COOKIE_NAME);
        assert_eq!(cookie.value(), "");
        assert!(cookie.max_age().is_some_and(|age| age.is_zero()));
    }
}

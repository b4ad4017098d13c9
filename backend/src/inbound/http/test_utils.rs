//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::ServiceResponse;

use crate::domain::ports::{FlagSource, LoginService};
use crate::domain::{ConfiguredLoginService, LoginCredentials, StaticDirectory};
use crate::inbound::http::session::{SESSION_COOKIE_NAME, SessionCookie};
use crate::inbound::http::state::HttpState;
use crate::middleware::SessionLayer;
use crate::outbound::{CapFlagSource, InMemorySessionStore};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";

/// Session layer over `store` with a fresh key and a non-secure cookie.
pub fn test_session_layer(store: Arc<InMemorySessionStore>) -> SessionLayer {
    SessionLayer::new(store, SessionCookie::new(Key::generate(), false, SameSite::Lax))
}

/// Login service accepting [`ADMIN_USERNAME`] / [`ADMIN_PASSWORD`].
pub fn admin_login() -> Arc<dyn LoginService> {
    let admin = LoginCredentials::try_from_parts(ADMIN_USERNAME, ADMIN_PASSWORD)
        .expect("fixture credentials are valid");
    Arc::new(ConfiguredLoginService::new(&admin).expect("login service"))
}

/// State over the demo directory with the given login and flag ports.
pub fn test_state(login: Arc<dyn LoginService>, flag: Arc<dyn FlagSource>) -> HttpState {
    HttpState::new(login, Arc::new(StaticDirectory::demo()), flag)
}

/// State with the fixture admin and a flag source that is never reached.
pub fn default_state() -> HttpState {
    test_state(
        admin_login(),
        Arc::new(CapFlagSource::rooted_at("/nonexistent/intranet")),
    )
}

/// Session cookie set on `res`, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
}

//! Shared harness for the intranet integration suites.
//!
//! Builds the production app (`server::build_app`) over an in-memory session
//! store, the demo directory and a flag file in a temporary directory.

use std::sync::Arc;

use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::ServiceResponse;
use actix_web::web;
use intranet::domain::ports::SessionStore;
use intranet::domain::{ConfiguredLoginService, LoginCredentials, StaticDirectory};
use intranet::inbound::http::health::HealthState;
use intranet::inbound::http::session::{SESSION_COOKIE_NAME, SessionCookie};
use intranet::inbound::http::state::HttpState;
use intranet::outbound::{CapFlagSource, InMemorySessionStore};
use intranet::server::{AppDependencies, build_app};
use serde::Serialize;
use tempfile::TempDir;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const FLAG_CONTENTS: &str = "FLAG{integration}\n";

/// Everything a test needs to drive the app and inspect its state.
pub struct Harness {
    pub sessions: Arc<InMemorySessionStore>,
    pub deps: AppDependencies,
    _flag_dir: TempDir,
}

impl Harness {
    pub fn new() -> Self {
        let flag_dir = tempfile::tempdir().expect("temporary flag dir");
        std::fs::write(flag_dir.path().join("flag.txt"), FLAG_CONTENTS).expect("write flag");

        let admin = LoginCredentials::try_from_parts(ADMIN_USERNAME, ADMIN_PASSWORD)
            .expect("fixture credentials");
        let login = ConfiguredLoginService::new(&admin).expect("login service");
        let http_state = HttpState::new(
            Arc::new(login),
            Arc::new(StaticDirectory::demo()),
            Arc::new(CapFlagSource::rooted_at(flag_dir.path())),
        );
        let sessions = Arc::new(InMemorySessionStore::default());
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();

        let deps = AppDependencies {
            health_state,
            http_state: web::Data::new(http_state),
            sessions: Arc::clone(&sessions) as Arc<dyn SessionStore>,
            cookie: SessionCookie::new(Key::generate(), false, SameSite::Lax),
        };
        Self {
            sessions,
            deps,
            _flag_dir: flag_dir,
        }
    }

    /// Number of live sessions holding admin privilege.
    pub fn admin_sessions(&self) -> usize {
        self.sessions
            .snapshot()
            .iter()
            .filter(|record| record.is_admin())
            .count()
    }
}

/// Session cookie set on `res`, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
}

/// Form-encoded login body.
#[derive(Serialize)]
pub struct LoginForm<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Admin credentials as a login body.
pub fn admin_form() -> LoginForm<'static> {
    LoginForm {
        username: ADMIN_USERNAME,
        password: ADMIN_PASSWORD,
    }
}

/// Post the admin credentials through `$app` and yield the admin cookie.
macro_rules! login_as_admin {
    ($app:expr) => {{
        let res = actix_web::test::call_service(
            $app,
            actix_web::test::TestRequest::post()
                .uri("/login")
                .set_form($crate::support::admin_form())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), actix_web::http::StatusCode::FOUND);
        $crate::support::session_cookie(&res).expect("admin session cookie")
    }};
}

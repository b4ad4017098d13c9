//! Login and logout handlers.
//!
//! ```text
//! POST /login username=admin&password=...   (form or JSON)
//! GET  /logout
//! ```
//!
//! Both answer with `302 Found` to `/` on success. A successful login moves
//! the client onto a fresh admin session; logout destroys whatever session the
//! client holds and clears the cookie, so repeating it is harmless.
//!
//! A login body that cannot be read at all (no body, unknown content type,
//! wrongly typed fields) counts as a failed attempt: `401` with the generic
//! message.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::{Error, ErrorCode, LoginCredentials};
use crate::inbound::http::ApiResult;
use crate::inbound::http::caller::caller_address;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Message shared by every rejected login so callers cannot tell which field
/// was wrong.
pub const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Login request body.
///
/// Example JSON:
/// `{"username":"admin","password":"s3cret"}`
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

fn redirect_home() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .finish()
}

/// Authenticate as admin and establish an admin session.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Logged in; redirect to the home page",
            headers(("Set-Cookie" = String, description = "Admin session cookie"))),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["session"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    req: HttpRequest,
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Option<web::Either<web::Json<LoginRequest>, web::Form<LoginRequest>>>,
) -> ApiResult<HttpResponse> {
    let caller = caller_address(&req);
    let Some(payload) = payload else {
        warn!(target: "security", %caller, "login rejected: unreadable body");
        return Err(Error::unauthorized(INVALID_CREDENTIALS));
    };
    let LoginRequest { username, password } = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(
        username.as_deref().unwrap_or_default(),
        password.as_deref().unwrap_or_default(),
    )
    .map_err(|reason| {
        warn!(target: "security", %caller, %reason, "login rejected");
        Error::unauthorized(INVALID_CREDENTIALS)
    })?;

    match state.login.authenticate(&credentials).await {
        Ok(privilege) => {
            let cookie = session.elevate(privilege)?;
            info!(%caller, username = credentials.username(), "login succeeded");
            let mut response = redirect_home();
            response.add_cookie(&cookie).map_err(|err| {
                Error::internal(format!("failed to attach session cookie: {err}"))
            })?;
            Ok(response)
        }
        Err(error) if error.code() == ErrorCode::Unauthorized => {
            warn!(
                target: "security",
                %caller,
                username = credentials.username(),
                "failed login attempt"
            );
            Err(error)
        }
        Err(error) => Err(error),
    }
}

/// Destroy the current session.
#[utoipa::path(
    get,
    path = "/logout",
    responses(
        (status = 302, description = "Session destroyed; redirect to the home page",
            headers(("Set-Cookie" = String, description = "Expired session cookie")))
    ),
    tags = ["session"],
    operation_id = "logout"
)]
#[get("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    let removal = session.destroy();
    let mut response = redirect_home();
    response
        .add_cookie(&removal)
        .map_err(|err| Error::internal(format!("failed to clear session cookie: {err}")))?;
    Ok(response)
}

//! Admin-only routes: the admin panel and the flag download.
//!
//! ```text
//! GET /admin
//! GET /flag
//! ```
//!
//! Both run the admin guard first. A denial is logged as a security event and
//! answered with `403 Forbidden`; no credentials are solicited.

use actix_web::http::header::{
    self, CacheControl, CacheDirective, ContentDisposition, ContentType, DispositionParam,
    DispositionType,
};
use actix_web::{HttpRequest, HttpResponse, get, web};
use tracing::{info, warn};

use crate::domain::{Access, Error, require_admin};
use crate::inbound::http::ApiResult;
use crate::inbound::http::caller::caller_address;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Message returned with every guard denial.
pub const ADMIN_REQUIRED: &str = "admin privileges required";

const ADMIN_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Admin panel</title></head>
<body>
<h1>Admin panel</h1>
<p>Welcome, admin!</p>
<ul>
  <li><a href="/flag">Download the flag</a></li>
  <li><a href="/logout">Log out</a></li>
</ul>
</body>
</html>
"#;

/// Run the admin guard for `resource`, logging any denial.
fn ensure_admin(req: &HttpRequest, session: &SessionContext, resource: &str) -> ApiResult<()> {
    match require_admin(session.record().as_ref()) {
        Access::Permit => Ok(()),
        Access::Deny(reason) => {
            warn!(
                target: "security",
                caller = %caller_address(req),
                resource,
                reason = reason.as_str(),
                "access denied"
            );
            Err(Error::forbidden(ADMIN_REQUIRED))
        }
    }
}

/// Admin panel.
#[utoipa::path(
    get,
    path = "/admin",
    responses(
        (status = 200, description = "Admin panel", content_type = "text/html", body = String),
        (status = 403, description = "Admin session required", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminPanel"
)]
#[get("/admin")]
pub async fn admin_panel(req: HttpRequest, session: SessionContext) -> ApiResult<HttpResponse> {
    ensure_admin(&req, &session, "/admin")?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .insert_header(CacheControl(vec![CacheDirective::NoStore]))
        .body(ADMIN_PAGE))
}

/// Download the flag file.
///
/// The resource is fixed; the route takes no path or query input.
#[utoipa::path(
    get,
    path = "/flag",
    responses(
        (status = 200, description = "Flag file", content_type = "text/plain", body = String,
            headers(("Content-Disposition" = String, description = "attachment; filename=\"flag.txt\""))),
        (status = 403, description = "Admin session required", body = Error),
        (status = 500, description = "Flag resource unreadable", body = Error)
    ),
    tags = ["admin"],
    operation_id = "downloadFlag"
)]
#[get("/flag")]
pub async fn flag(
    req: HttpRequest,
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    ensure_admin(&req, &session, "/flag")?;
    let document = state.flag.fetch().await?;
    info!(caller = %caller_address(&req), "flag downloaded");
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(document.file_name.to_owned())],
        })
        .insert_header(CacheControl(vec![CacheDirective::NoStore]))
        .insert_header((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
        .body(document.contents))
}

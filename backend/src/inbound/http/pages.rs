//! Server-rendered HTML pages.
//!
//! ```text
//! GET /       home page with search form, admin links when logged in
//! GET /login  login form
//! ```

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get};

use crate::inbound::http::session::SessionContext;

const HOME_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>HR Intranet</title></head>
<body>
<h1>HR Intranet - Demo</h1>
<p>Welcome to the demonstration intranet. Use the form to look up an employee.</p>
<form method="POST" action="/search">
  <input name="q" placeholder="Name or part of a name" maxlength="20" />
  <button>Search</button>
</form>
<p>Useful endpoints:
  <code>/search</code> (POST),
  <code>/login</code> (POST),
  <code>/admin</code> (protected),
  <code>/flag</code> (secret)
</p>
"#;

const ADMIN_LINKS: &str = r#"<p><a href="/admin">Admin panel</a> | <a href="/flag">Download the flag</a> | <a href="/logout">Log out</a></p>
"#;

const VISITOR_LINKS: &str = r#"<p><a href="/login">Log in</a></p>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

const LOGIN_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Admin login</title></head>
<body>
<h1>Admin login</h1>
<form method="POST" action="/login">
  <input type="text" name="username" placeholder="Username" required />
  <input type="password" name="password" placeholder="Password" required />
  <button type="submit">Log in</button>
</form>
<p><a href="/">Back to home</a></p>
</body>
</html>
"#;

/// Render the home page for the given privilege level.
fn home_page(is_admin: bool) -> String {
    let links = if is_admin { ADMIN_LINKS } else { VISITOR_LINKS };
    [HOME_HEAD, links, PAGE_TAIL].concat()
}

/// Home page.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Home page", content_type = "text/html", body = String)),
    tags = ["pages"],
    operation_id = "home"
)]
#[get("/")]
pub async fn home(session: SessionContext) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(home_page(session.is_admin()))
}

/// Login form.
#[utoipa::path(
    get,
    path = "/login",
    responses((status = 200, description = "Login form", content_type = "text/html", body = String)),
    tags = ["pages"],
    operation_id = "loginForm"
)]
#[get("/login")]
pub async fn login_form() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(LOGIN_PAGE)
}

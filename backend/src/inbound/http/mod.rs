//! HTTP inbound adapter: pages, session routes, search and admin routes.

use actix_web::web;

pub mod admin;
pub mod caller;
pub mod error;
pub mod health;
pub mod login;
pub mod pages;
pub mod search;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;

/// Register every application route.
///
/// Handlers expect `web::Data<HttpState>` in app data and the
/// [`SessionLayer`](crate::middleware::SessionLayer) wrapping them.
///
/// # Examples
/// ```
/// use actix_web::App;
///
/// let _app = App::new().configure(intranet::inbound::http::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(pages::home)
        .service(pages::login_form)
        .service(login::login)
        .service(login::logout)
        .service(search::search)
        .service(admin::admin_panel)
        .service(admin::flag);
}

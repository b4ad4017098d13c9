//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every route of the inbound HTTP layer together with
//! the request, response and error schemas, plus the session cookie security
//! scheme. Swagger UI serves it in debug builds and `openapi-dump` prints it.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{DirectoryMatch, Error, ErrorCode};
use crate::inbound::http::login::LoginRequest;
use crate::inbound::http::search::{SearchRequest, SearchResponse};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Signed session cookie; admin privilege is granted by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the intranet server.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "HR intranet demo",
        description = "Session-gated admin routes and validated directory search."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::pages::home,
        crate::inbound::http::pages::login_form,
        crate::inbound::http::login::login,
        crate::inbound::http::login::logout,
        crate::inbound::http::search::search,
        crate::inbound::http::admin::admin_panel,
        crate::inbound::http::admin::flag,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        LoginRequest,
        SearchRequest,
        SearchResponse,
        DirectoryMatch
    )),
    tags(
        (name = "pages", description = "Server-rendered HTML"),
        (name = "session", description = "Login and logout"),
        (name = "directory", description = "Employee search"),
        (name = "admin", description = "Routes requiring an admin session"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ConfiguredLoginService;
use crate::domain::ports::SessionStore;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{self, session::SessionCookie};
use crate::middleware::{SessionLayer, Trace};
use crate::outbound::InMemorySessionStore;

/// Shared pieces each worker's `App` is built from.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub sessions: Arc<dyn SessionStore>,
    pub cookie: SessionCookie,
}

/// Build the application with every route and middleware installed.
///
/// Middleware order: `Trace` wraps everything, so session resolution and
/// handler errors run with the trace id in scope.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        sessions,
        cookie,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.service(
        web::scope("")
            .wrap(SessionLayer::new(sessions, cookie))
            .configure(http::configure),
    )
    .wrap(Trace)
}

/// Turn a [`ServerConfig`] into the per-worker app dependencies.
///
/// # Errors
/// Returns [`std::io::Error`] when the login service cannot be built.
pub fn app_dependencies(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<(AppDependencies, SocketAddr)> {
    let ServerConfig {
        cookie,
        admin,
        bind_addr,
        directory,
        flag,
    } = config;

    let login = ConfiguredLoginService::new(&admin)
        .map_err(|err| std::io::Error::other(format!("login service: {err}")))?;
    let http_state = web::Data::new(HttpState::new(Arc::new(login), Arc::new(directory), flag));
    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::default());
    let deps = AppDependencies {
        health_state,
        http_state,
        sessions,
        cookie,
    };
    Ok((deps, bind_addr))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Returns [`std::io::Error`] when the login service cannot be built or the
/// socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let (deps, bind_addr) = app_dependencies(health_state.clone(), config)?;

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "intranet server listening");
    health_state.mark_ready();
    Ok(server)
}

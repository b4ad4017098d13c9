//! HR intranet demo server library.
//!
//! Hexagonal layout: `domain` holds the validation, authorisation and
//! directory logic behind ports; `inbound::http` maps HTTP onto it; `outbound`
//! implements the session store and flag reader.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;

//! Intranet entry-point: loads settings, wires the HTTP server and serves
//! until shutdown.
//!
//! Run from the crate directory (`backend/`): the flag download is read from
//! `public/flag.txt` relative to the working directory.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use intranet::config::IntranetSettings;
use intranet::inbound::http::health::HealthState;
use intranet::inbound::http::session_config::{BuildMode, session_settings_from_process};
use intranet::outbound::CapFlagSource;
use intranet::server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = IntranetSettings::load_from_process().map_err(std::io::Error::other)?;
    let admin = settings.admin_credentials().map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let cookie = session_settings_from_process(BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?
        .into_cookie();

    let flag = CapFlagSource::fixed();
    if !flag.is_reachable() {
        warn!(
            dir = %flag.root().display(),
            "flag file not found relative to the working directory; run from backend/"
        );
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state,
        ServerConfig::new(cookie, admin, bind_addr).with_flag_source(Arc::new(flag)),
    )?;
    server.await
}

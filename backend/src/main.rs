//! Server entry-point: loads settings, opens the record store, and serves the
//! REST API with health probes and OpenAPI docs.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use jobtrack::inbound::http::health::HealthState;

mod server;

use server::{ServerSettings, build_http_state, build_repository, create_server};

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

    let settings = ServerSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let bind_addr = settings.bind_addr()?;
    let repository = build_repository(settings.store_selection()).await?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, build_http_state(repository), bind_addr)?;
    server.await
}

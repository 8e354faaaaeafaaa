//! external-dns webhook provider for bunny.net DNS
//!
//! Serves the webhook API on `LISTEN_ADDR` and a liveness probe on
//! `PROBE_ADDR`. The two listeners share nothing; the provider is shared
//! read-only across webhook workers.

mod config;
mod error;
mod logging;
mod server;

use actix_web::{App, HttpServer, middleware, web};
use anyhow::Context;
use bunny_dns_provider::create_provider;

use config::WebhookConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = WebhookConfig::load().context("failed to load configuration")?;
    let _log_guard = logging::init(&config.log).context("failed to initialize logging")?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        listen_addr = %config.listen_addr,
        probe_addr = %config.probe_addr,
        domain_filter = ?config.domain_filter,
        "starting bunny-dns-webhook"
    );
    tracing::debug!(?config, "effective configuration");

    let provider = create_provider(config.client_config(), config.domain_filter())
        .context("failed to create bunny.net provider")?;
    tracing::info!(provider = provider.id(), "provider ready");
    let provider = web::Data::from(provider);

    let webhook = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(provider.clone())
            .configure(server::routes)
    })
    .bind(&config.listen_addr)
    .with_context(|| format!("failed to bind webhook listener on {}", config.listen_addr))?
    .run();

    let probe = HttpServer::new(|| App::new().configure(server::probe_routes))
        .workers(1)
        .bind(&config.probe_addr)
        .with_context(|| format!("failed to bind probe listener on {}", config.probe_addr))?
        .run();

    tokio::try_join!(webhook, probe)?;

    tracing::info!("bunny-dns-webhook stopped");
    Ok(())
}

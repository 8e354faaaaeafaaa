//! external-dns webhook routes and the liveness probe.

use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{HttpResponse, web};
use bunny_dns_provider::{Changes, DnsProvider, Endpoint};
use serde::Serialize;

use crate::error::WebhookError;

/// Media type of every webhook request and response body.
pub const MEDIA_TYPE: &str = "application/external.dns.webhook+json;version=1";

type Provider = web::Data<dyn DnsProvider>;

/// Webhook API routes. Expects the provider as `web::Data<dyn DnsProvider>`.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(negotiate))
        .route("/records", web::get().to(records))
        .route("/records", web::post().to(apply_changes))
        .route("/adjustendpoints", web::post().to(adjust_endpoints));
}

/// Probe routes, served on their own listener.
pub fn probe_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/healthz", web::get().to(healthz));
}

fn webhook_json<T: Serialize>(status: StatusCode, body: &T) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header((CONTENT_TYPE, MEDIA_TYPE))
        .json(body)
}

async fn negotiate(provider: Provider) -> HttpResponse {
    webhook_json(StatusCode::OK, &provider.domain_filter())
}

#[tracing_attributes::instrument(skip_all)]
async fn records(provider: Provider) -> Result<HttpResponse, WebhookError> {
    let endpoints = provider
        .records()
        .await
        .map_err(WebhookError::from)
        .inspect_err(|e| e.log("records"))?;

    tracing::debug!(count = endpoints.len(), "listed endpoints");
    Ok(webhook_json(StatusCode::OK, &endpoints))
}

#[tracing_attributes::instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
async fn apply_changes(provider: Provider, body: web::Bytes) -> Result<HttpResponse, WebhookError> {
    let changes: Changes = serde_json::from_slice(&body)
        .map_err(WebhookError::from)
        .inspect_err(|e| e.log("apply_changes"))?;

    if changes.is_empty() {
        tracing::debug!("empty change batch");
        return Ok(HttpResponse::NoContent().finish());
    }

    provider
        .apply_changes(&changes)
        .await
        .map_err(WebhookError::from)
        .inspect_err(|e| e.log("apply_changes"))?;

    tracing::info!(
        create = changes.create.len(),
        update = changes.update_new.len(),
        delete = changes.delete.len(),
        "changes applied"
    );
    Ok(HttpResponse::NoContent().finish())
}

#[tracing_attributes::instrument(skip_all)]
async fn adjust_endpoints(
    provider: Provider,
    body: web::Bytes,
) -> Result<HttpResponse, WebhookError> {
    let endpoints: Vec<Endpoint> = serde_json::from_slice(&body)
        .map_err(WebhookError::from)
        .inspect_err(|e| e.log("adjust_endpoints"))?;

    let adjusted = provider
        .adjust_endpoints(endpoints)
        .await
        .map_err(WebhookError::from)
        .inspect_err(|e| e.log("adjust_endpoints"))?;

    Ok(webhook_json(StatusCode::OK, &adjusted))
}

async fn healthz() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain").body("OK")
}

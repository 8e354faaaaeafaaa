//! Webhook error type and its HTTP mapping.

use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{HttpResponse, ResponseError};
use bunny_dns_provider::ProviderError;
use serde_json::json;

use crate::server::MEDIA_TYPE;

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

impl WebhookError {
    /// Log at `warn` for caller-side problems, `error` otherwise.
    pub fn log(&self, operation: &str) {
        let expected = match self {
            Self::Provider(e) => e.is_expected(),
            Self::InvalidBody(_) => true,
        };
        if expected {
            tracing::warn!(operation, error = %self, "request failed");
        } else {
            tracing::error!(operation, error = %self, "request failed");
        }
    }
}

impl ResponseError for WebhookError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Provider(e) => match e {
                ProviderError::InvalidParameter { .. }
                | ProviderError::UnsupportedRecordType { .. } => StatusCode::BAD_REQUEST,
                ProviderError::InvalidCredentials { .. } => StatusCode::UNAUTHORIZED,
                ProviderError::DomainNotFound { .. } | ProviderError::RecordNotFound { .. } => {
                    StatusCode::NOT_FOUND
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        builder.insert_header((CONTENT_TYPE, MEDIA_TYPE));
        match self {
            Self::Provider(e) => builder.json(e),
            Self::InvalidBody(e) => builder.json(json!({
                "code": "InvalidBody",
                "detail": e.to_string(),
            })),
        }
    }
}

//! Generic HTTP client tools
//!
//! Shared request/response plumbing for the provider's HTTP layer. The provider
//! builds each `RequestBuilder` itself (URL, auth headers, body); this module
//! sends it, logs the exchange and turns transport-level failures into
//! [`ProviderError`] values.
//!
//! Requests are sent exactly once. There is no retry or backoff here: a failed
//! call is the outcome of the enclosing operation.

use reqwest::RequestBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP status the provider uses for a rejected API key.
const STATUS_UNAUTHORIZED: u16 = 401;

/// Status code and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text (may be empty, e.g. for 204).
    pub body: String,
}

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns status and response text
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, headers, body)
    /// * `provider_name` - Provider name (for logging and error tagging)
    /// * `method_name` - request method name, used for logs
    /// * `url` - request URL, used for logs
    ///
    /// # Returns
    /// * `Ok(HttpResponse)` - any status other than 401
    /// * `Err(ProviderError::InvalidCredentials)` - the API answered 401
    /// * `Err(ProviderError::NetworkError)` - the request could not be completed
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url: &str,
    ) -> Result<HttpResponse, ProviderError> {
        log::debug!("[{provider_name}] {method_name} {url}");

        let response = request_builder
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            })?;

        let status = response.status().as_u16();
        log::debug!("[{provider_name}] Response Status: {status}");

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{provider_name}] Response Body: {}",
            truncate_for_log(&body)
        );

        reject_unauthorized(status, &body, provider_name)?;

        Ok(HttpResponse { status, body })
    }

    /// Parse JSON response
    ///
    /// # Returns
    /// * `Ok(T)` - successfully parsed
    /// * `Err(ProviderError::ParseError)` - parsing failed
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{provider_name}] JSON parse failed: {e}");
            log::error!(
                "[{provider_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// Serialize a request body to JSON
    ///
    /// # Returns
    /// * `Ok(String)` - JSON payload
    /// * `Err(ProviderError::SerializationError)` - serialization failed
    pub fn to_json<B>(body: &B, provider_name: &str) -> Result<String, ProviderError>
    where
        B: Serialize,
    {
        serde_json::to_string(body).map_err(|e| ProviderError::SerializationError {
            provider: provider_name.to_string(),
            detail: e.to_string(),
        })
    }
}

/// Map HTTP 401 to [`ProviderError::InvalidCredentials`], whatever endpoint answered it.
fn reject_unauthorized(status: u16, body: &str, provider_name: &str) -> Result<(), ProviderError> {
    if status != STATUS_UNAUTHORIZED {
        return Ok(());
    }

    log::warn!("[{provider_name}] API key rejected (HTTP 401)");
    Err(ProviderError::InvalidCredentials {
        provider: provider_name.to_string(),
        raw_message: (!body.trim().is_empty()).then(|| truncate_for_log(body)),
    })
}

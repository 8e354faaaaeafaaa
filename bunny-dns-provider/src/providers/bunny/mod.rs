//! bunny.net DNS Provider

mod error;
mod http;
mod provider;
mod resolver;
mod translate;
mod types;

use std::sync::Arc;

use reqwest::Client;
use reqwest::redirect::Policy;

use crate::error::{ProviderError, Result};
use crate::traits::RecordApi;
use crate::types::DomainFilter;

pub use resolver::{ResolvedZone, resolve_zone};
pub use translate::{
    RECORD_TYPES, merge_endpoints, record_target, record_type_code, record_type_name,
    to_endpoint, to_wire_record, verify_record_types,
};
pub use types::{DnsRecord, DnsZone};

pub(crate) const PROVIDER_NAME: &str = "bunny";
pub(crate) const DEFAULT_API_URL: &str = "https://api.bunny.net";
/// `GET /dnszone` 单页最大记录数
pub(crate) const MAX_PAGE_SIZE_ZONES: u32 = 1000;
/// TTL 小于 1 时使用的默认值（秒）
pub(crate) const DEFAULT_TTL: i64 = 300;

/// Connection settings for [`BunnyClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL, without a trailing slash.
    pub api_url: String,
    /// Account API key, sent as the `AccessKey` header.
    pub api_key: String,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl ClientConfig {
    /// Settings for the public API endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: api_key.into(),
            user_agent: format!("bunny-dns-provider/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// HTTPS client for the bunny.net zone and record API.
///
/// Owns its `reqwest::Client`, built once with redirects disabled so that
/// status-code branching always sees the provider's own answer.
pub struct BunnyClient {
    pub(crate) client: Client,
    pub(crate) api_url: String,
    pub(crate) api_key: String,
}

impl BunnyClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .redirect(Policy::none())
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| ProviderError::NetworkError {
                provider: PROVIDER_NAME.to_string(),
                detail: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }
}

/// bunny.net DNS Provider
///
/// Resolves endpoint names to zones and applies change batches through a [`RecordApi`].
pub struct BunnyProvider {
    pub(crate) api: Arc<dyn RecordApi>,
    pub(crate) domain_filter: DomainFilter,
}

impl BunnyProvider {
    /// Wrap a record API. Fails if the record type table is inconsistent.
    pub fn new(api: Arc<dyn RecordApi>) -> Result<Self> {
        verify_record_types()?;
        Ok(Self {
            api,
            domain_filter: DomainFilter::default(),
        })
    }

    /// Restrict listed endpoints to the given filter and announce it during negotiation.
    #[must_use]
    pub fn with_domain_filter(mut self, domain_filter: DomainFilter) -> Self {
        self.domain_filter = domain_filter;
        self
    }
}

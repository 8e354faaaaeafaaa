//! Provider factory function.

use std::sync::Arc;

use crate::error::Result;
use crate::providers::{BunnyClient, BunnyProvider, ClientConfig};
use crate::traits::DnsProvider;
use crate::types::DomainFilter;

/// Creates a [`DnsProvider`] backed by the bunny.net HTTPS API.
///
/// The HTTP client is built once here and owned by the returned provider.
/// The provider is wrapped in `Arc<dyn DnsProvider>` so webhook workers can
/// share it.
///
/// # Examples
///
/// ```rust,no_run
/// use bunny_dns_provider::{create_provider, ClientConfig, DomainFilter};
///
/// let provider = create_provider(
///     ClientConfig::new("your-api-key"),
///     DomainFilter::new(vec!["example.com".to_string()]),
/// ).unwrap();
/// ```
pub fn create_provider(
    config: ClientConfig,
    domain_filter: DomainFilter,
) -> Result<Arc<dyn DnsProvider>> {
    let client = BunnyClient::new(config)?;
    let provider = BunnyProvider::new(Arc::new(client))?.with_domain_filter(domain_filter);
    Ok(Arc::new(provider))
}

//! # bunny-dns-provider
//!
//! Zone resolution and change application for managing [bunny.net](https://bunny.net/)
//! DNS records from [external-dns](https://github.com/kubernetes-sigs/external-dns).
//!
//! The crate maps fully-qualified names onto bunny.net zones using the public
//! suffix list, translates between bunny.net records and external-dns
//! endpoints, and applies change batches with a fixed ordering.
//!
//! ## Supported Record Types
//!
//! | Type | Code | Notes |
//! |------|------|-------|
//! | `A` | 0 | |
//! | `AAAA` | 1 | |
//! | `CNAME` | 2 | |
//! | `TXT` | 3 | |
//! | `PZ` | 7 | Pull Zone alias; the target is the pull zone id |
//! | `SRV` | 8 | |
//! | `NS` | 12 | |
//!
//! Records of any other type are skipped when listing and rejected on create.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for static builds and container images.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bunny_dns_provider::{
//!     create_provider, Changes, ClientConfig, DnsProvider, DomainFilter, Endpoint,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = create_provider(ClientConfig::new("your-api-key"), DomainFilter::default())?;
//!
//!     // Current state, one endpoint per (name, type)
//!     for endpoint in provider.records().await? {
//!         println!("{} {} -> {:?}", endpoint.dns_name, endpoint.record_type, endpoint.targets);
//!     }
//!
//!     // Replace a target: the delete is issued before the create
//!     let changes = Changes {
//!         delete: vec![Endpoint::with_ttl("www.example.com", "A", 300, "1.2.3.4")],
//!         create: vec![Endpoint::with_ttl("www.example.com", "A", 300, "5.6.7.8")],
//!         ..Changes::default()
//!     };
//!     provider.apply_changes(&changes).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError):
//!
//! - [`ProviderError::InvalidCredentials`]: the API key was rejected
//! - [`ProviderError::DomainNotFound`]: no zone holds the name
//! - [`ProviderError::InvalidParameter`]: a record failed validation
//! - [`ProviderError::UnsupportedRecordType`]: type outside the table above
//!
//! Nothing is retried. A delete that finds its record already gone counts as done.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

#[cfg(test)]
mod test_utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export factory function
pub use factory::create_provider;

// Re-export traits
pub use traits::{DnsProvider, RecordApi};

// Re-export types
pub use types::{Changes, DomainFilter, Endpoint, ProviderSpecificProperty};

// Re-export the bunny.net implementation
pub use providers::{
    BunnyClient, BunnyProvider, ClientConfig, DnsRecord, DnsZone, RECORD_TYPES, ResolvedZone,
    merge_endpoints, record_target, record_type_code, record_type_name, resolve_zone, to_endpoint,
    to_wire_record, verify_record_types,
};

// Re-export log helpers
pub use utils::log_sanitizer::mask_secret;

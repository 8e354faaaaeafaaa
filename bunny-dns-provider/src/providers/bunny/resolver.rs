//! Zone resolution: hostname -> (zone, record-relative subdomain)

use crate::error::{ProviderError, Result};
use crate::traits::RecordApi;

use super::types::DnsZone;
use super::PROVIDER_NAME;

/// A hostname mapped onto the zone that holds it.
#[derive(Debug, Clone)]
pub struct ResolvedZone {
    /// Name relative to the zone; empty for the zone apex.
    pub subdomain: String,
    /// The zone, records included, as returned by the search.
    pub zone: DnsZone,
}

/// Split a hostname into its registrable domain (eTLD+1) and the labels in front of it.
///
/// The trailing dot is dropped. The registrable domain is looked up lowercase;
/// the subdomain keeps the case it was given in.
fn split_registrable(hostname: &str) -> std::result::Result<(String, String), String> {
    let hostname = hostname.trim_end_matches('.');
    let lowered = hostname.to_ascii_lowercase();

    let registrable = psl::domain_str(&lowered)
        .ok_or_else(|| format!("no registrable domain under the public suffix list for '{hostname}'"))?
        .to_string();

    if lowered == registrable {
        return Ok((registrable, String::new()));
    }

    // ASCII 小写不改变字节长度，可直接按长度切原始主机名
    match lowered.strip_suffix(&format!(".{registrable}")) {
        Some(sub) => Ok((registrable, hostname[..sub.len()].to_string())),
        None => Err(format!(
            "'{registrable}' is not a suffix of '{hostname}'"
        )),
    }
}

/// Find the zone holding `hostname` and the subdomain relative to it.
///
/// Searches the provider for the registrable domain and picks the zone whose
/// domain matches it exactly. Every failure along the way is logged with its
/// cause and reported as [`ProviderError::DomainNotFound`].
pub async fn resolve_zone(api: &dyn RecordApi, hostname: &str) -> Result<ResolvedZone> {
    let (registrable, subdomain) = match split_registrable(hostname) {
        Ok(parts) => parts,
        Err(cause) => {
            log::warn!("[{PROVIDER_NAME}] zone resolution failed: hostname={hostname} cause={cause}");
            return Err(zone_not_found(hostname));
        }
    };

    let zones = match api.search_zones(&registrable).await {
        Ok(zones) => zones,
        Err(e) => {
            log::error!(
                "[{PROVIDER_NAME}] zone search failed: hostname={hostname} registrable={registrable} subdomain={subdomain} err={e}"
            );
            return Err(zone_not_found(hostname));
        }
    };

    let Some(zone) = zones.into_iter().find(|z| z.domain.eq_ignore_ascii_case(&registrable)) else {
        log::error!(
            "[{PROVIDER_NAME}] no exact zone match: hostname={hostname} registrable={registrable} subdomain={subdomain}"
        );
        return Err(zone_not_found(hostname));
    };

    log::debug!(
        "[{PROVIDER_NAME}] resolved hostname={hostname} zone.id={} zone.domain={} subdomain={subdomain}",
        zone.id,
        zone.domain
    );

    Ok(ResolvedZone { subdomain, zone })
}

fn zone_not_found(hostname: &str) -> ProviderError {
    ProviderError::DomainNotFound {
        provider: PROVIDER_NAME.to_string(),
        domain: hostname.to_string(),
        raw_message: Some("no DnsZone found".to_string()),
    }
}

//! 记录形态转换：bunny.net 记录 <-> Endpoint

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::{ProviderError, Result};
use crate::types::Endpoint;

use super::types::{DnsRecord, DnsZone};
use super::PROVIDER_NAME;

/// Pull Zone 别名记录的类型名
pub(crate) const PZ_TYPE_NAME: &str = "PZ";
/// Pull Zone 别名记录的类型码
const PZ_TYPE_CODE: u8 = 7;

/// Record type name ↔ provider type code.
///
/// Single source of truth for both translation directions. The reverse map is
/// derived from it on first use.
pub const RECORD_TYPES: [(&str, u8); 7] = [
    ("A", 0),
    ("AAAA", 1),
    ("CNAME", 2),
    ("TXT", 3),
    (PZ_TYPE_NAME, PZ_TYPE_CODE),
    ("SRV", 8),
    ("NS", 12),
];

static NAME_TO_CODE: LazyLock<HashMap<&'static str, u8>> =
    LazyLock::new(|| RECORD_TYPES.iter().copied().collect());

static CODE_TO_NAME: LazyLock<HashMap<u8, &'static str>> =
    LazyLock::new(|| RECORD_TYPES.iter().map(|&(name, code)| (code, name)).collect());

/// Provider type code for a record type label, if supported.
pub fn record_type_code(name: &str) -> Option<u8> {
    NAME_TO_CODE.get(name).copied()
}

/// Record type label for a provider type code, if known.
pub fn record_type_name(code: u8) -> Option<&'static str> {
    CODE_TO_NAME.get(&code).copied()
}

/// Check that no two type names share a code and no name appears twice.
pub fn verify_record_types() -> Result<()> {
    ensure_one_to_one(&RECORD_TYPES)
}

fn ensure_one_to_one(table: &[(&str, u8)]) -> Result<()> {
    let names: HashMap<&str, u8> = table.iter().copied().collect();
    let codes: HashMap<u8, &str> = table.iter().map(|&(name, code)| (code, name)).collect();

    if names.len() == table.len() && codes.len() == table.len() {
        return Ok(());
    }

    Err(ProviderError::Unknown {
        provider: PROVIDER_NAME.to_string(),
        raw_code: None,
        raw_message: "internal record type table is not one-to-one".to_string(),
    })
}

/// The value a record contributes as an endpoint target.
///
/// PZ records store their link in `PullZoneId` and have an empty `Value`;
/// their target is the pull zone id in decimal.
pub fn record_target(record: &DnsRecord) -> String {
    if record.record_type == PZ_TYPE_CODE && record.value.is_empty() && record.pull_zone_id != 0 {
        record.pull_zone_id.to_string()
    } else {
        record.value.clone()
    }
}

/// Convert a zone record into an endpoint.
///
/// Returns `None` for type codes missing from [`RECORD_TYPES`].
pub fn to_endpoint(zone: &DnsZone, record: &DnsRecord) -> Option<Endpoint> {
    let record_type = record_type_name(record.record_type)?;

    let dns_name = if record.name.is_empty() {
        zone.domain.clone()
    } else {
        format!("{}.{}", record.name, zone.domain)
    };

    Some(Endpoint::with_ttl(
        dns_name,
        record_type,
        record.ttl,
        record_target(record),
    ))
}

/// Prepare a record for the create call.
///
/// The owning zone must be set. For PZ records the link name must hold the
/// numeric pull zone id; it is moved into `PullZoneId` and both `LinkName` and
/// `Value` are cleared.
pub fn to_wire_record(mut record: DnsRecord) -> Result<DnsRecord> {
    if record.zone == 0 {
        return Err(invalid_parameter("zone", "zone is required"));
    }

    if record.record_type == PZ_TYPE_CODE {
        if record.link_name.is_empty() {
            return Err(invalid_parameter(
                "link_name",
                "link name should contain the pull zone id",
            ));
        }

        let pull_zone_id = record.link_name.parse::<i64>().map_err(|e| {
            invalid_parameter(
                "link_name",
                format!("'{}' is not a pull zone id: {e}", record.link_name),
            )
        })?;

        record.pull_zone_id = pull_zone_id;
        record.link_name.clear();
        record.value.clear();
    }

    Ok(record)
}

/// Merge endpoints that share name and type into one endpoint with all targets.
///
/// Order of first appearance is kept; the merged endpoint keeps the first TTL.
pub fn merge_endpoints(endpoints: Vec<Endpoint>) -> Vec<Endpoint> {
    let mut merged: Vec<Endpoint> = Vec::with_capacity(endpoints.len());
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for endpoint in endpoints {
        let key = (endpoint.dns_name.clone(), endpoint.record_type.clone());
        if let Some(&i) = index.get(&key) {
            for target in endpoint.targets {
                if !merged[i].targets.contains(&target) {
                    merged[i].targets.push(target);
                }
            }
        } else {
            index.insert(key, merged.len());
            merged.push(endpoint);
        }
    }

    merged
}

fn invalid_parameter(param: &str, detail: impl Into<String>) -> ProviderError {
    ProviderError::InvalidParameter {
        provider: PROVIDER_NAME.to_string(),
        param: param.to_string(),
        detail: detail.into(),
    }
}

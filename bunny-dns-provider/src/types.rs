use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::utils::serde_helpers::null_as_default;

// ============ Endpoint ============

/// A provider-specific key/value attached to an endpoint by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSpecificProperty {
    /// Property name.
    pub name: String,
    /// Property value.
    pub value: String,
}

/// A canonical DNS assertion, independent of how the provider stores it.
///
/// Serialized in the external-dns webhook shape (`dnsName`, `recordType`, `recordTTL`, ...).
/// One endpoint may carry several targets; each target becomes one provider record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Fully-qualified name (e.g., `"www.example.com"`).
    pub dns_name: String,
    /// Target values, in order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub targets: Vec<String>,
    /// Record type label (e.g., `"A"`, `"CNAME"`, `"PZ"`).
    pub record_type: String,
    /// Set identifier for routing policies. Carried through untouched.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub set_identifier: String,
    /// Time to live in seconds. Values below 1 mean "provider default".
    #[serde(rename = "recordTTL", default, deserialize_with = "null_as_default")]
    pub record_ttl: i64,
    /// Orchestrator labels. Carried through untouched.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub labels: BTreeMap<String, String>,
    /// Provider-specific properties. Carried through untouched.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub provider_specific: Vec<ProviderSpecificProperty>,
}

impl Endpoint {
    /// Create an endpoint with a TTL and a single target.
    pub fn with_ttl(
        dns_name: impl Into<String>,
        record_type: impl Into<String>,
        ttl: i64,
        target: impl Into<String>,
    ) -> Self {
        Self {
            dns_name: dns_name.into(),
            targets: vec![target.into()],
            record_type: record_type.into(),
            record_ttl: ttl,
            ..Self::default()
        }
    }
}

// ============ Change Batch ============

/// The four-way partition of endpoint differences for one reconciliation cycle.
///
/// Field names follow the orchestrator's wire format (`Create`, `UpdateOld`, ...).
/// A `null` list is treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Changes {
    /// Endpoints to create.
    #[serde(default, deserialize_with = "null_as_default")]
    pub create: Vec<Endpoint>,
    /// Previous state of updated endpoints; removed before anything is created.
    #[serde(default, deserialize_with = "null_as_default")]
    pub update_old: Vec<Endpoint>,
    /// New state of updated endpoints; created after all removals.
    #[serde(default, deserialize_with = "null_as_default")]
    pub update_new: Vec<Endpoint>,
    /// Endpoints to delete.
    #[serde(default, deserialize_with = "null_as_default")]
    pub delete: Vec<Endpoint>,
}

impl Changes {
    /// Whether the batch carries no work at all.
    pub fn is_empty(&self) -> bool {
        self.create.is_empty()
            && self.update_old.is_empty()
            && self.update_new.is_empty()
            && self.delete.is_empty()
    }
}

// ============ Domain Filter ============

/// Domain suffixes this provider is responsible for.
///
/// An empty `include` list accepts every name that is not excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainFilter {
    /// Accepted domain suffixes.
    #[serde(default, deserialize_with = "null_as_default")]
    pub include: Vec<String>,
    /// Rejected domain suffixes, checked before `include`.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub exclude: Vec<String>,
}

impl DomainFilter {
    /// Build a filter accepting the given suffixes.
    pub fn new(include: Vec<String>) -> Self {
        Self {
            include,
            exclude: Vec::new(),
        }
    }

    /// Whether `name` falls under this filter.
    pub fn matches(&self, name: &str) -> bool {
        let name = name.trim_end_matches('.').to_ascii_lowercase();
        if self.exclude.iter().any(|d| suffix_matches(&name, d)) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|d| suffix_matches(&name, d))
    }
}

fn suffix_matches(name: &str, domain: &str) -> bool {
    let domain = domain.trim_start_matches('.').trim_end_matches('.');
    if domain.is_empty() {
        return false;
    }
    let domain = domain.to_ascii_lowercase();
    name == domain
        || name
            .strip_suffix(&domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_webhook_field_names() {
        let ep = Endpoint::with_ttl("www.example.com", "A", 300, "1.2.3.4");
        let json = serde_json::to_value(&ep).unwrap();
        assert_eq!(json["dnsName"], "www.example.com");
        assert_eq!(json["recordType"], "A");
        assert_eq!(json["recordTTL"], 300);
        assert_eq!(json["targets"][0], "1.2.3.4");
        assert!(json.get("setIdentifier").is_none());
        assert!(json.get("labels").is_none());
    }

    #[test]
    fn endpoint_keeps_pass_through_fields() {
        let json = r#"{
            "dnsName": "a.example.com",
            "targets": ["1.1.1.1"],
            "recordType": "A",
            "setIdentifier": "eu",
            "labels": {"owner": "default"},
            "providerSpecific": [{"name": "x", "value": "y"}]
        }"#;
        let ep: Endpoint = serde_json::from_str(json).unwrap();
        assert_eq!(ep.record_ttl, 0);
        assert_eq!(ep.set_identifier, "eu");
        assert_eq!(ep.labels.get("owner").map(String::as_str), Some("default"));
        assert_eq!(ep.provider_specific[0].value, "y");
    }

    #[test]
    fn changes_accept_null_lists() {
        let json = r#"{
            "Create": [{"dnsName": "a.example.com", "targets": ["1.1.1.1"], "recordType": "A", "recordTTL": 60}],
            "UpdateOld": null,
            "UpdateNew": null,
            "Delete": null
        }"#;
        let changes: Changes = serde_json::from_str(json).unwrap();
        assert_eq!(changes.create.len(), 1);
        assert!(changes.update_old.is_empty());
        assert!(changes.delete.is_empty());
        assert!(!changes.is_empty());
    }

    #[test]
    fn changes_accept_missing_lists() {
        let changes: Changes = serde_json::from_str("{}").unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(DomainFilter::default().matches("anything.example.org"));
    }

    #[test]
    fn filter_matches_on_label_boundary() {
        let filter = DomainFilter::new(vec!["example.com".to_string()]);
        assert!(filter.matches("example.com"));
        assert!(filter.matches("www.example.com."));
        assert!(filter.matches("WWW.Example.COM"));
        assert!(!filter.matches("badexample.com"));
        assert!(!filter.matches("example.org"));
    }

    #[test]
    fn filter_exclude_wins() {
        let filter = DomainFilter {
            include: vec!["example.com".to_string()],
            exclude: vec!["internal.example.com".to_string()],
        };
        assert!(filter.matches("api.example.com"));
        assert!(!filter.matches("db.internal.example.com"));
    }
}

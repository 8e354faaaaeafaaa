//! DNS Provider implementations

pub(crate) mod bunny;

pub use bunny::{
    BunnyClient, BunnyProvider, ClientConfig, DnsRecord, DnsZone, RECORD_TYPES, ResolvedZone,
    merge_endpoints, record_target, record_type_code, record_type_name, resolve_zone, to_endpoint,
    to_wire_record, verify_record_types,
};

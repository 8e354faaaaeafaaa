//! bunny.net DNS API 类型定义

use serde::{Deserialize, Serialize};

use crate::utils::serde_helpers::{is_zero, null_as_default};

/// 分页列表响应（`GET /dnszone`）
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ZoneListResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<DnsZone>,
    #[serde(default)]
    pub has_more_items: bool,
}

/// 错误响应体（400 等）
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub error_key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub field: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

/// DNS Zone
///
/// 名称服务器、SOA、日志相关字段对本库不透明，仅原样保留。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DnsZone {
    #[serde(default)]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain: String,
    #[serde(default)]
    pub custom_nameservers_enabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nameserver1: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nameserver2: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub soa_email: String,
    #[serde(default)]
    pub logging_enabled: bool,
    #[serde(rename = "LoggingIPAnonymizationEnabled", default)]
    pub logging_ip_anonymization_enabled: bool,
    #[serde(default)]
    pub log_anonymization_type: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub records: Vec<DnsRecord>,
}

/// DNS Record（请求与响应共用）
///
/// `zone` 是所属 Zone 的反向引用，不参与序列化。
/// `Id`、`PullZoneId`、`Weight` 为 0 时、`LinkName` 为空时不发送。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DnsRecord {
    #[serde(skip)]
    pub zone: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(rename = "Type", default)]
    pub record_type: u8,
    #[serde(default)]
    pub ttl: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_zero"
    )]
    pub pull_zone_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub weight: i64,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub port: i64,
    #[serde(default)]
    pub flags: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tag: String,
    #[serde(default)]
    pub accelerated: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub accelerated_pull_zone_id: i64,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub link_name: String,
    #[serde(default)]
    pub monitor_type: u8,
    #[serde(default)]
    pub geolocation_latitude: f64,
    #[serde(default)]
    pub geolocation_longitude: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub latency_zone: String,
    #[serde(default)]
    pub smart_routing_type: u8,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment: String,
}

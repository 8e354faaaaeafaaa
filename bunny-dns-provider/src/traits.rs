use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::providers::bunny::PROVIDER_NAME;
use crate::providers::{DnsRecord, DnsZone};
use crate::types::{Changes, DomainFilter, Endpoint};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// HTTP 状态码
    pub status: u16,
    /// 错误键（bunny.net 的 `ErrorKey`）
    pub code: Option<String>,
    /// 出错字段（bunny.net 的 `Field`）
    pub field: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            code: None,
            field: None,
            message: message.into(),
        }
    }

    pub fn with_key(
        status: u16,
        code: impl Into<String>,
        field: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            code: Some(code.into()),
            field,
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
/// 用于在映射错误时提供额外信息
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 记录 ID（用于 `RecordNotFound`）
    pub record_id: Option<String>,
    /// Zone ID 或域名（用于 `DomainNotFound`）
    pub domain: Option<String>,
}

impl ErrorContext {
    pub fn record(zone_id: i64, record_id: i64) -> Self {
        Self {
            record_id: Some(record_id.to_string()),
            domain: Some(zone_id.to_string()),
        }
    }

    pub fn zone(zone_id: i64) -> Self {
        Self {
            record_id: None,
            domain: Some(zone_id.to_string()),
        }
    }
}

/// Provider 错误映射 Trait（内部使用）
/// 将非成功的 HTTP 响应映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: Some(raw.code.unwrap_or_else(|| raw.status.to_string())),
            raw_message: raw.message,
        }
    }
}

/// Remote zone/record API consumed by the reconciliation engine.
///
/// Implemented over HTTPS by [`BunnyClient`](crate::BunnyClient); tests drive the
/// engine with an in-memory double. Every call goes to the provider: nothing is
/// cached between calls.
#[async_trait]
pub trait RecordApi: Send + Sync {
    /// List every zone on the account, records included.
    async fn list_zones(&self) -> Result<Vec<DnsZone>>;

    /// Search zones whose domain contains `domain`. Callers filter for an exact match.
    async fn search_zones(&self, domain: &str) -> Result<Vec<DnsZone>>;

    /// Fetch one zone with its records.
    async fn get_zone(&self, zone_id: i64) -> Result<DnsZone>;

    /// Create a record in a zone. `record` must already be in wire shape.
    async fn create_record(&self, zone_id: i64, record: &DnsRecord) -> Result<()>;

    /// Delete a record by id. An absent record yields [`ProviderError::RecordNotFound`].
    async fn delete_record(&self, zone_id: i64, record_id: i64) -> Result<()>;

    /// Fetch one record by id, through its zone.
    async fn get_record(&self, zone_id: i64, record_id: i64) -> Result<DnsRecord> {
        let zone = self.get_zone(zone_id).await?;
        zone.records
            .into_iter()
            .find(|r| r.id == record_id)
            .map(|mut r| {
                r.zone = zone_id;
                r
            })
            .ok_or_else(|| ProviderError::RecordNotFound {
                provider: PROVIDER_NAME.to_string(),
                record_id: record_id.to_string(),
                raw_message: None,
            })
    }
}

/// DNS provider surface exposed to the orchestrator.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// Domains this provider instance manages, announced during negotiation.
    fn domain_filter(&self) -> DomainFilter;

    /// Current state of every managed zone as endpoints.
    async fn records(&self) -> Result<Vec<Endpoint>>;

    /// Apply one reconciliation batch.
    ///
    /// Removals (`Delete`, then `UpdateOld`) run to completion before additions
    /// (`Create`, then `UpdateNew`). The first hard error aborts the batch.
    async fn apply_changes(&self, changes: &Changes) -> Result<()>;

    /// Let the provider canonicalize desired endpoints before planning.
    ///
    /// 默认实现原样返回。
    async fn adjust_endpoints(&self, endpoints: Vec<Endpoint>) -> Result<Vec<Endpoint>> {
        Ok(endpoints)
    }
}

//! bunny.net error mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{BunnyClient, PROVIDER_NAME};

/// bunny.net 状态码映射
///
/// 401 在 `HttpUtils::execute_request` 中已转为 `InvalidCredentials`，此处兜底。
impl ProviderErrorMapper for BunnyClient {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.status {
            401 => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // 404 + record_id: 记录不存在
            404 if context.record_id.is_some() => ProviderError::RecordNotFound {
                provider: self.provider_name().to_string(),
                record_id: context.record_id.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            // 404 + zone: 区域不存在
            404 if context.domain.is_some() => ProviderError::DomainNotFound {
                provider: self.provider_name().to_string(),
                domain: context.domain.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            // 400 + ErrorKey: 参数校验失败
            400 if raw.code.is_some() => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: raw.field.unwrap_or_else(|| "general".to_string()),
                detail: raw.message,
            },

            _ => self.unknown_error(raw),
        }
    }
}

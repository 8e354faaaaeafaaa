//! bunny.net HTTP 请求方法

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::{HttpResponse, HttpUtils};
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError, RecordApi};
use crate::utils::log_sanitizer::truncate_for_log;

use super::types::{DnsRecord, DnsZone, ErrorResponse, ZoneListResponse};
use super::{BunnyClient, MAX_PAGE_SIZE_ZONES, PROVIDER_NAME};

const STATUS_OK: u16 = 200;
const STATUS_CREATED: u16 = 201;
const STATUS_NO_CONTENT: u16 = 204;

impl BunnyClient {
    // ==================== 辅助方法 ====================

    /// 发送请求（附带 AccessKey；有 body 时附带 Content-Type）
    async fn send(&self, method: Method, path: &str, body: Option<String>) -> Result<HttpResponse> {
        let url = format!("{}{path}", self.api_url);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header("AccessKey", &self.api_key);

        if let Some(payload) = body {
            log::debug!("[{PROVIDER_NAME}] Request Body: {}", truncate_for_log(&payload));
            request = request
                .header("Content-Type", "application/json")
                .body(payload);
        }

        HttpUtils::execute_request(request, PROVIDER_NAME, method.as_str(), &url).await
    }

    /// 统一处理非预期状态码
    fn expect_status(&self, response: &HttpResponse, expected: u16, ctx: ErrorContext) -> Result<()> {
        if response.status == expected {
            return Ok(());
        }

        // 尝试解析结构化错误
        let raw = match serde_json::from_str::<ErrorResponse>(&response.body) {
            Ok(err) if !err.error_key.is_empty() => RawApiError::with_key(
                response.status,
                err.error_key,
                (!err.field.is_empty()).then_some(err.field),
                err.message,
            ),
            _ => RawApiError::new(
                response.status,
                format!(
                    "unexpected status code: {} {}",
                    response.status,
                    truncate_for_log(&response.body)
                )
                .trim_end()
                .to_string(),
            ),
        };

        Err(self.map_error(raw, ctx))
    }

    /// 执行 GET 请求并解析 200 响应
    async fn get_json<T: DeserializeOwned>(&self, path: &str, ctx: ErrorContext) -> Result<T> {
        let response = self.send(Method::GET, path, None).await?;
        self.expect_status(&response, STATUS_OK, ctx)?;
        HttpUtils::parse_json(&response.body, PROVIDER_NAME)
    }
}

#[async_trait]
impl RecordApi for BunnyClient {
    async fn list_zones(&self) -> Result<Vec<DnsZone>> {
        let mut zones = Vec::new();
        let mut page = 1_u32;

        loop {
            let path = format!("/dnszone?page={page}&perPage={MAX_PAGE_SIZE_ZONES}");
            let response: ZoneListResponse = self.get_json(&path, ErrorContext::default()).await?;

            let fetched = response.items.len();
            zones.extend(response.items);

            if !response.has_more_items || fetched == 0 {
                break;
            }
            page += 1;
        }

        log::debug!("[{PROVIDER_NAME}] listed {} zones", zones.len());
        Ok(zones)
    }

    async fn search_zones(&self, domain: &str) -> Result<Vec<DnsZone>> {
        let path = format!("/dnszone?search={}", urlencoding::encode(domain));
        let response: ZoneListResponse = self
            .get_json(
                &path,
                ErrorContext {
                    domain: Some(domain.to_string()),
                    ..ErrorContext::default()
                },
            )
            .await?;
        Ok(response.items)
    }

    async fn get_zone(&self, zone_id: i64) -> Result<DnsZone> {
        self.get_json(&format!("/dnszone/{zone_id}"), ErrorContext::zone(zone_id))
            .await
    }

    async fn create_record(&self, zone_id: i64, record: &DnsRecord) -> Result<()> {
        let payload = HttpUtils::to_json(record, PROVIDER_NAME)?;
        let response = self
            .send(
                Method::PUT,
                &format!("/dnszone/{zone_id}/records"),
                Some(payload),
            )
            .await?;
        self.expect_status(&response, STATUS_CREATED, ErrorContext::zone(zone_id))
    }

    async fn delete_record(&self, zone_id: i64, record_id: i64) -> Result<()> {
        let response = self
            .send(
                Method::DELETE,
                &format!("/dnszone/{zone_id}/records/{record_id}"),
                None,
            )
            .await?;
        self.expect_status(
            &response,
            STATUS_NO_CONTENT,
            ErrorContext::record(zone_id, record_id),
        )
    }
}

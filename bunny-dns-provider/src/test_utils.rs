//! 测试辅助模块
//!
//! 提供记录调用顺序的 `RecordApi` mock、本地 HTTP 桩服务和便捷的测试数据工厂。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::RwLock;

use crate::error::{ProviderError, Result};
use crate::providers::{DnsRecord, DnsZone};
use crate::traits::RecordApi;

/// A remote call observed by [`MockRecordApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    ListZones,
    Search(String),
    GetZone(i64),
    Create { zone_id: i64, record: DnsRecord },
    Delete { zone_id: i64, record_id: i64 },
}

// ===== MockRecordApi =====

pub struct MockRecordApi {
    zones: RwLock<Vec<DnsZone>>,
    calls: RwLock<Vec<ApiCall>>,
    /// 如果 Some，search_zones 返回此错误
    search_error: RwLock<Option<ProviderError>>,
    /// 如果 Some，create_record 返回此错误
    create_error: RwLock<Option<ProviderError>>,
    /// 按记录 ID 配置的 delete_record 错误
    delete_errors: RwLock<HashMap<i64, ProviderError>>,
}

impl MockRecordApi {
    pub fn new(zones: Vec<DnsZone>) -> Self {
        Self {
            zones: RwLock::new(zones),
            calls: RwLock::new(Vec::new()),
            search_error: RwLock::new(None),
            create_error: RwLock::new(None),
            delete_errors: RwLock::new(HashMap::new()),
        }
    }

    pub async fn fail_search(&self, err: ProviderError) {
        *self.search_error.write().await = Some(err);
    }

    pub async fn fail_create(&self, err: ProviderError) {
        *self.create_error.write().await = Some(err);
    }

    pub async fn fail_delete(&self, record_id: i64, err: ProviderError) {
        self.delete_errors.write().await.insert(record_id, err);
    }

    pub async fn calls(&self) -> Vec<ApiCall> {
        self.calls.read().await.clone()
    }

    /// Only the create/delete calls, in order.
    pub async fn mutations(&self) -> Vec<ApiCall> {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| matches!(c, ApiCall::Create { .. } | ApiCall::Delete { .. }))
            .cloned()
            .collect()
    }

    pub async fn searches(&self) -> Vec<String> {
        self.calls
            .read()
            .await
            .iter()
            .filter_map(|c| match c {
                ApiCall::Search(domain) => Some(domain.clone()),
                _ => None,
            })
            .collect()
    }

    async fn record(&self, call: ApiCall) {
        self.calls.write().await.push(call);
    }
}

#[async_trait]
impl RecordApi for MockRecordApi {
    async fn list_zones(&self) -> Result<Vec<DnsZone>> {
        self.record(ApiCall::ListZones).await;
        Ok(self.zones.read().await.clone())
    }

    async fn search_zones(&self, domain: &str) -> Result<Vec<DnsZone>> {
        self.record(ApiCall::Search(domain.to_string())).await;
        if let Some(ref err) = *self.search_error.read().await {
            return Err(err.clone());
        }
        Ok(self
            .zones
            .read()
            .await
            .iter()
            .filter(|z| z.domain.contains(domain))
            .cloned()
            .collect())
    }

    async fn get_zone(&self, zone_id: i64) -> Result<DnsZone> {
        self.record(ApiCall::GetZone(zone_id)).await;
        self.zones
            .read()
            .await
            .iter()
            .find(|z| z.id == zone_id)
            .cloned()
            .ok_or_else(|| ProviderError::DomainNotFound {
                provider: "bunny".to_string(),
                domain: zone_id.to_string(),
                raw_message: None,
            })
    }

    async fn create_record(&self, zone_id: i64, record: &DnsRecord) -> Result<()> {
        self.record(ApiCall::Create {
            zone_id,
            record: record.clone(),
        })
        .await;
        if let Some(ref err) = *self.create_error.read().await {
            return Err(err.clone());
        }
        Ok(())
    }

    async fn delete_record(&self, zone_id: i64, record_id: i64) -> Result<()> {
        self.record(ApiCall::Delete { zone_id, record_id }).await;
        match self.delete_errors.read().await.get(&record_id) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

// ===== StubServer =====

/// A request as received by [`StubServer`].
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    /// Path and query, as sent on the request line.
    pub target: String,
    /// Header names are lowercased.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Canned response served by [`StubServer`].
pub struct StubResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
}

impl StubResponse {
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    fn to_http(&self) -> String {
        let reason = match self.status {
            200 => "OK",
            201 => "Created",
            204 => "No Content",
            302 => "Found",
            404 => "Not Found",
            _ => "Stub",
        };
        let mut out = format!("HTTP/1.1 {} {reason}\r\n", self.status);
        for (name, value) in &self.headers {
            out.push_str(&format!("{name}: {value}\r\n"));
        }
        // 204 不带 Content-Length
        if self.status != 204 {
            out.push_str(&format!("Content-Length: {}\r\n", self.body.len()));
        }
        out.push_str("Connection: close\r\n\r\n");
        out.push_str(&self.body);
        out
    }
}

/// Loopback HTTP/1.1 server that answers one canned response per connection, in order.
///
/// Once the responses run out the listener is dropped, so any extra request
/// fails to connect.
pub struct StubServer {
    pub url: String,
    requests: Arc<RwLock<Vec<CapturedRequest>>>,
}

impl StubServer {
    pub async fn start(responses: Vec<StubResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(RwLock::new(Vec::new()));

        let captured = requests.clone();
        tokio::spawn(async move {
            for response in responses {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                let Ok(request) = read_request(&mut stream).await else {
                    return;
                };
                captured.write().await.push(request);
                let _ = stream.write_all(response.to_http().as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        Self { url, requests }
    }

    pub async fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.read().await.clone()
    }
}

async fn read_request(stream: &mut TcpStream) -> std::io::Result<CapturedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0_u8; 1024];

    let head_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).into_owned();
    let mut lines = head.lines();
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let target = request_line.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k == "content-length")
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    while buf.len() < head_end + content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body_end = buf.len().min(head_end + content_length);
    let body = String::from_utf8_lossy(&buf[head_end..body_end]).into_owned();

    Ok(CapturedRequest {
        method,
        target,
        headers,
        body,
    })
}

// ===== 测试数据工厂 =====

pub fn zone(id: i64, domain: &str, records: Vec<DnsRecord>) -> DnsZone {
    DnsZone {
        id,
        domain: domain.to_string(),
        records,
        ..DnsZone::default()
    }
}

pub fn record(id: i64, name: &str, record_type: u8, value: &str) -> DnsRecord {
    DnsRecord {
        id,
        record_type,
        ttl: 300,
        value: value.to_string(),
        name: name.to_string(),
        ..DnsRecord::default()
    }
}

pub fn record_not_found(record_id: i64) -> ProviderError {
    ProviderError::RecordNotFound {
        provider: "bunny".to_string(),
        record_id: record_id.to_string(),
        raw_message: None,
    }
}

//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use bunny_dns_provider::{
    BunnyClient, BunnyProvider, ClientConfig, DnsProvider, DomainFilter, Endpoint, RecordApi,
};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 生成唯一的测试记录名称
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// 从环境变量构造客户端配置
fn client_config() -> Option<ClientConfig> {
    let api_key = env::var("BUNNYNET_API_KEY").ok()?;
    let mut config = ClientConfig::new(api_key);
    if let Ok(api_url) = env::var("BUNNYNET_API_URL") {
        config.api_url = api_url;
    }
    Some(config)
}

/// 测试上下文 - 封装客户端、Provider 和测试域名
pub struct TestContext {
    pub api: Arc<BunnyClient>,
    pub provider: BunnyProvider,
    pub domain: String,
}

impl TestContext {
    /// 创建 bunny.net 测试上下文
    pub fn bunny() -> Option<Self> {
        let domain = env::var("TEST_DOMAIN").ok()?;
        let api = Arc::new(BunnyClient::new(client_config()?).ok()?);
        let provider = BunnyProvider::new(api.clone())
            .ok()?
            .with_domain_filter(DomainFilter::new(vec![domain.clone()]));

        Some(Self {
            api,
            provider,
            domain,
        })
    }

    /// 测试记录的完整域名
    pub fn fqdn(&self, record_name: &str) -> String {
        format!("{record_name}.{}", self.domain)
    }

    /// 测试域名对应的 zone ID
    pub async fn zone_id(&self) -> Option<i64> {
        let zones = self.api.search_zones(&self.domain).await.ok()?;
        zones
            .into_iter()
            .find(|z| z.domain == self.domain)
            .map(|z| z.id)
    }

    /// 查找名称匹配的 endpoint
    pub async fn find_endpoint(&self, fqdn: &str, record_type: &str) -> Option<Endpoint> {
        self.provider
            .records()
            .await
            .ok()?
            .into_iter()
            .find(|ep| ep.dns_name == fqdn && ep.record_type == record_type)
    }

    /// 查找并清理所有测试记录（以 _test- 开头的记录）
    pub async fn cleanup_all_test_records(&self) {
        let Some(zone_id) = self.zone_id().await else {
            return;
        };

        if let Ok(zone) = self.api.get_zone(zone_id).await {
            for record in zone.records {
                if record.name.starts_with("_test-") {
                    let _ = self.api.delete_record(zone_id, record.id).await;
                }
            }
        }
    }
}

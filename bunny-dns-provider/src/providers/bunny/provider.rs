//! bunny.net DnsProvider trait 实现

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::traits::DnsProvider;
use crate::types::{Changes, DomainFilter, Endpoint};

use super::resolver::resolve_zone;
use super::translate::{
    PZ_TYPE_NAME, merge_endpoints, record_target, record_type_code, to_endpoint, to_wire_record,
};
use super::types::DnsRecord;
use super::{BunnyProvider, DEFAULT_TTL, PROVIDER_NAME};

impl BunnyProvider {
    /// 为 endpoint 的每个 target 创建一条记录
    async fn endpoint_create(&self, endpoint: &Endpoint) -> Result<()> {
        let resolved = resolve_zone(self.api.as_ref(), &endpoint.dns_name).await?;

        let record_type = record_type_code(&endpoint.record_type).ok_or_else(|| {
            ProviderError::UnsupportedRecordType {
                provider: PROVIDER_NAME.to_string(),
                record_type: endpoint.record_type.clone(),
            }
        })?;

        let ttl = if endpoint.record_ttl < 1 {
            DEFAULT_TTL
        } else {
            endpoint.record_ttl
        };

        for target in &endpoint.targets {
            log::info!(
                "[{PROVIDER_NAME}] create: zone={} name={:?} type={} target={target} ttl={ttl}",
                resolved.zone.domain,
                resolved.subdomain,
                endpoint.record_type
            );

            // PZ 记录的 target 即 Pull Zone ID
            let link_name = if endpoint.record_type == PZ_TYPE_NAME {
                target.clone()
            } else {
                String::new()
            };

            let record = to_wire_record(DnsRecord {
                zone: resolved.zone.id,
                record_type,
                ttl,
                value: target.clone(),
                name: resolved.subdomain.clone(),
                link_name,
                ..DnsRecord::default()
            })?;

            self.api.create_record(resolved.zone.id, &record).await?;
        }

        Ok(())
    }

    /// 删除与 endpoint 的 (name, type, target) 完全匹配的记录
    async fn endpoint_delete(&self, endpoint: &Endpoint) -> Result<()> {
        let Some(record_type) = record_type_code(&endpoint.record_type) else {
            log::debug!(
                "[{PROVIDER_NAME}] delete skipped, unsupported type: name={} type={}",
                endpoint.dns_name,
                endpoint.record_type
            );
            return Ok(());
        };

        let resolved = resolve_zone(self.api.as_ref(), &endpoint.dns_name).await?;
        let zone = &resolved.zone;

        for target in &endpoint.targets {
            let matches = zone.records.iter().filter(|r| {
                r.name.eq_ignore_ascii_case(&resolved.subdomain)
                    && r.record_type == record_type
                    && record_target(r) == *target
            });

            for record in matches {
                log::info!(
                    "[{PROVIDER_NAME}] delete: zone={} name={:?} type={} target={target} id={}",
                    zone.domain,
                    record.name,
                    endpoint.record_type,
                    record.id
                );

                match self.api.delete_record(zone.id, record.id).await {
                    Ok(()) => {}
                    Err(ProviderError::RecordNotFound { .. }) => {
                        log::warn!(
                            "[{PROVIDER_NAME}] record already gone: zone={} id={}",
                            zone.domain,
                            record.id
                        );
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        Ok(())
    }
}

#[async_trait]
impl DnsProvider for BunnyProvider {
    fn id(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn domain_filter(&self) -> DomainFilter {
        self.domain_filter.clone()
    }

    async fn records(&self) -> Result<Vec<Endpoint>> {
        let zones = self.api.list_zones().await?;

        let endpoints = zones
            .iter()
            .flat_map(|zone| zone.records.iter().filter_map(|r| to_endpoint(zone, r)))
            .collect();

        let endpoints: Vec<Endpoint> = merge_endpoints(endpoints)
            .into_iter()
            .filter(|ep| self.domain_filter.matches(&ep.dns_name))
            .collect();

        log::debug!(
            "[{PROVIDER_NAME}] {} endpoints across {} zones",
            endpoints.len(),
            zones.len()
        );
        Ok(endpoints)
    }

    async fn apply_changes(&self, changes: &Changes) -> Result<()> {
        log::info!(
            "[{PROVIDER_NAME}] applying changes: create={} update={} delete={}",
            changes.create.len(),
            changes.update_new.len(),
            changes.delete.len()
        );

        for endpoint in changes.delete.iter().chain(&changes.update_old) {
            self.endpoint_delete(endpoint).await?;
        }

        for endpoint in changes.create.iter().chain(&changes.update_new) {
            self.endpoint_create(endpoint).await?;
        }

        Ok(())
    }
}

//! Record update orchestration.

use crate::config::{Config, UpdateTarget};
use crate::error::{DdnsError, Result};
use crate::providers::{OvhClient, RecordId, ZoneApi};
use crate::resolver::IpResolver;
use std::net::Ipv4Addr;

/// Outcome of one successfully updated record.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateResult {
    pub domain: String,
    pub subdomain: String,
    pub record_id: RecordId,
    pub ip: Ipv4Addr,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Summary of a complete run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub ip: Ipv4Addr,
    pub updated: Vec<UpdateResult>,
}

/// Drives lookup, update and refresh for each target.
pub struct Updater<'a, A: ZoneApi> {
    api: &'a A,
}

impl<'a, A: ZoneApi> Updater<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Repoint one record at `ip` and publish its zone.
    pub async fn update_target(&self, target: &UpdateTarget, ip: Ipv4Addr) -> Result<UpdateResult> {
        let record_id = self
            .api
            .lookup_record_id(&target.domain, &target.subdomain)
            .await?
            .ok_or_else(|| DdnsError::RecordNotFound {
                domain: target.domain.clone(),
                subdomain: target.subdomain.clone(),
            })?;

        tracing::info!("Updating {} (record id {})", target.fqdn(), record_id);

        self.api
            .update_record_target(&target.domain, record_id, ip)
            .await?;
        self.api.refresh_zone(&target.domain).await?;

        tracing::info!("{} now points to {}", target.fqdn(), ip);

        Ok(UpdateResult {
            domain: target.domain.clone(),
            subdomain: target.subdomain.clone(),
            record_id,
            ip,
            timestamp: chrono::Utc::now(),
        })
    }

    /// Update every target in order with the same `ip`.
    ///
    /// Fail-fast: the first error aborts the remaining targets. Records
    /// updated before the failure keep their new value. Targets sharing a
    /// domain each refresh the zone.
    pub async fn update_all(
        &self,
        targets: &[UpdateTarget],
        ip: Ipv4Addr,
    ) -> Result<Vec<UpdateResult>> {
        let mut updated = Vec::with_capacity(targets.len());
        for target in targets {
            updated.push(self.update_target(target, ip).await?);
        }
        Ok(updated)
    }
}

/// Resolve the public IP once, then update every configured record.
pub async fn run(config: &Config) -> Result<RunReport> {
    let resolver = IpResolver::new(&config.ip_sources)?;
    let client = OvhClient::new(config)?;
    run_with(config, &resolver, &client).await
}

pub(crate) async fn run_with<A: ZoneApi>(
    config: &Config,
    resolver: &IpResolver,
    api: &A,
) -> Result<RunReport> {
    let ip = resolver.resolve().await?;
    tracing::info!("Public IP address: {}", ip);

    let updated = Updater::new(api).update_all(&config.records, ip).await?;
    Ok(RunReport { ip, updated })
}

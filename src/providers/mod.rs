//! DNS zone API providers.

mod ovh;

#[cfg(test)]
mod tests;

pub use ovh::{OvhClient, REFRESH_BASE_URL};

use crate::error::Result;
use async_trait::async_trait;
use std::net::Ipv4Addr;

/// Provider-assigned handle of one DNS record.
pub type RecordId = u64;

/// Authenticated operations needed to repoint an A record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ZoneApi: Send + Sync {
    /// Look up the id of the A record `subdomain` in `domain`.
    ///
    /// `Ok(None)` means the record was not found, including when the
    /// provider answered with something that is not a list of ids.
    async fn lookup_record_id(&self, domain: &str, subdomain: &str) -> Result<Option<RecordId>>;

    /// Point the record at `ip`.
    async fn update_record_target(
        &self,
        domain: &str,
        record_id: RecordId,
        ip: Ipv4Addr,
    ) -> Result<()>;

    /// Publish pending changes of the zone.
    async fn refresh_zone(&self, domain: &str) -> Result<()>;
}

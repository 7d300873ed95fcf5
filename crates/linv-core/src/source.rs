use async_trait::async_trait;
use linode_api::{Linode, LinodeIp};
use tracing::info;

use crate::Result;

/// Where the raw server and address listings come from.
///
/// [`crate::linode::LinodeSource`] talks to the Linode API; tests plug in
/// canned listings.
#[async_trait]
pub trait ServerSource: Send + Sync {
    /// Every server visible to the account.
    async fn list_servers(&self) -> Result<Vec<Linode>>;

    /// Every address of every server visible to the account.
    async fn list_ips(&self) -> Result<Vec<LinodeIp>>;
}

/// Fetch both listings concurrently.
///
/// The first failure is returned and the other request is dropped, so no
/// inventory is ever built from half the data.
pub async fn fetch_records(source: &dyn ServerSource) -> Result<(Vec<Linode>, Vec<LinodeIp>)> {
    let (servers, ips) = tokio::try_join!(source.list_servers(), source.list_ips())?;
    info!(servers = servers.len(), ips = ips.len(), "fetched server listings");
    Ok((servers, ips))
}

//! Joins the server listing with the address listing.

use indexmap::IndexMap;
use linode_api::{Linode, LinodeIp};
use tracing::debug;

/// A server with its addresses attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedServer {
    pub linode: Linode,
    pub ip_public: Option<String>,
    pub ip_private: Option<String>,
}

impl From<Linode> for MergedServer {
    fn from(linode: Linode) -> Self {
        Self {
            linode,
            ip_public: None,
            ip_private: None,
        }
    }
}

/// Merged servers keyed by `LINODEID`, in fetch order.
pub type MergedServers = IndexMap<u64, MergedServer>;

/// Attach addresses from `ips` to the servers in `servers`.
///
/// With `limit_group` set, servers from any other display group are left out
/// before addresses are matched. Addresses of unknown servers are dropped;
/// of several addresses with the same visibility the last one is kept.
pub fn merge_records(
    servers: Vec<Linode>,
    ips: Vec<LinodeIp>,
    limit_group: Option<&str>,
) -> MergedServers {
    let mut merged = MergedServers::new();

    for linode in servers {
        if limit_group.is_some_and(|group| linode.display_group != group) {
            continue;
        }
        merged.insert(linode.id, linode.into());
    }

    for ip in ips {
        let Some(server) = merged.get_mut(&ip.linode_id) else {
            debug!(linode_id = ip.linode_id, address = %ip.address, "dropping address of unlisted linode");
            continue;
        };
        if ip.is_public() {
            server.ip_public = Some(ip.address);
        } else {
            server.ip_private = Some(ip.address);
        }
    }

    merged
}

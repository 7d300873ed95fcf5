use async_trait::async_trait;
use linode_api::{Linode, LinodeClient, LinodeIp};

use crate::config::api_key_from_env;
use crate::source::ServerSource;
use crate::Result;

/// Linode API backed [`ServerSource`].
///
/// Delegates to `linode_api::LinodeClient` for all HTTP calls.
pub struct LinodeSource {
    client: LinodeClient,
}

impl LinodeSource {
    pub fn new(client: LinodeClient) -> Self {
        Self { client }
    }

    /// Create from env vars: `LINODE_API_KEY` (required), `LINODE_API_URL`.
    pub fn from_env() -> Result<Self> {
        let api_key = api_key_from_env()?;
        let client = match std::env::var("LINODE_API_URL") {
            Ok(url) if !url.is_empty() => LinodeClient::with_base_url(api_key, url),
            _ => LinodeClient::new(api_key),
        };
        Ok(Self { client })
    }
}

#[async_trait]
impl ServerSource for LinodeSource {
    async fn list_servers(&self) -> Result<Vec<Linode>> {
        Ok(self.client.list_linodes().await?)
    }

    async fn list_ips(&self) -> Result<Vec<LinodeIp>> {
        Ok(self.client.list_ips().await?)
    }
}

//! Ansible dynamic inventory built from Linode server listings.
//!
//! Server labels follow the convention `name_tag_value_tag_value-value`;
//! the decoded tags, together with id, datacenter and display group, decide
//! which inventory groups each host joins.

pub mod config;
pub mod document;
pub mod inventory;
pub mod label;
pub mod linode;
pub mod merge;
pub mod source;

pub use config::InventoryConfig;
pub use document::{InventoryDocument, lookup_host};
pub use inventory::{InventoryEntry, ServerStatus, build_inventory};
pub use label::{TagSet, TagValue, decode_label};
pub use linode::LinodeSource;
pub use source::{ServerSource, fetch_records};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("linode api error: {0}")]
    Linode(#[from] linode_api::Error),

    #[error("missing env var: {0}")]
    MissingEnv(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Fetch both listings from `source` and build the inventory.
pub async fn run(source: &dyn ServerSource, config: &InventoryConfig) -> Result<InventoryDocument> {
    let (servers, ips) = fetch_records(source).await?;
    let document = build_inventory(servers, ips, config);
    tracing::info!(
        hosts = document.hostvars().count(),
        groups = document.groups().count(),
        "inventory built"
    );
    Ok(document)
}

//! Per-host records and group membership.

use std::fmt;

use linode_api::{Linode, LinodeIp};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::config::InventoryConfig;
use crate::document::InventoryDocument;
use crate::label::{TagSet, decode_label};
use crate::merge::merge_records;

/// Provider-reported server state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Created,
    New,
    Running,
    Stopped,
}

impl ServerStatus {
    /// Map a Linode `STATUS` code. Codes outside the known set yield `None`
    /// and the `status` field is left out of the host record.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            -1 => Some(Self::Created),
            0 => Some(Self::New),
            1 => Some(Self::Running),
            2 => Some(Self::Stopped),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::New => "new",
            Self::Running => "running",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed fields of a host record, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedField {
    Id,
    Group,
    Datacenter,
    Ram,
    Status,
    IpInternal,
    IpExternal,
    Name,
}

impl ReservedField {
    pub const ALL: [Self; 8] = [
        Self::Id,
        Self::Group,
        Self::Datacenter,
        Self::Ram,
        Self::Status,
        Self::IpInternal,
        Self::IpExternal,
        Self::Name,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Group => "group",
            Self::Datacenter => "datacenter",
            Self::Ram => "ram",
            Self::Status => "status",
            Self::IpInternal => "ip_internal",
            Self::IpExternal => "ip_external",
            Self::Name => "name",
        }
    }

    pub fn is_reserved(key: &str) -> bool {
        Self::ALL.iter().any(|field| field.as_str() == key)
    }
}

/// Host variables for one server.
///
/// Decoded tags are written after the fixed fields, so a tag named like a
/// fixed field (`group`, `status`, ...) replaces that field's value in the
/// serialized record and in [`InventoryEntry::field`]. The typed fields keep
/// the provider values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    pub id: u64,
    pub group: String,
    pub datacenter: u64,
    pub ram: u64,
    pub status: Option<ServerStatus>,
    pub ip_internal: Option<String>,
    pub ip_external: Option<String>,
    pub name: String,
    pub tags: TagSet,
}

impl InventoryEntry {
    /// Effective value of `key` as it appears in the serialized record.
    pub fn field(&self, key: &str) -> Option<serde_json::Value> {
        if let Some(tag) = self.tags.get(key) {
            return Some(tag.into());
        }
        let field = ReservedField::ALL.into_iter().find(|f| f.as_str() == key)?;
        self.reserved_value(field)
    }

    fn reserved_value(&self, field: ReservedField) -> Option<serde_json::Value> {
        use serde_json::Value;

        match field {
            ReservedField::Id => Some(Value::String(self.id.to_string())),
            ReservedField::Group => Some(Value::String(self.group.clone())),
            ReservedField::Datacenter => Some(self.datacenter.into()),
            ReservedField::Ram => Some(self.ram.into()),
            ReservedField::Status => self.status.map(|s| Value::String(s.as_str().into())),
            ReservedField::IpInternal => self.ip_internal.clone().map(Value::String),
            ReservedField::IpExternal => self.ip_external.clone().map(Value::String),
            ReservedField::Name => Some(Value::String(self.name.clone())),
        }
    }
}

impl Serialize for InventoryEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;

        for field in ReservedField::ALL {
            let key = field.as_str();
            if let Some(tag) = self.tags.get(key) {
                map.serialize_entry(key, tag)?;
            } else if let Some(value) = self.reserved_value(field) {
                map.serialize_entry(key, &value)?;
            }
        }

        for (key, value) in self.tags.iter() {
            if !ReservedField::is_reserved(key) {
                map.serialize_entry(key, value)?;
            }
        }

        map.end()
    }
}

/// Build the inventory from freshly fetched records.
///
/// Each server lands in `hostvars` under its selected address and in the
/// groups `id_<id>`, `datacenter_<dc>`, `group_<display group>` and
/// `tag_<tag>_<value>` for every tag value, including the canonical name.
/// Tags listed in [`InventoryConfig::non_prefixed_tags`] also yield a group
/// named after the bare value.
pub fn build_inventory(
    servers: Vec<Linode>,
    ips: Vec<LinodeIp>,
    config: &InventoryConfig,
) -> InventoryDocument {
    let merged = merge_records(servers, ips, config.limit_group.as_deref());
    let mut document = InventoryDocument::default();

    for (id, server) in merged {
        let tags = decode_label(server.linode.label.as_deref().unwrap_or_default());
        let address = if config.external_ips {
            server.ip_public.clone()
        } else {
            server.ip_private.clone()
        };

        let status = server.linode.status.and_then(|code| {
            let status = ServerStatus::from_code(code);
            if status.is_none() {
                debug!(linode_id = id, code, "unknown linode status");
            }
            status
        });

        let entry = InventoryEntry {
            id,
            group: server.linode.display_group,
            datacenter: server.linode.datacenter_id,
            ram: server.linode.total_ram,
            status,
            ip_internal: address.clone(),
            ip_external: server.ip_public,
            name: tags.name().to_string(),
            tags,
        };

        let mut groups = vec![
            format!("id_{}", entry.id),
            format!("datacenter_{}", entry.datacenter),
            format!("group_{}", entry.group),
        ];
        for (tag, value) in entry.tags.iter() {
            let non_prefixed = config.is_non_prefixed(tag);
            for value in value.values() {
                groups.push(format!("tag_{tag}_{value}"));
                if non_prefixed {
                    groups.push(value.clone());
                }
            }
        }

        for group in groups {
            document.add_member(group, address.clone());
        }
        document.insert_host(address, entry);
    }

    document
}

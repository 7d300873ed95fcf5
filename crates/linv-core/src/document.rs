//! The inventory document handed to Ansible and the queries over it.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::inventory::InventoryEntry;

/// Top-level key holding per-host variables.
pub const META_KEY: &str = "_meta";

/// Key under [`META_KEY`] mapping addresses to host records.
pub const HOSTVARS_KEY: &str = "hostvars";

/// Hosts without a selected address are recorded under this key, the same
/// key existing consumers of the inventory already look up.
pub const NO_ADDRESS_KEY: &str = "undefined";

/// Groups plus host variables.
///
/// Groups and hosts are kept in discovery order while building; the sorted
/// wire order is produced only when the document is serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryDocument {
    groups: IndexMap<String, Vec<Option<String>>>,
    hostvars: IndexMap<String, InventoryEntry>,
}

impl InventoryDocument {
    /// Append `address` to `group`, creating the group on first use.
    /// Duplicates are kept; an absent address renders as `null`.
    pub(crate) fn add_member(&mut self, group: String, address: Option<String>) {
        self.groups.entry(group).or_default().push(address);
    }

    /// Record `entry` under `address`, replacing any earlier host there.
    pub(crate) fn insert_host(&mut self, address: Option<String>, entry: InventoryEntry) {
        let key = address.unwrap_or_else(|| NO_ADDRESS_KEY.to_string());
        self.hostvars.insert(key, entry);
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &[Option<String>])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn group(&self, name: &str) -> Option<&[Option<String>]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    pub fn hostvars(&self) -> impl Iterator<Item = (&str, &InventoryEntry)> {
        self.hostvars.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Host variables for `address`, or `None` when no host uses it.
    pub fn lookup_host(&self, address: &str) -> Option<&InventoryEntry> {
        self.hostvars.get(address)
    }

    /// Top-level keys in wire order: group names and [`META_KEY`], sorted.
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.groups.keys().map(String::as_str).collect();
        keys.push(META_KEY);
        keys.sort_unstable();
        keys
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Free-standing form of [`InventoryDocument::lookup_host`].
pub fn lookup_host<'a>(document: &'a InventoryDocument, address: &str) -> Option<&'a InventoryEntry> {
    document.lookup_host(address)
}

struct Meta<'a> {
    hostvars: &'a IndexMap<String, InventoryEntry>,
}

impl Serialize for Meta<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(HOSTVARS_KEY, self.hostvars)?;
        map.end()
    }
}

impl Serialize for InventoryDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let keys = self.sorted_keys();
        let mut map = serializer.serialize_map(Some(keys.len()))?;

        for key in keys {
            if key == META_KEY {
                map.serialize_entry(key, &Meta { hostvars: &self.hostvars })?;
            } else if let Some(members) = self.groups.get(key) {
                map.serialize_entry(key, members)?;
            }
        }

        map.end()
    }
}

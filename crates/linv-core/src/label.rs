//! Decoding of server labels into a canonical name plus tags.
//!
//! A label such as `web_env_prod-eu_role_api` reads as the name `web`
//! followed by `tag_value` pairs; each value may hold several hyphen-separated
//! entries, so the example carries `env = [prod, eu]` and `role = [api]`.

use indexmap::IndexMap;
use serde::Serialize;

/// Separates the name and the tag/value segments.
pub const LABEL_SEPARATOR: char = '_';

/// Separates the entries of a multi-valued tag.
pub const VALUE_SEPARATOR: char = '-';

/// Reserved key under which the canonical name is stored.
pub const NAME_KEY: &str = "name";

/// Value of a single tag.
///
/// Decoded tags are always [`TagValue::Multi`], even with a single entry.
/// Only the reserved name is a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TagValue {
    Single(String),
    Multi(Vec<String>),
}

impl TagValue {
    /// Every value of the tag, treating a bare string as a one-element list.
    pub fn values(&self) -> &[String] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Multi(values) => values,
        }
    }
}

impl From<&TagValue> for serde_json::Value {
    fn from(tag: &TagValue) -> Self {
        match tag {
            TagValue::Single(value) => Self::String(value.clone()),
            TagValue::Multi(values) => Self::Array(values.iter().cloned().map(Self::String).collect()),
        }
    }
}

/// Tags decoded from one label, in first-seen order, with the reserved
/// [`NAME_KEY`] entry always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSet {
    tags: IndexMap<String, TagValue>,
}

impl TagSet {
    /// The canonical name (first label segment).
    pub fn name(&self) -> &str {
        match self.tags.get(NAME_KEY) {
            Some(TagValue::Single(name)) => name,
            _ => "",
        }
    }

    pub fn get(&self, key: &str) -> Option<&TagValue> {
        self.tags.get(key)
    }

    /// All entries including the reserved name, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagValue)> {
        self.tags.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Decoded tags only, without the reserved name.
    pub fn decoded(&self) -> impl Iterator<Item = (&str, &TagValue)> {
        self.iter().filter(|(k, _)| *k != NAME_KEY)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Decode `label` into its name and tags.
///
/// Segments after the name pair up as `tag`, `value`. An empty tag segment
/// never starts a pair, a trailing tag without a value is dropped, and a
/// repeated tag replaces the earlier value while keeping its position.
pub fn decode_label(label: &str) -> TagSet {
    let mut segments = label.split(LABEL_SEPARATOR);
    let name = segments.next().unwrap_or_default().to_string();

    let mut tags = IndexMap::new();
    let mut pending: Option<&str> = None;

    for segment in segments {
        match pending.take() {
            Some(tag) => {
                let values = segment.split(VALUE_SEPARATOR).map(str::to_string).collect();
                tags.insert(tag.to_string(), TagValue::Multi(values));
            }
            None if !segment.is_empty() => pending = Some(segment),
            None => {}
        }
    }

    tags.insert(NAME_KEY.to_string(), TagValue::Single(name));
    TagSet { tags }
}

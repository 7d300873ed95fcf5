use crate::{Error, Result};

/// Options controlling how the inventory is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryConfig {
    /// Only include servers whose display group equals this value.
    pub limit_group: Option<String>,
    /// Key hosts by their public address instead of the private one.
    pub external_ips: bool,
    /// Tags whose values also become groups of their own, unprefixed.
    pub non_prefixed_tags: Vec<String>,
}

impl InventoryConfig {
    /// Create from env vars:
    ///
    /// - `LIMIT_GROUP` (optional, empty means no filter)
    /// - `EXTERNAL_IPS` (`"1"` selects public addresses)
    /// - `NON_PREFIXED_TAGS` (comma-separated tag names, optional)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading values from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let limit_group = lookup("LIMIT_GROUP").filter(|s| !s.is_empty());

        let external_ips = lookup("EXTERNAL_IPS").as_deref() == Some("1");

        let non_prefixed_tags: Vec<String> = lookup("NON_PREFIXED_TAGS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            limit_group,
            external_ips,
            non_prefixed_tags,
        }
    }

    pub fn is_non_prefixed(&self, tag: &str) -> bool {
        self.non_prefixed_tags.iter().any(|t| t == tag)
    }
}

/// Read the Linode API key from `LINODE_API_KEY`.
pub fn api_key_from_env() -> Result<String> {
    std::env::var("LINODE_API_KEY")
        .ok()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::MissingEnv("LINODE_API_KEY".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> InventoryConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        InventoryConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config(&[]), InventoryConfig::default());
    }

    #[test]
    fn reads_all_options() {
        let config = config(&[
            ("LIMIT_GROUP", "prod"),
            ("EXTERNAL_IPS", "1"),
            ("NON_PREFIXED_TAGS", "env, role,,"),
        ]);

        assert_eq!(config.limit_group.as_deref(), Some("prod"));
        assert!(config.external_ips);
        assert_eq!(config.non_prefixed_tags, vec!["env", "role"]);
        assert!(config.is_non_prefixed("role"));
        assert!(!config.is_non_prefixed("tier"));
    }

    #[test]
    fn only_one_enables_external_ips() {
        assert!(!config(&[("EXTERNAL_IPS", "true")]).external_ips);
        assert!(!config(&[("EXTERNAL_IPS", "0")]).external_ips);
    }

    #[test]
    fn empty_limit_group_means_no_filter() {
        assert_eq!(config(&[("LIMIT_GROUP", "")]).limit_group, None);
    }
}

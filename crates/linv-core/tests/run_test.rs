// End-to-end runs of the inventory pipeline over canned listings.

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::json;

use linode_api::{Linode, LinodeIp};
use linv_core::{Error, InventoryConfig, ServerSource, fetch_records, lookup_host, run};

struct StaticSource {
    servers: Vec<Linode>,
    ips: Vec<LinodeIp>,
}

#[async_trait]
impl ServerSource for StaticSource {
    async fn list_servers(&self) -> linv_core::Result<Vec<Linode>> {
        Ok(self.servers.clone())
    }

    async fn list_ips(&self) -> linv_core::Result<Vec<LinodeIp>> {
        Ok(self.ips.clone())
    }
}

/// Serves servers but fails the address listing.
struct BrokenIps;

#[async_trait]
impl ServerSource for BrokenIps {
    async fn list_servers(&self) -> linv_core::Result<Vec<Linode>> {
        Ok(vec![Linode {
            id: 1,
            ..Linode::default()
        }])
    }

    async fn list_ips(&self) -> linv_core::Result<Vec<LinodeIp>> {
        Err(linode_api::Error::MissingData {
            action: "linode.ip.list",
        }
        .into())
    }
}

fn source() -> StaticSource {
    let servers: Vec<Linode> = serde_json::from_value(json!([
        {
            "LINODEID": 100,
            "LPM_DISPLAYGROUP": "web",
            "DATACENTERID": 2,
            "TOTALRAM": 2048,
            "STATUS": 1,
            "LABEL": "web1_env_prod-eu_role_api"
        },
        {
            "LINODEID": 200,
            "LPM_DISPLAYGROUP": "db",
            "DATACENTERID": 3,
            "TOTALRAM": 4096,
            "STATUS": 2,
            "LABEL": "db1_env_prod"
        },
        {
            "LINODEID": 300,
            "LPM_DISPLAYGROUP": "web",
            "DATACENTERID": 2,
            "TOTALRAM": 1024,
            "STATUS": 0,
            "LABEL": "web2_env_dev_role"
        }
    ]))
    .unwrap();

    let ips: Vec<LinodeIp> = serde_json::from_value(json!([
        { "LINODEID": 100, "IPADDRESS": "198.51.100.1", "ISPUBLIC": 1 },
        { "LINODEID": 100, "IPADDRESS": "192.168.0.1", "ISPUBLIC": 0 },
        { "LINODEID": 200, "IPADDRESS": "192.168.0.2", "ISPUBLIC": 0 },
        { "LINODEID": 300, "IPADDRESS": "192.168.0.3", "ISPUBLIC": 0 },
        { "LINODEID": 999, "IPADDRESS": "192.168.0.99", "ISPUBLIC": 0 }
    ]))
    .unwrap();

    StaticSource { servers, ips }
}

#[tokio::test]
async fn full_inventory() {
    let config = InventoryConfig {
        non_prefixed_tags: vec!["env".into()],
        ..InventoryConfig::default()
    };
    let document = run(&source(), &config).await.unwrap();

    assert_eq!(
        serde_json::to_value(&document).unwrap(),
        json!({
            "_meta": {
                "hostvars": {
                    "192.168.0.1": {
                        "id": "100", "group": "web", "datacenter": 2, "ram": 2048,
                        "status": "running", "ip_internal": "192.168.0.1",
                        "ip_external": "198.51.100.1", "name": "web1",
                        "env": ["prod", "eu"], "role": ["api"]
                    },
                    "192.168.0.2": {
                        "id": "200", "group": "db", "datacenter": 3, "ram": 4096,
                        "status": "stopped", "ip_internal": "192.168.0.2",
                        "name": "db1", "env": ["prod"]
                    },
                    "192.168.0.3": {
                        "id": "300", "group": "web", "datacenter": 2, "ram": 1024,
                        "status": "new", "ip_internal": "192.168.0.3",
                        "name": "web2", "env": ["dev"]
                    }
                }
            },
            "datacenter_2": ["192.168.0.1", "192.168.0.3"],
            "datacenter_3": ["192.168.0.2"],
            "dev": ["192.168.0.3"],
            "eu": ["192.168.0.1"],
            "group_db": ["192.168.0.2"],
            "group_web": ["192.168.0.1", "192.168.0.3"],
            "id_100": ["192.168.0.1"],
            "id_200": ["192.168.0.2"],
            "id_300": ["192.168.0.3"],
            "prod": ["192.168.0.1", "192.168.0.2"],
            "tag_env_dev": ["192.168.0.3"],
            "tag_env_eu": ["192.168.0.1"],
            "tag_env_prod": ["192.168.0.1", "192.168.0.2"],
            "tag_name_db1": ["192.168.0.2"],
            "tag_name_web1": ["192.168.0.1"],
            "tag_name_web2": ["192.168.0.3"],
            "tag_role_api": ["192.168.0.1"]
        })
    );
}

#[tokio::test]
async fn limited_to_one_display_group() {
    let config = InventoryConfig {
        limit_group: Some("db".into()),
        ..InventoryConfig::default()
    };
    let document = run(&source(), &config).await.unwrap();

    assert_eq!(document.hostvars().count(), 1);
    assert!(document.hostvars().all(|(_, entry)| entry.group == "db"));
    assert_eq!(document.group("group_web"), None);
}

#[tokio::test]
async fn single_host_lookup() {
    let document = run(&source(), &InventoryConfig::default()).await.unwrap();

    let entry = lookup_host(&document, "192.168.0.2").unwrap();
    assert_eq!(entry.id, 200);
    assert_eq!(entry.name, "db1");
    assert!(lookup_host(&document, "198.51.100.1").is_none());
}

#[tokio::test]
async fn output_is_stable_across_runs() {
    let config = InventoryConfig::default();
    let first = run(&source(), &config).await.unwrap().to_json().unwrap();
    let second = run(&source(), &config).await.unwrap().to_json().unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn fetch_failure_aborts_the_run() {
    let result = fetch_records(&BrokenIps).await;
    assert!(matches!(
        result,
        Err(Error::Linode(linode_api::Error::MissingData { .. }))
    ));

    let result = run(&BrokenIps, &InventoryConfig::default()).await;
    assert!(result.is_err());
}

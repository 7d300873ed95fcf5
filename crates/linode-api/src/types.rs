use serde::{Deserialize, Deserializer, Serialize};

// ── Envelope ─────────────────────────────────────────────────────────

/// Response wrapper shared by every action. `DATA` stays untyped until
/// `ERRORARRAY` has been checked, since failed calls send `DATA: {}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(rename = "ACTION", default)]
    pub action: String,
    #[serde(rename = "DATA", default)]
    pub data: Option<serde_json::Value>,
    #[serde(rename = "ERRORARRAY", default)]
    pub errors: Vec<ApiErrorEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorEntry {
    #[serde(rename = "ERRORCODE", default)]
    pub code: i64,
    #[serde(rename = "ERRORMESSAGE", default)]
    pub message: String,
}

// ── Linode types ─────────────────────────────────────────────────────

/// One server as returned by `linode.list`. Fields the inventory does not
/// use are ignored.
///
/// Apart from `LINODEID`, a `null` or wrongly typed field falls back to its
/// default instead of failing the whole listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Linode {
    #[serde(rename = "LINODEID")]
    pub id: u64,
    #[serde(rename = "LPM_DISPLAYGROUP", default, deserialize_with = "lenient_group")]
    pub display_group: String,
    #[serde(rename = "DATACENTERID", default, deserialize_with = "lenient_u64")]
    pub datacenter_id: u64,
    #[serde(rename = "TOTALRAM", default, deserialize_with = "lenient_u64")]
    pub total_ram: u64,
    #[serde(rename = "STATUS", default, deserialize_with = "lenient_i64")]
    pub status: Option<i64>,
    #[serde(rename = "LABEL", default, deserialize_with = "lenient_string")]
    pub label: Option<String>,
}

/// One address as returned by `linode.ip.list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinodeIp {
    #[serde(rename = "LINODEID")]
    pub linode_id: u64,
    #[serde(rename = "IPADDRESSID", default)]
    pub id: u64,
    #[serde(rename = "IPADDRESS", default)]
    pub address: String,
    #[serde(rename = "ISPUBLIC", default)]
    pub public_flag: i64,
    #[serde(rename = "RDNS_NAME", default)]
    pub rdns_name: String,
}

impl LinodeIp {
    /// The exact `ISPUBLIC` value the API uses for public addresses.
    pub const PUBLIC: i64 = 1;

    pub fn is_public(&self) -> bool {
        self.public_flag == Self::PUBLIC
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

/// Integral value of a JSON number or numeric string.
fn integral(value: &serde_json::Value) -> Option<f64> {
    let number = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (number.is_finite() && number.fract() == 0.0).then_some(number)
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value.as_u64() {
        Some(n) => n,
        None => integral(&value)
            .filter(|n| *n >= 0.0 && *n <= u64::MAX as f64)
            .map_or(0, |n| n as u64),
    })
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_i64().or_else(|| {
        integral(&value)
            .filter(|n| *n >= i64::MIN as f64 && *n <= i64::MAX as f64)
            .map(|n| n as i64)
    }))
}

/// Display groups are strings; numbers keep their textual form and
/// anything else reads as no group.
fn lenient_group<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

//! Typed Rust client for the Linode action-style API.
//!
//! Covers the subset needed to build an inventory:
//! linodes (`linode.list`) and their addresses (`linode.ip.list`).

mod types;

pub use types::*;

use serde::de::DeserializeOwned;

const BASE_URL: &str = "https://api.linode.com";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("linode api request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("linode api {action} returned {status}: {body}")]
    Api {
        action: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("linode api {action} failed with error {code}: {message}")]
    Action {
        action: &'static str,
        code: i64,
        message: String,
    },

    #[error("linode api {action} returned malformed DATA: {source}")]
    Decode {
        action: &'static str,
        source: serde_json::Error,
    },

    #[error("linode api {action} returned no DATA")]
    MissingData { action: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Client for the Linode API.
///
/// Every call is a GET against the API root carrying `api_key` and
/// `api_action` in the query string; the payload comes back inside a
/// `{ ACTION, DATA, ERRORARRAY }` envelope.
#[derive(Clone)]
pub struct LinodeClient {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl LinodeClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, BASE_URL)
    }

    /// Point the client at a different API root (mock servers, proxies).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self) -> String {
        format!("{}/", self.base_url.trim_end_matches('/'))
    }

    async fn check(resp: reqwest::Response, action: &'static str) -> Result<reqwest::Response> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api { action, status, body });
        }
        Ok(resp)
    }

    /// Invoke `action` with extra query `args` and decode its `DATA` payload.
    ///
    /// A non-empty `ERRORARRAY` is reported as [`Error::Action`] using the
    /// first entry, even when `DATA` is also present.
    pub async fn call<T: DeserializeOwned>(
        &self,
        action: &'static str,
        args: &[(&str, &str)],
    ) -> Result<T> {
        let resp = self
            .http
            .get(self.url())
            .query(&[("api_key", self.api_key.as_str()), ("api_action", action)])
            .query(args)
            .send()
            .await?;

        let envelope: Envelope = Self::check(resp, action).await?.json().await?;

        if let Some(err) = envelope.errors.into_iter().next() {
            return Err(Error::Action {
                action,
                code: err.code,
                message: err.message,
            });
        }

        let data = envelope.data.ok_or(Error::MissingData { action })?;
        tracing::debug!(action, "linode api call succeeded");
        serde_json::from_value(data).map_err(|source| Error::Decode { action, source })
    }

    // ── Linodes ──────────────────────────────────────────────────────

    pub async fn list_linodes(&self) -> Result<Vec<Linode>> {
        self.call("linode.list", &[]).await
    }

    pub async fn list_ips(&self) -> Result<Vec<LinodeIp>> {
        self.call("linode.ip.list", &[]).await
    }
}

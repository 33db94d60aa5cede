//! HTTP client for a node's RPC endpoints.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use tessera_types::{Commit, Tx, Validator};

use crate::config::RpcConfig;
use crate::error::RpcError;
use crate::responses::{AbciQueryResult, BroadcastTxResult, RpcResponse, ValidatorsResult};

/// Longest slice of an error body kept in [`RpcError::Status`].
const MAX_ERROR_BODY: usize = 256;

/// Client for one trusted node at `http://{host}:{port}`.
///
/// Each call builds its own short-lived HTTP client with the configured
/// timeout and no idle connection pool, so the client holds nothing but
/// immutable configuration and is safe to share between tasks.
#[derive(Clone, Debug)]
pub struct RpcClient {
    config: RpcConfig,
    base_url: String,
}

impl RpcClient {
    pub fn new(config: RpcConfig) -> Self {
        let base_url = config.base_url();
        Self { config, base_url }
    }

    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the commit at `height`, or the latest commit when `None`.
    ///
    /// `GET /commit?height={height}`
    pub async fn commit(&self, height: Option<u64>) -> Result<Commit, RpcError> {
        let path = match height {
            Some(height) => format!("/commit?height={height}"),
            None => "/commit".to_string(),
        };
        self.request(&path).await
    }

    /// Broadcast a hex-encoded transaction and return the bytes of its hash.
    ///
    /// `GET /broadcast_tx_sync?tx="{hex}"`
    ///
    /// Returns as soon as the node has run its mempool check. A non-zero
    /// check code is logged but still returns the hash.
    pub async fn broadcast_tx_sync(&self, tx_hex: &str) -> Result<Vec<u8>, RpcError> {
        let result: BroadcastTxResult = self
            .request(&format!("/broadcast_tx_sync?tx={}", quoted(tx_hex)))
            .await?;
        if result.code != 0 {
            warn!(
                code = result.code,
                log = %result.log,
                hash = %result.hash,
                "node flagged broadcast transaction"
            );
        }
        Ok(result.hash.into_bytes())
    }

    /// Fetch a transaction and its inclusion proof by hash.
    ///
    /// `GET /tx?hash=0x{hash}&prove=true`
    ///
    /// One leading `0x` on `hash` is dropped before the prefix is added.
    pub async fn tx(&self, hash: &[u8]) -> Result<Tx, RpcError> {
        let hash = String::from_utf8_lossy(hash);
        let hash = hash.strip_prefix("0x").unwrap_or(&*hash);
        let hash = urlencoding::encode(hash);
        self.request(&format!("/tx?hash=0x{hash}&prove=true")).await
    }

    /// Fetch the validator set at `height`, or at the latest height when `None`.
    ///
    /// `GET /validators?height={height}`
    pub async fn validators(&self, height: Option<u64>) -> Result<Vec<Validator>, RpcError> {
        let path = match height {
            Some(height) => format!("/validators?height={height}"),
            None => "/validators".to_string(),
        };
        let result: ValidatorsResult = self.request(&path).await?;
        Ok(result.validators)
    }

    /// Look up `key` in the node's application state and return its value.
    ///
    /// `GET /abci_query?data="{key}"&prove=true`
    ///
    /// The quoted key is percent-encoded, so `&`, `#` and `+` reach the
    /// node as part of the key.
    pub async fn abci_query(&self, key: &str) -> Result<String, RpcError> {
        let result: AbciQueryResult = self
            .request(&format!("/abci_query?data={}&prove=true", quoted(key)))
            .await?;
        Ok(result.response.value)
    }

    /// Call `path` and decode the `result` of its envelope as `T`.
    ///
    /// The error field is checked before `result` is decoded, so a remote
    /// error is reported even when `result` is partial.
    pub async fn request<T: DeserializeOwned>(&self, path: &str) -> Result<T, RpcError> {
        let response: RpcResponse = self.call(path).await?;
        response.decode(&self.url(path))
    }

    /// Issue `GET {base_url}{path}` and decode the whole body as JSON.
    pub async fn call<R: DeserializeOwned>(&self, path: &str) -> Result<R, RpcError> {
        let url = self.url(path);
        let http = reqwest::Client::builder()
            .timeout(self.config.timeout())
            .pool_max_idle_per_host(0)
            .build()
            .map_err(RpcError::Client)?;

        debug!(%url, "rpc request");
        let response = http
            .get(&url)
            .send()
            .await
            .map_err(|e| RpcError::from_send(&url, e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|source| RpcError::Body {
            url: url.clone(),
            source,
        })?;

        if !status.is_success() {
            // Nodes answer some failures with a 500 and an error envelope.
            let remote = serde_json::from_slice::<RpcResponse<serde_json::Value>>(&body)
                .ok()
                .and_then(|r| r.remote_error());
            if let Some(err) = remote {
                return Err(RpcError::Remote(err));
            }
            return Err(RpcError::Status {
                url,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_slice(&body).map_err(|source| RpcError::Decode { url, source })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// `"{value}"`, percent-encoded for a query string.
fn quoted(value: &str) -> String {
    urlencoding::encode(&format!("\"{value}\"")).into_owned()
}

fn truncate_body(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    match text.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.into_owned(),
    }
}

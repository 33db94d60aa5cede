//! Transactions as served by the node's `/tx` endpoint.

use serde::{Deserialize, Serialize};

/// A previously broadcast transaction together with its inclusion proof.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tx {
    #[serde(default)]
    pub hash: String,
    #[serde(default, with = "crate::encoding")]
    pub height: u64,
    #[serde(default)]
    pub index: u32,
    /// Application result (code, data, log, events); opaque to this client.
    #[serde(default)]
    pub tx_result: serde_json::Value,
    /// Base64-encoded transaction payload.
    #[serde(default)]
    pub tx: String,
    /// Merkle inclusion proof; present when requested with `prove=true`.
    #[serde(default)]
    pub proof: Option<serde_json::Value>,
}

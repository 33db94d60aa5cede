//! Commits as served by the node's `/commit` endpoint, and the block summary
//! the chain keeps after a sync.

use serde::{Deserialize, Serialize};

/// Identifies a block by its hash and part-set header.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockId {
    #[serde(default)]
    pub hash: String,
    /// Part-set header; opaque to this client.
    #[serde(default)]
    pub parts: serde_json::Value,
}

/// Block header fields this client reads. Anything else the node sends is
/// ignored on decode.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    #[serde(default)]
    pub chain_id: String,
    #[serde(with = "crate::encoding")]
    pub height: u64,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub last_block_id: BlockId,
    #[serde(default)]
    pub data_hash: String,
    #[serde(default)]
    pub validators_hash: String,
    #[serde(default)]
    pub app_hash: String,
    #[serde(default)]
    pub proposer_address: String,
}

/// The signatures that finalized a block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSignatures {
    #[serde(default)]
    pub block_id: BlockId,
    /// Per-validator signatures. Older nodes call these `precommits`.
    #[serde(default, alias = "precommits")]
    pub signatures: Vec<serde_json::Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedHeader {
    pub header: Header,
    #[serde(default)]
    pub commit: CommitSignatures,
}

/// A finalized block record at a given height.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub signed_header: SignedHeader,
    /// Whether the commit is canonical (`false` for the node's latest,
    /// not-yet-superseded commit).
    #[serde(default)]
    pub canonical: bool,
}

impl Commit {
    pub fn height(&self) -> u64 {
        self.signed_header.header.height
    }

    pub fn chain_id(&self) -> &str {
        &self.signed_header.header.chain_id
    }

    /// Summarize this commit as the block it finalized.
    pub fn block(&self) -> Block {
        let header = &self.signed_header.header;
        Block {
            chain_id: header.chain_id.clone(),
            height: header.height,
            hash: self.signed_header.commit.block_id.hash.clone(),
            time: header.time.clone(),
            app_hash: header.app_hash.clone(),
        }
    }
}

/// The latest block a trusted node has seen.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub chain_id: String,
    pub height: u64,
    pub hash: String,
    pub time: String,
    pub app_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMMIT_JSON: &str = r#"{
        "signed_header": {
            "header": {
                "chain_id": "tessera-test",
                "height": "100",
                "time": "2024-01-01T00:00:00Z",
                "app_hash": "AA11",
                "num_txs": "3"
            },
            "commit": {
                "block_id": { "hash": "BEEF", "parts": { "total": "1", "hash": "CAFE" } },
                "precommits": [null, {"type": 2}]
            }
        },
        "canonical": true
    }"#;

    #[test]
    fn decodes_tendermint_commit() {
        let commit: Commit = serde_json::from_str(COMMIT_JSON).unwrap();
        assert_eq!(commit.height(), 100);
        assert_eq!(commit.chain_id(), "tessera-test");
        assert!(commit.canonical);
        assert_eq!(commit.signed_header.commit.signatures.len(), 2);
    }

    #[test]
    fn block_summary_uses_commit_block_id() {
        let commit: Commit = serde_json::from_str(COMMIT_JSON).unwrap();
        let block = commit.block();
        assert_eq!(block.height, 100);
        assert_eq!(block.hash, "BEEF");
        assert_eq!(block.app_hash, "AA11");
        assert_eq!(block.chain_id, "tessera-test");
    }

    #[test]
    fn missing_height_is_rejected() {
        let json = r#"{"signed_header": {"header": {"chain_id": "x"}}}"#;
        assert!(serde_json::from_str::<Commit>(json).is_err());
    }
}

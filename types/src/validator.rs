//! Validator descriptors as served by the node's `/validators` endpoint.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubKey {
    #[serde(rename = "type")]
    pub key_type: String,
    pub value: String,
}

/// A validator active at some height.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    pub address: String,
    #[serde(default)]
    pub pub_key: PubKey,
    #[serde(with = "crate::encoding")]
    pub voting_power: u64,
    #[serde(default, with = "crate::encoding")]
    pub proposer_priority: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_validator() {
        let json = r#"{
            "address": "A1B2",
            "pub_key": {"type": "tendermint/PubKeyEd25519", "value": "base64key"},
            "voting_power": "10",
            "proposer_priority": "-5"
        }"#;
        let v: Validator = serde_json::from_str(json).unwrap();
        assert_eq!(v.address, "A1B2");
        assert_eq!(v.pub_key.key_type, "tendermint/PubKeyEd25519");
        assert_eq!(v.voting_power, 10);
        assert_eq!(v.proposer_priority, -5);
    }
}

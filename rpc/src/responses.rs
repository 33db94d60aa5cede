//! Response envelopes and payload shapes for each endpoint.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use tessera_types::Validator;

use crate::error::{RemoteError, RpcError};

// ── Envelope ─────────────────────────────────────────────────────────────

/// The `{result, error}` wrapper every endpoint answers with.
///
/// Left as raw JSON by default so the error field can be checked before
/// `result` is decoded; see [`RpcResponse::decode`].
#[derive(Debug, Deserialize)]
pub struct RpcResponse<T = Value> {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl<T> RpcResponse<T> {
    /// The node's error, if it reported one.
    ///
    /// Some node versions send `"error": ""` on success, so null and empty
    /// strings both count as no error. A bare string becomes the message;
    /// an object is read as `{code, message, data}`.
    pub fn remote_error(&self) -> Option<RemoteError> {
        match self.error.as_ref()? {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(RemoteError {
                message: s.clone(),
                ..Default::default()
            }),
            other => {
                let parsed = serde_json::from_value::<RemoteError>(other.clone())
                    .ok()
                    .filter(|e| !e.message.is_empty());
                Some(parsed.unwrap_or_else(|| RemoteError {
                    message: other.to_string(),
                    ..Default::default()
                }))
            }
        }
    }

    /// Unwrap `result`, checking the error field first.
    pub fn into_result(self, url: &str) -> Result<T, RpcError> {
        if let Some(err) = self.remote_error() {
            return Err(RpcError::Remote(err));
        }
        self.result.ok_or_else(|| RpcError::MissingResult {
            url: url.to_string(),
        })
    }
}

impl RpcResponse<Value> {
    /// Check the error field, then decode `result` as `T`.
    pub fn decode<T: DeserializeOwned>(self, url: &str) -> Result<T, RpcError> {
        let result = self.into_result(url)?;
        serde_json::from_value(result).map_err(|source| RpcError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

// ── Broadcast ────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct BroadcastTxResult {
    #[serde(default)]
    pub code: u32,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub log: String,
    #[serde(default)]
    pub hash: String,
}

// ── Validators ───────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ValidatorsResult {
    #[serde(default, with = "tessera_types::encoding")]
    pub block_height: u64,
    #[serde(default, alias = "Validators")]
    pub validators: Vec<Validator>,
}

// ── ABCI query ───────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct AbciQueryResult {
    pub response: AbciQueryResponse,
}

#[derive(Debug, Default, Deserialize)]
pub struct AbciQueryResponse {
    #[serde(default)]
    pub code: u32,
    #[serde(default)]
    pub log: String,
    #[serde(default)]
    pub info: String,
    #[serde(default, with = "tessera_types::encoding")]
    pub index: i64,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
    /// Present in the response shape; not returned to callers.
    #[serde(default)]
    pub proof: Option<Value>,
    #[serde(default, with = "tessera_types::encoding")]
    pub height: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_types::Commit;

    #[test]
    fn null_error_is_success() {
        let r: RpcResponse<BroadcastTxResult> =
            serde_json::from_str(r#"{"result":{"hash":"AB","code":0},"error":null}"#).unwrap();
        assert!(r.remote_error().is_none());
        assert_eq!(r.into_result("u").unwrap().hash, "AB");
    }

    #[test]
    fn empty_string_error_is_success() {
        let r: RpcResponse<BroadcastTxResult> =
            serde_json::from_str(r#"{"result":{"hash":"AB"},"error":""}"#).unwrap();
        assert!(r.into_result("u").is_ok());
    }

    #[test]
    fn object_error_is_remote() {
        let json = r#"{
            "jsonrpc": "2.0",
            "id": -1,
            "error": {"code": -32603, "message": "Internal error", "data": "height 9999 must be less than or equal to the current blockchain height 12"}
        }"#;
        let r: RpcResponse<Commit> = serde_json::from_str(json).unwrap();
        match r.into_result("u") {
            Err(RpcError::Remote(e)) => {
                assert_eq!(e.code, -32603);
                assert_eq!(e.message, "Internal error");
            }
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[test]
    fn string_error_is_remote() {
        let r: RpcResponse<Commit> =
            serde_json::from_str(r#"{"result":null,"error":"tx not found"}"#).unwrap();
        let err = r.remote_error().unwrap();
        assert_eq!(err.message, "tx not found");
    }

    #[test]
    fn unrecognized_error_object_keeps_raw_text() {
        let r: RpcResponse<Commit> =
            serde_json::from_str(r#"{"error":{"reason":"boom"}}"#).unwrap();
        let err = r.remote_error().unwrap();
        assert!(err.message.contains("boom"));
    }

    #[test]
    fn error_wins_over_partial_result() {
        let r: RpcResponse = serde_json::from_str(
            r#"{"result":{},"error":{"code":-32603,"message":"Internal error"}}"#,
        )
        .unwrap();
        match r.decode::<Commit>("u") {
            Err(RpcError::Remote(e)) => assert_eq!(e.code, -32603),
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_result_without_error_is_decode_error() {
        let r: RpcResponse = serde_json::from_str(r#"{"result":{},"error":null}"#).unwrap();
        assert!(matches!(
            r.decode::<Commit>("u"),
            Err(RpcError::Decode { .. })
        ));
    }

    #[test]
    fn missing_result_without_error() {
        let r: RpcResponse<Commit> = serde_json::from_str(r#"{"jsonrpc":"2.0"}"#).unwrap();
        assert!(matches!(
            r.into_result("http://node/commit"),
            Err(RpcError::MissingResult { .. })
        ));
    }

    #[test]
    fn validators_accepts_either_key_case() {
        let lower: ValidatorsResult = serde_json::from_str(
            r#"{"block_height":"5","validators":[{"address":"A","voting_power":"1"}]}"#,
        )
        .unwrap();
        let upper: ValidatorsResult = serde_json::from_str(
            r#"{"block_height":"5","Validators":[{"address":"A","voting_power":"1"}]}"#,
        )
        .unwrap();
        assert_eq!(lower.block_height, 5);
        assert_eq!(lower.validators, upper.validators);
    }
}

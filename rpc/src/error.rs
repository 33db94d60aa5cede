//! RPC error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error object reported by the node inside a JSON envelope.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)?;
        match &self.data {
            None | Some(serde_json::Value::Null) => Ok(()),
            Some(serde_json::Value::String(s)) => write!(f, ": {s}"),
            Some(other) => write!(f, ": {other}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} timed out")]
    Timeout {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("connection to {url} failed")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("node returned HTTP {status} for {url}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to read response body from {url}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid JSON response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("node reported an error: {0}")]
    Remote(RemoteError),

    #[error("response from {url} carried no result")]
    MissingResult { url: String },
}

impl RpcError {
    /// Classify a failed `send()`.
    pub(crate) fn from_send(url: &str, source: reqwest::Error) -> Self {
        let url = url.to_string();
        if source.is_timeout() {
            RpcError::Timeout { url, source }
        } else if source.is_connect() {
            RpcError::Connect { url, source }
        } else {
            RpcError::Request { url, source }
        }
    }

    /// Whether the failure happened below the JSON envelope: the node was
    /// unreachable, answered with a non-success status, or sent a body that
    /// isn't valid JSON.
    pub fn is_transport(&self) -> bool {
        !matches!(self, RpcError::Remote(_) | RpcError::MissingResult { .. })
    }

    /// Whether the node answered but reported an application-level error.
    pub fn is_remote(&self) -> bool {
        matches!(self, RpcError::Remote(_))
    }
}

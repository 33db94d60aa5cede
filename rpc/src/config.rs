//! Address and timeout of the trusted node.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;
use std::time::Duration;

/// Where the trusted node listens, and how long to wait for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-request timeout in milliseconds, covering connect, send and
    /// body read. Zero is rejected.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: NonZeroU64,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    26657
}

fn default_timeout_ms() -> NonZeroU64 {
    NonZeroU64::MIN.saturating_add(9_999)
}

// ── Impl ───────────────────────────────────────────────────────────────

impl RpcConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            timeout_ms: default_timeout_ms(),
        }
    }

    /// Set the request timeout. Anything under a millisecond, zero
    /// included, becomes one millisecond.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self.timeout_ms = NonZeroU64::new(millis).unwrap_or(NonZeroU64::MIN);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.get())
    }

    /// `http://{host}:{port}`, the prefix of every request.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_node() {
        let config = RpcConfig::default();
        assert_eq!(config.base_url(), "http://127.0.0.1:26657");
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: RpcConfig = serde_json::from_str(r#"{"host": "node.example"}"#).unwrap();
        assert_eq!(config.host, "node.example");
        assert_eq!(config.port, 26657);
        assert_eq!(config.timeout_ms.get(), 10_000);
    }

    #[test]
    fn with_timeout_overrides_default() {
        let config = RpcConfig::new("10.0.0.1", 1234).with_timeout(Duration::from_secs(3));
        assert_eq!(config.base_url(), "http://10.0.0.1:1234");
        assert_eq!(config.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn sub_second_timeout_is_kept() {
        let config = RpcConfig::default().with_timeout(Duration::from_millis(500));
        assert_eq!(config.timeout_ms.get(), 500);
        assert_eq!(config.timeout(), Duration::from_millis(500));
    }

    #[test]
    fn tiny_timeout_rounds_up_to_one_millisecond() {
        let config = RpcConfig::default().with_timeout(Duration::from_micros(10));
        assert_eq!(config.timeout(), Duration::from_millis(1));
        let config = RpcConfig::default().with_timeout(Duration::ZERO);
        assert_eq!(config.timeout(), Duration::from_millis(1));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let result = serde_json::from_str::<RpcConfig>(r#"{"timeout_ms": 0}"#);
        assert!(result.is_err());
    }
}

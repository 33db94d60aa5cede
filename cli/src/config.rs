//! Client configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use tessera_claim::{signing_key_from_seed, SigningKey};
use tessera_rpc::RpcConfig;
use tessera_utils::LogFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid signing seed: {0}")]
    InvalidSeed(String),
}

/// Configuration for the Tessera client.
///
/// Can be loaded from a TOML file via [`ClientConfig::from_toml_file`] or
/// built programmatically. CLI flags and env vars override file values.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Identifier of the chain this client represents.
    #[serde(default = "default_chain_id")]
    pub chain_id: String,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Hex-encoded 32-byte Ed25519 seed used to sign registration claims.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_seed: Option<String>,

    /// The trusted node.
    #[serde(default)]
    pub node: RpcConfig,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_chain_id() -> String {
    "tessera".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The claim signing key, if a seed is configured.
    pub fn signing_key(&self) -> Result<Option<SigningKey>, ConfigError> {
        let Some(seed_hex) = &self.signing_seed else {
            return Ok(None);
        };
        let bytes = hex::decode(seed_hex.trim())
            .map_err(|e| ConfigError::InvalidSeed(e.to_string()))?;
        let seed: [u8; 32] = bytes.try_into().map_err(|b: Vec<u8>| {
            ConfigError::InvalidSeed(format!("expected 32 bytes, got {}", b.len()))
        })?;
        Ok(Some(signing_key_from_seed(&seed)))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            chain_id: default_chain_id(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            signing_seed: None,
            node: RpcConfig::default(),
        }
    }
}

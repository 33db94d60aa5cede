//! Tessera client: command-line entry point.

mod config;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::num::NonZeroU64;
use std::path::PathBuf;
use std::sync::Arc;

use tessera_chain::Chain;
use tessera_rpc::RemoteNode;
use tessera_types::EntityId;
use tessera_utils::LogFormat;

use crate::config::ClientConfig;

#[derive(Parser)]
#[command(name = "tessera", about = "Trusted-node client for a Tessera chain")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "TESSERA_CONFIG")]
    config: Option<PathBuf>,

    /// Host of the trusted node.
    #[arg(long, env = "TESSERA_NODE_HOST")]
    host: Option<String>,

    /// RPC port of the trusted node.
    #[arg(long, env = "TESSERA_NODE_PORT")]
    port: Option<u16>,

    /// Per-request timeout in milliseconds.
    #[arg(long, env = "TESSERA_TIMEOUT_MS")]
    timeout_ms: Option<NonZeroU64>,

    /// Identifier of the chain.
    #[arg(long, env = "TESSERA_CHAIN_ID")]
    chain_id: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "TESSERA_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "TESSERA_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Sync with the trusted node and print the latest block.
    Sync,

    /// Print the commit at HEIGHT (latest when omitted).
    Commit { height: Option<u64> },

    /// Print a transaction and its inclusion proof.
    Tx { hash: String },

    /// Print the validator set at HEIGHT (latest when omitted).
    Validators { height: Option<u64> },

    /// Look up KEY in the node's application state.
    Query { key: String },

    /// Register an entity by submitting a self-issued claim.
    Register { entity_id: String },

    /// Print the effective configuration as TOML.
    ShowConfig,
}

/// File config (or defaults) with CLI flags and env vars layered on top.
fn resolve_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::from_toml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ClientConfig::default(),
    };

    if let Some(host) = &cli.host {
        config.node.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.node.port = port;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.node.timeout_ms = timeout_ms;
    }
    if let Some(chain_id) = &cli.chain_id {
        config.chain_id = chain_id.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    tessera_utils::init_logging(config.log_format, &config.log_level);

    let node = Arc::new(RemoteNode::new(config.node.clone()));
    let mut builder = Chain::builder()
        .id(config.chain_id.clone())
        .trusted_node(node.clone());
    if let Some(key) = config.signing_key()? {
        builder = builder.signer(key);
    }
    let chain = builder.build();

    tracing::debug!(
        chain_id = chain.id(),
        node = node.client().base_url(),
        "client ready"
    );

    match cli.command {
        Command::Sync => {
            chain.sync().await?;
            print_json(&chain.latest_block()?)?;
        }
        Command::Commit { height } => {
            print_json(&node.client().commit(height).await?)?;
        }
        Command::Tx { hash } => {
            print_json(&node.client().tx(hash.as_bytes()).await?)?;
        }
        Command::Validators { height } => {
            print_json(&node.client().validators(height).await?)?;
        }
        Command::Query { key } => {
            println!("{}", node.client().abci_query(&key).await?);
        }
        Command::Register { entity_id } => {
            let claim = chain.register(&EntityId::new(entity_id)).await?;
            print_json(&serde_json::json!({
                "claim_id": claim.id_hex(),
                "issuer": claim.issuer(),
                "subject": claim.subject(),
                "data": claim.data(),
                "signed": claim.is_signed(),
            }))?;
        }
        Command::ShowConfig => {
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "tessera",
            "--host",
            "10.0.0.5",
            "--port",
            "1234",
            "--chain-id",
            "tessera-dev",
            "--timeout-ms",
            "750",
            "--log-format",
            "json",
            "commit",
            "100",
        ]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.node.host, "10.0.0.5");
        assert_eq!(config.node.port, 1234);
        assert_eq!(config.chain_id, "tessera-dev");
        assert_eq!(config.node.timeout_ms.get(), 750);
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(matches!(cli.command, Command::Commit { height: Some(100) }));
    }

    #[test]
    fn flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tessera.toml");
        std::fs::write(&path, "chain_id = \"from-file\"\n[node]\nport = 9999\n").unwrap();

        let cli = Cli::parse_from([
            "tessera",
            "--config",
            path.to_str().unwrap(),
            "--port",
            "1111",
            "sync",
        ]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.chain_id, "from-file");
        assert_eq!(config.node.port, 1111);
    }

    #[test]
    fn zero_timeout_flag_is_rejected() {
        let result = Cli::try_parse_from(["tessera", "--timeout-ms", "0", "sync"]);
        assert!(result.is_err());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::parse_from(["tessera", "--config", "/nonexistent/tessera.toml", "sync"]);
        assert!(resolve_config(&cli).is_err());
    }
}

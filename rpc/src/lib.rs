//! JSON-over-HTTP client for the trusted node.
//!
//! Turns the node's query and broadcast endpoints into typed results:
//! - `/commit`            → [`Commit`](tessera_types::Commit)
//! - `/broadcast_tx_sync` → transaction hash bytes
//! - `/tx`                → [`Tx`](tessera_types::Tx) with inclusion proof
//! - `/validators`        → [`Validator`](tessera_types::Validator) set
//! - `/abci_query`        → stored value
//!
//! Every response is a `{result, error}` envelope; a populated `error` is
//! reported as [`RpcError::Remote`] rather than decoded as an empty result.
//! [`RemoteNode`] wraps the client as a [`TrustedNode`](tessera_types::TrustedNode).

pub mod client;
pub mod config;
pub mod error;
pub mod node;
pub mod responses;

pub use client::RpcClient;
pub use config::RpcConfig;
pub use error::{RemoteError, RpcError};
pub use node::RemoteNode;
pub use responses::RpcResponse;

//! A local handle on a ledger maintained by a network of nodes.
//!
//! A [`Chain`] talks to the network through exactly one trusted node
//! (anything implementing [`TrustedNode`](tessera_types::TrustedNode)).
//! It can sync with the network head, report the latest block, and turn
//! entities and claims into transactions.
//!
//! Submission is "submit, not commit": a successful [`Chain::submit`]
//! means the trusted node accepted the transaction into its pending pool.
//! Nothing here waits for the transaction to land in a block.

pub mod chain;
pub mod error;

pub use chain::{Chain, ChainBuilder, ChainOption};
pub use error::ChainError;

//! The capability a chain needs from the node it trusts.

use std::error::Error;
use std::future::Future;

use crate::{Block, TxHash};

/// A node the client relies on for all network truth.
///
/// The remote RPC node is one implementation; tests use an in-memory one.
/// No quorum or multi-node verification happens behind this trait.
pub trait TrustedNode: Send + Sync {
    type Error: Error + Send + Sync + 'static;

    /// Reconcile the node's local view with the network head.
    fn sync(&self) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// The latest block seen by the last successful sync, if any.
    fn latest_block(&self) -> Option<Block>;

    /// Hand a serialized transaction to the network.
    ///
    /// Returns once the node has accepted the transaction into its pending
    /// pool. Inclusion in a block is not awaited.
    fn submit(&self, tx: &[u8]) -> impl Future<Output = Result<TxHash, Self::Error>> + Send;
}

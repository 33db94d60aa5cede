//! The RPC client as a [`TrustedNode`].

use std::sync::{PoisonError, RwLock};
use tracing::info;

use tessera_types::{Block, TrustedNode, TxHash};

use crate::client::RpcClient;
use crate::config::RpcConfig;
use crate::error::RpcError;

/// A remote node reached over RPC.
///
/// `sync` fetches the latest commit and remembers the block it finalized;
/// `latest_block` answers from that memory and is `None` until the first
/// successful sync.
#[derive(Debug)]
pub struct RemoteNode {
    client: RpcClient,
    latest: RwLock<Option<Block>>,
}

impl RemoteNode {
    pub fn new(config: RpcConfig) -> Self {
        Self::with_client(RpcClient::new(config))
    }

    pub fn with_client(client: RpcClient) -> Self {
        Self {
            client,
            latest: RwLock::new(None),
        }
    }

    /// The underlying client, for queries beyond the node capability.
    pub fn client(&self) -> &RpcClient {
        &self.client
    }
}

impl TrustedNode for RemoteNode {
    type Error = RpcError;

    async fn sync(&self) -> Result<(), RpcError> {
        let commit = self.client.commit(None).await?;
        let block = commit.block();
        info!(
            chain_id = %block.chain_id,
            height = block.height,
            hash = %block.hash,
            "synced with trusted node"
        );
        *self.latest.write().unwrap_or_else(PoisonError::into_inner) = Some(block);
        Ok(())
    }

    fn latest_block(&self) -> Option<Block> {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn submit(&self, tx: &[u8]) -> Result<TxHash, RpcError> {
        let hash = self.client.broadcast_tx_sync(&hex::encode(tx)).await?;
        Ok(TxHash::new(hash))
    }
}

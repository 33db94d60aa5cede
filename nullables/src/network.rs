//! Nullable node: record transactions without sending them.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use thiserror::Error;

use tessera_types::{Block, TrustedNode, TxHash};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NullNodeError {
    #[error("sync failed: {0}")]
    Sync(String),

    #[error("submit failed: {0}")]
    Submit(String),
}

/// A trusted node that never touches the network.
///
/// `sync` publishes the staged block (if any) as the latest block.
/// `submit` records the payload and answers with a deterministic hash
/// (`NULLTX0`, `NULLTX1`, …) unless a fixed hash was configured.
pub struct NullNode {
    staged: Mutex<Option<Block>>,
    latest: Mutex<Option<Block>>,
    submitted: Mutex<Vec<Vec<u8>>>,
    sync_calls: AtomicUsize,
    sync_error: Mutex<Option<String>>,
    submit_error: Mutex<Option<String>>,
    fixed_hash: Mutex<Option<TxHash>>,
}

impl NullNode {
    pub fn new() -> Self {
        Self {
            staged: Mutex::new(None),
            latest: Mutex::new(None),
            submitted: Mutex::new(Vec::new()),
            sync_calls: AtomicUsize::new(0),
            sync_error: Mutex::new(None),
            submit_error: Mutex::new(None),
            fixed_hash: Mutex::new(None),
        }
    }

    /// Stage the block the next successful sync will publish.
    pub fn with_block(self, block: Block) -> Self {
        self.stage_block(block);
        self
    }

    /// Answer every submission with `hash`.
    pub fn with_hash(self, hash: impl Into<Vec<u8>>) -> Self {
        *self.fixed_hash.lock().unwrap() = Some(TxHash::new(hash));
        self
    }

    /// Make every sync fail with `reason`.
    pub fn failing_sync(self, reason: impl Into<String>) -> Self {
        *self.sync_error.lock().unwrap() = Some(reason.into());
        self
    }

    /// Make every submission fail with `reason`.
    pub fn failing_submit(self, reason: impl Into<String>) -> Self {
        *self.submit_error.lock().unwrap() = Some(reason.into());
        self
    }

    pub fn stage_block(&self, block: Block) {
        *self.staged.lock().unwrap() = Some(block);
    }

    /// All payloads "submitted" so far (for assertions).
    pub fn submitted(&self) -> Vec<Vec<u8>> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn sync_count(&self) -> usize {
        self.sync_calls.load(Ordering::SeqCst)
    }

    /// Clear recorded submissions, the latest block and the sync counter.
    pub fn reset(&self) {
        self.submitted.lock().unwrap().clear();
        *self.latest.lock().unwrap() = None;
        self.sync_calls.store(0, Ordering::SeqCst);
    }
}

impl Default for NullNode {
    fn default() -> Self {
        Self::new()
    }
}

impl TrustedNode for NullNode {
    type Error = NullNodeError;

    async fn sync(&self) -> Result<(), NullNodeError> {
        self.sync_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = self.sync_error.lock().unwrap().clone() {
            return Err(NullNodeError::Sync(reason));
        }
        let staged = self.staged.lock().unwrap().clone();
        if staged.is_some() {
            *self.latest.lock().unwrap() = staged;
        }
        Ok(())
    }

    fn latest_block(&self) -> Option<Block> {
        self.latest.lock().unwrap().clone()
    }

    async fn submit(&self, tx: &[u8]) -> Result<TxHash, NullNodeError> {
        if let Some(reason) = self.submit_error.lock().unwrap().clone() {
            return Err(NullNodeError::Submit(reason));
        }
        let mut submitted = self.submitted.lock().unwrap();
        let index = submitted.len();
        submitted.push(tx.to_vec());
        let hash = self
            .fixed_hash
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| TxHash::new(format!("NULLTX{index}")));
        Ok(hash)
    }
}

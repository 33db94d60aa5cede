use thiserror::Error;

use tessera_claim::ClaimError;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("chain {chain_id:?} has no trusted node")]
    NoTrustedNode { chain_id: String },

    #[error("claim could not be built or serialized")]
    Claim(#[from] ClaimError),

    #[error("trusted node failed")]
    Node(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ChainError {
    pub(crate) fn node<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ChainError::Node(Box::new(err))
    }
}

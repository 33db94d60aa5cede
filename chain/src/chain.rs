//! The chain facade.

use ed25519_dalek::SigningKey;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use tessera_claim::{Claim, ClaimPayload};
use tessera_types::{Block, Entity, TrustedNode, TxHash};

use crate::error::ChainError;

/// One configuration step applied to a chain under construction.
pub enum ChainOption<N> {
    /// Set the chain identifier.
    Id(String),
    /// Set the node the chain trusts for all network interaction.
    TrustedNode(Arc<N>),
    /// Sign claims built by [`Chain::register`] with this key.
    Signer(SigningKey),
}

impl<N> ChainOption<N> {
    fn apply(self, chain: &mut Chain<N>) {
        match self {
            ChainOption::Id(id) => chain.id = id,
            ChainOption::TrustedNode(node) => chain.trusted_node = Some(node),
            ChainOption::Signer(key) => chain.signer = Some(key),
        }
    }
}

/// A local handle on a ledger, backed by a single trusted node.
///
/// The identifier and trusted node are fixed at construction. A chain
/// built without a trusted node can still report its id; every network
/// operation on it fails with [`ChainError::NoTrustedNode`].
pub struct Chain<N> {
    id: String,
    trusted_node: Option<Arc<N>>,
    signer: Option<SigningKey>,
}

impl<N> Chain<N> {
    /// Apply `options` in order to an empty chain. Later options win.
    ///
    /// Never fails: a missing trusted node is only reported on first use.
    pub fn new(options: impl IntoIterator<Item = ChainOption<N>>) -> Self {
        let mut chain = Chain {
            id: String::new(),
            trusted_node: None,
            signer: None,
        };
        for option in options {
            option.apply(&mut chain);
        }
        chain
    }

    pub fn builder() -> ChainBuilder<N> {
        ChainBuilder::default()
    }

    /// The configured identifier, verbatim.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The trusted node, or [`ChainError::NoTrustedNode`].
    pub fn trusted_node(&self) -> Result<&Arc<N>, ChainError> {
        self.trusted_node
            .as_ref()
            .ok_or_else(|| ChainError::NoTrustedNode {
                chain_id: self.id.clone(),
            })
    }
}

impl<N: TrustedNode> Chain<N> {
    /// Have the trusted node reconcile its view with the network head.
    pub async fn sync(&self) -> Result<(), ChainError> {
        let node = self.trusted_node()?;
        node.sync().await.map_err(ChainError::node)?;
        debug!(chain_id = %self.id, "chain synced");
        Ok(())
    }

    /// The latest block known to the trusted node.
    ///
    /// `None` means the node has not synced yet.
    pub fn latest_block(&self) -> Result<Option<Block>, ChainError> {
        Ok(self.trusted_node()?.latest_block())
    }

    /// Register `entity` on the chain.
    ///
    /// Builds a claim `{"id": <entity id>}` issued by the entity about
    /// itself (signed when the chain has a signer), submits it, and returns
    /// the claim. Does not wait for the claim to be committed.
    pub async fn register<E>(&self, entity: &E) -> Result<Claim, ChainError>
    where
        E: Entity + ?Sized,
    {
        self.trusted_node()?;

        let entity_id = entity.id();
        let mut builder = Claim::builder()
            .entry("id", entity_id.as_str())
            .issuer(entity)
            .subject(entity);
        if let Some(key) = &self.signer {
            builder = builder.sign_with(key);
        }
        let claim = builder.build()?;

        let hash = self.submit(&claim).await?;
        info!(
            chain_id = %self.id,
            entity = %entity_id,
            claim = %claim.id_hex(),
            tx = %hash,
            "registered entity"
        );
        Ok(claim)
    }

    /// Serialize `claim` and hand it to the trusted node.
    ///
    /// Returns the transaction hash reported by the node once it has
    /// accepted the transaction into its pending pool. Inclusion in a
    /// block is not awaited and the hash is not checked. If the claim
    /// cannot be serialized the node is never contacted.
    pub async fn submit<C>(&self, claim: &C) -> Result<TxHash, ChainError>
    where
        C: ClaimPayload + ?Sized,
    {
        let node = self.trusted_node()?;
        let tx = claim.to_binary()?;
        let size = tx.len();
        let hash = node.submit(&tx).await.map_err(ChainError::node)?;
        debug!(chain_id = %self.id, %hash, size, "submitted transaction");
        Ok(hash)
    }
}

impl<N> fmt::Debug for Chain<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("id", &self.id)
            .field("has_trusted_node", &self.trusted_node.is_some())
            .field("has_signer", &self.signer.is_some())
            .finish()
    }
}

/// Collects [`ChainOption`]s and builds a [`Chain`].
pub struct ChainBuilder<N> {
    options: Vec<ChainOption<N>>,
}

impl<N> Default for ChainBuilder<N> {
    fn default() -> Self {
        Self {
            options: Vec::new(),
        }
    }
}

impl<N> ChainBuilder<N> {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.options.push(ChainOption::Id(id.into()));
        self
    }

    pub fn trusted_node(mut self, node: Arc<N>) -> Self {
        self.options.push(ChainOption::TrustedNode(node));
        self
    }

    pub fn signer(mut self, key: SigningKey) -> Self {
        self.options.push(ChainOption::Signer(key));
        self
    }

    pub fn build(self) -> Chain<N> {
        Chain::new(self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_claim::{signing_key_from_seed, ClaimError};
    use tessera_nullables::{NullEntity, NullNode};
    use tessera_types::EntityId;

    fn chain_with(node: Arc<NullNode>) -> Chain<NullNode> {
        Chain::builder().id("tessera-test").trusted_node(node).build()
    }

    fn block(height: u64) -> Block {
        Block {
            chain_id: "tessera-test".into(),
            height,
            hash: format!("H{height}"),
            ..Default::default()
        }
    }

    /// A payload whose serialization always fails.
    struct Unserializable;

    impl ClaimPayload for Unserializable {
        fn to_binary(&self) -> Result<Vec<u8>, ClaimError> {
            Err(ClaimError::MissingIssuer)
        }
    }

    /// A payload with fixed bytes.
    struct Fixed(&'static [u8]);

    impl ClaimPayload for Fixed {
        fn to_binary(&self) -> Result<Vec<u8>, ClaimError> {
            Ok(self.0.to_vec())
        }
    }

    #[test]
    fn id_is_returned_verbatim() {
        let chain: Chain<NullNode> = Chain::new([ChainOption::Id("tessera:main".into())]);
        assert_eq!(chain.id(), "tessera:main");
    }

    #[test]
    fn later_options_win() {
        let chain: Chain<NullNode> = Chain::new([
            ChainOption::Id("first".into()),
            ChainOption::Id("second".into()),
        ]);
        assert_eq!(chain.id(), "second");
    }

    #[test]
    fn empty_options_give_empty_id() {
        let chain: Chain<NullNode> = Chain::new(Vec::new());
        assert_eq!(chain.id(), "");
    }

    #[tokio::test]
    async fn operations_without_trusted_node_fail() {
        let chain: Chain<NullNode> = Chain::builder().id("orphan").build();
        assert!(matches!(
            chain.sync().await,
            Err(ChainError::NoTrustedNode { .. })
        ));
        assert!(matches!(
            chain.latest_block(),
            Err(ChainError::NoTrustedNode { .. })
        ));
        assert!(matches!(
            chain.register(&NullEntity::new("abc")).await,
            Err(ChainError::NoTrustedNode { .. })
        ));
        assert!(matches!(
            chain.submit(&Fixed(b"tx")).await,
            Err(ChainError::NoTrustedNode { .. })
        ));
    }

    #[tokio::test]
    async fn sync_delegates_to_node() {
        let node = Arc::new(NullNode::new().with_block(block(12)));
        let chain = chain_with(node.clone());

        assert_eq!(chain.latest_block().unwrap(), None);
        chain.sync().await.unwrap();
        assert_eq!(node.sync_count(), 1);
        assert_eq!(chain.latest_block().unwrap(), Some(block(12)));
    }

    #[tokio::test]
    async fn sync_failure_is_propagated() {
        let node = Arc::new(NullNode::new().failing_sync("node offline"));
        let chain = chain_with(node);

        let err = chain.sync().await.unwrap_err();
        assert!(matches!(err, ChainError::Node(_)));
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("sync failed: node offline"));
    }

    #[tokio::test]
    async fn register_builds_self_issued_id_claim() {
        let node = Arc::new(NullNode::new());
        let chain = chain_with(node.clone());
        let entity = NullEntity::new("abc");

        let claim = chain.register(&entity).await.unwrap();

        assert_eq!(claim.data().len(), 1);
        assert_eq!(claim.data().get("id").map(String::as_str), Some("abc"));
        assert_eq!(claim.issuer(), &EntityId::new("abc"));
        assert_eq!(claim.subject(), &EntityId::new("abc"));
        assert!(!claim.is_signed());
        assert_eq!(node.submitted(), vec![claim.to_binary().unwrap()]);
    }

    #[tokio::test]
    async fn register_signs_with_configured_key() {
        let node = Arc::new(NullNode::new());
        let chain = Chain::builder()
            .id("tessera-test")
            .trusted_node(node.clone())
            .signer(signing_key_from_seed(&[1u8; 32]))
            .build();

        let claim = chain.register(&NullEntity::new("abc")).await.unwrap();
        assert!(claim.is_signed());
        claim.verify().unwrap();

        let submitted = node.submitted();
        assert_eq!(submitted.len(), 1);
        assert_eq!(Claim::from_binary(&submitted[0]).unwrap(), claim);
    }

    #[tokio::test]
    async fn register_fails_when_submission_fails() {
        let node = Arc::new(NullNode::new().failing_submit("mempool full"));
        let chain = chain_with(node);

        let err = chain.register(&NullEntity::new("abc")).await.unwrap_err();
        assert!(matches!(err, ChainError::Node(_)));
    }

    #[tokio::test]
    async fn submit_sends_exact_binary_form() {
        let node = Arc::new(NullNode::new().with_hash("DEADBEEF"));
        let chain = chain_with(node.clone());

        let hash = chain.submit(&Fixed(b"\x01\x02\x03")).await.unwrap();
        assert_eq!(hash.as_bytes(), b"DEADBEEF");
        assert_eq!(node.submitted(), vec![vec![1u8, 2, 3]]);
    }

    #[tokio::test]
    async fn submit_does_not_contact_node_when_serialization_fails() {
        let node = Arc::new(NullNode::new());
        let chain = chain_with(node.clone());

        let err = chain.submit(&Unserializable).await.unwrap_err();
        assert!(matches!(err, ChainError::Claim(_)));
        assert!(node.submitted().is_empty());
    }

    #[test]
    fn debug_hides_signing_key() {
        let chain: Chain<NullNode> = Chain::builder()
            .id("x")
            .signer(signing_key_from_seed(&[9u8; 32]))
            .build();
        let text = format!("{chain:?}");
        assert!(text.contains("has_signer: true"));
        assert!(!text.contains("SigningKey"));
    }
}

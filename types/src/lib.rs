//! Shared types for the Tessera trusted-node client.
//!
//! Everything that crosses a crate boundary lives here: the chain data the
//! remote node hands back (commits, transactions, validators), the identity
//! of the entities that make claims, and the [`TrustedNode`] capability the
//! chain facade is built on.

pub mod block;
pub mod encoding;
pub mod entity;
pub mod hash;
pub mod node;
pub mod time;
pub mod tx;
pub mod validator;

pub use block::{Block, BlockId, Commit, CommitSignatures, Header, SignedHeader};
pub use entity::{Entity, EntityId};
pub use hash::TxHash;
pub use node::TrustedNode;
pub use time::Timestamp;
pub use tx::Tx;
pub use validator::{PubKey, Validator};

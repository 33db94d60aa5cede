//! Claims: signed assertions an issuer makes about a subject.
//!
//! A claim carries a string key/value data map, the issuer and subject
//! identities, and the time it was issued. Its id is the Blake2b-256 hash of
//! that body; an optional Ed25519 signature over the body proves who made it.
//! Once built, a claim is immutable. [`ClaimPayload::to_binary`] turns it into
//! the bytes submitted as a transaction.

pub mod claim;
pub mod error;
pub mod signing;

pub use claim::{Claim, ClaimBuilder, ClaimData, ClaimPayload, ClaimProof};
pub use error::ClaimError;
pub use ed25519_dalek::SigningKey;
pub use signing::{claim_id, signing_key_from_seed};

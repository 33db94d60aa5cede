//! Identity of the parties that issue and receive claims.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of an entity, e.g. a DID such as `did:tessera:abc`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Anything that can issue or be the subject of a claim.
pub trait Entity {
    fn id(&self) -> EntityId;
}

impl Entity for EntityId {
    fn id(&self) -> EntityId {
        self.clone()
    }
}

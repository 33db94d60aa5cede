//! Nullable entity: a fixed identity.

use tessera_types::{Entity, EntityId};

/// An entity whose identifier never changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NullEntity {
    id: EntityId,
}

impl NullEntity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(id),
        }
    }
}

impl Entity for NullEntity {
    fn id(&self) -> EntityId {
        self.id.clone()
    }
}

//! Nullable infrastructure for deterministic testing.
//!
//! Test-friendly stand-ins for the collaborators of a chain:
//! - [`NullNode`]: a trusted node that records submissions instead of
//!   broadcasting them, with scripted sync results and failures
//! - [`NullEntity`]: an entity with a fixed identifier
//!
//! Usage: swap the remote node for a `NullNode` in tests.

pub mod entity;
pub mod network;

pub use entity::NullEntity;
pub use network::{NullNode, NullNodeError};

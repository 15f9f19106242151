//! Domain model shared by all content-type modules.
//!
//! # Responsibility
//! - Define the scalar value and identifier types every gateway speaks.
//! - Keep concrete content types (Blog, ...) persistence-free.
//!
//! # Invariants
//! - `EntityId` `0` means "not yet persisted"; real ids are store-assigned.
//! - Audit fields on entities are read-only projections of stored state.

pub mod blog;
pub mod field;

/// Store-assigned integer identifier of one entity row.
///
/// `0` is the sentinel for an entity that has not been inserted yet. The
/// store assigns the real id on insert and it never changes afterwards.
pub type EntityId = i64;

/// Sentinel id for entities that have not been persisted yet.
pub const UNSAVED: EntityId = 0;

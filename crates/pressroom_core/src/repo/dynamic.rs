//! Dynamic field merging for write payloads.
//!
//! # Responsibility
//! - Merge schema-extension column values carried by an entity into its
//!   write payload.
//!
//! # Invariants
//! - Base/static columns always win: an existing payload key is never
//!   overwritten by a dynamic field of the same name.
//! - An entity without a value for a declared field is silently skipped.

use crate::repo::entity_table::{ContentEntity, Payload};
use crate::schema::SchemaProvider;

/// Merges the entity's dynamic field values into `payload`.
///
/// The provider is queried once, keyed by the content-type name.
pub fn attach_dynamic_fields<T: ContentEntity>(
    payload: &mut Payload,
    entity: &T,
    provider: &dyn SchemaProvider,
) {
    for field in provider.dynamic_fields(T::TYPE_NAME) {
        if payload.contains_key(&field) {
            // A misconfigured dynamic field must not shadow a core column.
            continue;
        }
        if let Some(value) = entity.dynamic_value(&field) {
            payload.insert(field, value);
        }
    }
}

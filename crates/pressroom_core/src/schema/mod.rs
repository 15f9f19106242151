//! Schema collaborator boundary for dynamic (schema-extension) fields.
//!
//! # Responsibility
//! - Declare which extra column names apply to a content type at runtime.
//! - Stay free of persistence details; providers only deal in names.
//!
//! # Invariants
//! - Declared names are returned in declaration order.
//! - Providers never decide values; entities carry those themselves.

use std::collections::BTreeMap;

/// Source of dynamic field names per content type.
///
/// The real product resolves this against its schema-extension subsystem;
/// the core only needs the resulting column names, queried once per save
/// and once per fetch.
pub trait SchemaProvider {
    /// Returns the dynamic column names for `entity_type`, in order.
    fn dynamic_fields(&self, entity_type: &str) -> Vec<String>;
}

/// Provider declaring no dynamic fields for any content type.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptySchema;

impl SchemaProvider for EmptySchema {
    fn dynamic_fields(&self, _entity_type: &str) -> Vec<String> {
        Vec::new()
    }
}

/// In-memory provider with fixed declarations.
///
/// Useful for integrators with a static set of extension columns and for
/// tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSchema {
    fields: BTreeMap<String, Vec<String>>,
}

impl StaticSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the dynamic fields of one content type, replacing any
    /// earlier declaration for the same type.
    pub fn declare(mut self, entity_type: impl Into<String>, fields: &[&str]) -> Self {
        self.fields.insert(
            entity_type.into(),
            fields.iter().map(|field| (*field).to_string()).collect(),
        );
        self
    }
}

impl SchemaProvider for StaticSchema {
    fn dynamic_fields(&self, entity_type: &str) -> Vec<String> {
        self.fields.get(entity_type).cloned().unwrap_or_default()
    }
}

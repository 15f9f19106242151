//! Blog domain model.
//!
//! # Responsibility
//! - Define the blog content type persisted by the blog gateway.
//! - Carry values for schema-extension (dynamic) columns alongside the
//!   fixed base columns.
//!
//! # Invariants
//! - `id == 0` marks an entity that has not been inserted yet.
//! - Audit fields are populated on read only; the audit stamper owns every
//!   write to them.

use crate::model::field::FieldValue;
use crate::model::{EntityId, UNSAVED};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One blog entry.
///
/// Base column is `label`; everything else arrives through the dynamic
/// field map or the audit stamper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    /// Store-assigned id, `0` until the first save.
    pub id: EntityId,
    /// Display label, the only fixed base column.
    pub label: String,
    /// Values for schema-extension columns declared by the schema provider.
    #[serde(default)]
    pub dynamic: BTreeMap<String, FieldValue>,
    /// Actor that created the row. Read-only.
    pub created_by: Option<i64>,
    /// Creation timestamp (`%Y-%m-%d %H:%M:%S`, UTC). Read-only.
    pub created_date: Option<String>,
    /// Actor of the last modification. Read-only.
    pub modified_by: Option<i64>,
    /// Timestamp of the last modification. Read-only.
    pub modified_date: Option<String>,
}

impl Blog {
    /// Creates a blog entry that has not been persisted yet.
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_id(UNSAVED, label)
    }

    /// Creates a blog entry with a known store id.
    ///
    /// Used by read paths and by callers updating an existing row.
    pub fn with_id(id: EntityId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            dynamic: BTreeMap::new(),
            created_by: None,
            created_date: None,
            modified_by: None,
            modified_date: None,
        }
    }

    /// Sets the value carried for one dynamic field.
    pub fn set_dynamic(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.dynamic.insert(field.into(), value.into());
    }

    /// Returns the carried value for one dynamic field, if any.
    pub fn dynamic(&self, field: &str) -> Option<&FieldValue> {
        self.dynamic.get(field)
    }

    /// Returns whether this entity still awaits its first insert.
    pub fn is_unsaved(&self) -> bool {
        self.id == UNSAVED
    }
}

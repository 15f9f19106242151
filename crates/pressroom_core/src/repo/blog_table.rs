//! Blog instantiation of the generic entity-table gateway.
//!
//! # Responsibility
//! - Map the blog content type onto its backing table and columns.
//! - Merge dynamic columns into the read path transparently.
//!
//! # Invariants
//! - Declared dynamic fields without a backing column are skipped on read.
//! - NULL dynamic columns are treated as "no value carried".

use crate::model::blog::Blog;
use crate::model::field::FieldValue;
use crate::model::EntityId;
use crate::repo::entity_table::{ContentEntity, EntityTable, Payload};
use crate::repo::RepoResult;
use rusqlite::Row;
use std::collections::BTreeMap;

/// Gateway over the `blog` table.
pub type BlogTable<'a> = EntityTable<'a, Blog>;

impl ContentEntity for Blog {
    const TYPE_NAME: &'static str = "blog";
    const TABLE: &'static str = "blog";
    const ID_COLUMN: &'static str = "blog_id";

    fn id(&self) -> EntityId {
        self.id
    }

    fn base_payload(&self) -> Payload {
        let mut payload = Payload::new();
        payload.insert("label".to_string(), FieldValue::from(self.label.clone()));
        payload
    }

    fn dynamic_value(&self, field: &str) -> Option<FieldValue> {
        self.dynamic.get(field).cloned()
    }

    fn from_row(row: &Row<'_>, dynamic_fields: &[String]) -> RepoResult<Self> {
        let mut dynamic = BTreeMap::new();
        for field in dynamic_fields {
            match row.get::<_, FieldValue>(field.as_str()) {
                Ok(value) if !value.is_null() => {
                    dynamic.insert(field.clone(), value);
                }
                Ok(_) => {}
                // Declared in the schema but the column does not exist yet.
                Err(rusqlite::Error::InvalidColumnName(_)) => {}
                Err(err) => return Err(err.into()),
            }
        }

        Ok(Self {
            id: row.get(Self::ID_COLUMN)?,
            label: row.get("label")?,
            dynamic,
            created_by: row.get("created_by")?,
            created_date: row.get("created_date")?,
            modified_by: row.get("modified_by")?,
            modified_date: row.get("modified_date")?,
        })
    }
}

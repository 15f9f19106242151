//! Generic entity-table gateway shared by all content-type modules.
//!
//! # Responsibility
//! - Provide fetch/filter/paginate/save behavior over one content table.
//! - Wire filter building, dynamic field merging and audit stamping into
//!   every read/write path.
//!
//! # Invariants
//! - One gateway instance handles exactly one content type and one table.
//! - `save_single` with id `0` inserts; any other id requires an existing
//!   row. The existence check and the update are two statements and are not
//!   atomic; a concurrent delete between them is not guarded against.
//! - Callers cannot write the id column or audit columns through payloads;
//!   the gateway strips them before stamping.

use crate::model::field::FieldValue;
use crate::model::{EntityId, UNSAVED};
use crate::repo::audit::{self, WriteKind, AUDIT_COLUMNS};
use crate::repo::dynamic::attach_dynamic_fields;
use crate::repo::filter::{build_where, ensure_identifier, FilterSpec};
use crate::repo::page::{PageCursor, ResultSet};
use crate::repo::{RepoError, RepoResult};
use crate::schema::SchemaProvider;
use crate::session::ActorContext;
use log::info;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::collections::BTreeMap;
use std::marker::PhantomData;

/// Write payload: column name to scalar value.
pub type Payload = BTreeMap<String, FieldValue>;

/// Capability interface one content type implements to get a gateway.
///
/// This is the whole per-type surface: column mapping, the type name used
/// by the schema collaborator, and row-to-entity conversion. Everything
/// else is shared.
pub trait ContentEntity: Sized {
    /// Content-type name, the key used with the schema collaborator and
    /// for statistics records.
    const TYPE_NAME: &'static str;
    /// Backing table name.
    const TABLE: &'static str;
    /// Name of the store-assigned integer id column.
    const ID_COLUMN: &'static str;

    /// Current id; [`UNSAVED`] until the first insert.
    fn id(&self) -> EntityId;

    /// Maps the declared base fields to a write payload. Must not include
    /// the id column or audit columns.
    fn base_payload(&self) -> Payload;

    /// Returns the carried value for one dynamic field, if any.
    fn dynamic_value(&self, field: &str) -> Option<FieldValue>;

    /// Converts one stored row back into an entity. `dynamic_fields` lists
    /// the schema-extension columns declared for this type; fields without
    /// a backing column must be skipped, not fail.
    fn from_row(row: &Row<'_>, dynamic_fields: &[String]) -> RepoResult<Self>;
}

/// Gateway over one content-type table.
///
/// Collaborators are injected explicitly: the connection, the acting
/// session identity, and the schema provider for dynamic fields.
pub struct EntityTable<'a, T> {
    conn: &'a Connection,
    actor: ActorContext,
    schema: &'a dyn SchemaProvider,
    _marker: PhantomData<T>,
}

impl<'a, T: ContentEntity> EntityTable<'a, T> {
    /// Constructs a gateway from a migrated, ready connection.
    ///
    /// Verifies that the backing table exists and carries the id column and
    /// the four audit columns, so misconfiguration fails at construction
    /// instead of on the first query.
    pub fn try_new(
        conn: &'a Connection,
        actor: ActorContext,
        schema: &'a dyn SchemaProvider,
    ) -> RepoResult<Self> {
        if !table_exists(conn, T::TABLE)? {
            return Err(RepoError::MissingRequiredTable(T::TABLE));
        }
        for column in required_columns::<T>() {
            if !table_has_column(conn, T::TABLE, column)? {
                return Err(RepoError::MissingRequiredColumn {
                    table: T::TABLE,
                    column,
                });
            }
        }

        Ok(Self {
            conn,
            actor,
            schema,
            _marker: PhantomData,
        })
    }

    /// Fetches all entities matching the filter specification.
    ///
    /// The query expression is identical in both modes; `paginated` only
    /// selects the wrapping. Empty results are an empty list or a
    /// zero-count cursor, never an error.
    pub fn fetch_all(
        &self,
        paginated: bool,
        filter: &FilterSpec,
    ) -> RepoResult<ResultSet<'a, T>> {
        let (where_sql, binds) = build_where(&filter.predicates())?;
        let select_sql = format!("SELECT * FROM {}{}", T::TABLE, where_sql);
        let dynamic_fields = self.schema.dynamic_fields(T::TYPE_NAME);

        if paginated {
            let count_sql = format!("SELECT COUNT(*) FROM {}{}", T::TABLE, where_sql);
            let cursor =
                PageCursor::new(self.conn, select_sql, &count_sql, binds, dynamic_fields)?;
            return Ok(ResultSet::Paged(cursor));
        }

        Ok(ResultSet::Eager(self.run_select(
            &select_sql,
            &binds,
            &dynamic_fields,
        )?))
    }

    /// Fetches one entity by id.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when no row matches; the only expected
    ///   failure of this operation.
    pub fn get_single(&self, id: EntityId) -> RepoResult<T> {
        let sql = format!(
            "SELECT * FROM {} WHERE {} = ?1;",
            T::TABLE,
            T::ID_COLUMN
        );
        let dynamic_fields = self.schema.dynamic_fields(T::TYPE_NAME);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return T::from_row(row, &dynamic_fields);
        }

        Err(RepoError::NotFound {
            entity: T::TYPE_NAME,
            id,
        })
    }

    /// Saves one entity, inserting when its id is the unsaved sentinel and
    /// updating otherwise. Returns the persisted id.
    ///
    /// Updates are a full-row overwrite of the supplied columns; omitted
    /// fields are not preserved unless the entity carries them.
    ///
    /// # Errors
    /// - `RepoError::UpdateTargetMissing` when updating an id that does not
    ///   exist; no write is performed.
    pub fn save_single(&self, entity: &T) -> RepoResult<EntityId> {
        let mut payload = entity.base_payload();
        attach_dynamic_fields(&mut payload, entity, self.schema);

        // The stamper owns audit columns and the store owns the id; drop
        // anything a payload tries to smuggle in.
        for column in AUDIT_COLUMNS {
            payload.remove(column);
        }
        payload.remove(T::ID_COLUMN);

        let id = entity.id();
        if id == UNSAVED {
            audit::stamp(&mut payload, WriteKind::Create, &self.actor);
            let new_id = self.insert_row(&payload)?;
            info!(
                "event=entity_insert module=repo status=ok entity={} id={new_id}",
                T::TYPE_NAME
            );
            return Ok(new_id);
        }

        match self.get_single(id) {
            Ok(_) => {}
            Err(RepoError::NotFound { .. }) => {
                return Err(RepoError::UpdateTargetMissing {
                    entity: T::TYPE_NAME,
                    id,
                });
            }
            Err(err) => return Err(err),
        }

        audit::stamp(&mut payload, WriteKind::Update, &self.actor);
        self.update_row(id, &payload)?;
        info!(
            "event=entity_update module=repo status=ok entity={} id={id}",
            T::TYPE_NAME
        );
        Ok(id)
    }

    /// Eager variant of [`EntityTable::fetch_all`], shared with the
    /// statistics aggregator.
    pub(crate) fn fetch_rows(&self, filter: &FilterSpec) -> RepoResult<Vec<T>> {
        let (where_sql, binds) = build_where(&filter.predicates())?;
        let select_sql = format!("SELECT * FROM {}{}", T::TABLE, where_sql);
        let dynamic_fields = self.schema.dynamic_fields(T::TYPE_NAME);
        self.run_select(&select_sql, &binds, &dynamic_fields)
    }

    fn run_select(
        &self,
        sql: &str,
        binds: &[FieldValue],
        dynamic_fields: &[String],
    ) -> RepoResult<Vec<T>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(binds.iter()))?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(T::from_row(row, dynamic_fields)?);
        }
        Ok(items)
    }

    fn insert_row(&self, payload: &Payload) -> RepoResult<EntityId> {
        for key in payload.keys() {
            ensure_identifier(key)?;
        }

        let columns: Vec<&str> = payload.keys().map(String::as_str).collect();
        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({});",
            T::TABLE,
            columns.join(", "),
            placeholders
        );

        self.conn
            .execute(&sql, params_from_iter(payload.values()))?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_row(&self, id: EntityId, payload: &Payload) -> RepoResult<()> {
        for key in payload.keys() {
            ensure_identifier(key)?;
        }

        let assignments: Vec<String> = payload
            .keys()
            .map(|column| format!("{column} = ?"))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?;",
            T::TABLE,
            assignments.join(", "),
            T::ID_COLUMN
        );

        let mut binds: Vec<FieldValue> = payload.values().cloned().collect();
        binds.push(FieldValue::Integer(id));

        let changed = self.conn.execute(&sql, params_from_iter(binds.iter()))?;
        if changed == 0 {
            // Row vanished between the existence check and the write.
            return Err(RepoError::UpdateTargetMissing {
                entity: T::TYPE_NAME,
                id,
            });
        }

        Ok(())
    }
}

fn required_columns<T: ContentEntity>() -> [&'static str; 5] {
    [
        T::ID_COLUMN,
        AUDIT_COLUMNS[0],
        AUDIT_COLUMNS[1],
        AUDIT_COLUMNS[2],
        AUDIT_COLUMNS[3],
    ]
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

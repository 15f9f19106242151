//! Result wrapping: eager row lists and lazy page-addressable cursors.
//!
//! # Responsibility
//! - Wrap one query expression either as a fully materialized row list or
//!   as a cursor that fetches bounded pages on demand.
//!
//! # Invariants
//! - Both wrappings run the identical query expression.
//! - Each page fetch is a fresh `LIMIT`/`OFFSET` query; memory and read
//!   cost per page stay O(page size) regardless of total row count.
//! - Cursors hold no server-side state; dropping one has no side effects.
//! - No implicit ordering is imposed; callers needing determinism add an
//!   explicit sort themselves.

use crate::model::field::FieldValue;
use crate::repo::entity_table::ContentEntity;
use crate::repo::RepoResult;
use rusqlite::{params_from_iter, Connection};
use std::marker::PhantomData;

/// Outcome of a `fetch_all` call, selected by the `paginated` flag.
#[derive(Debug)]
pub enum ResultSet<'conn, T> {
    /// Every matching row, materialized eagerly.
    Eager(Vec<T>),
    /// Lazy cursor over the same query.
    Paged(PageCursor<'conn, T>),
}

impl<'conn, T> ResultSet<'conn, T> {
    /// Returns the eager rows, or `None` for the paginated wrapping.
    pub fn into_rows(self) -> Option<Vec<T>> {
        match self {
            Self::Eager(rows) => Some(rows),
            Self::Paged(_) => None,
        }
    }

    /// Returns the page cursor, or `None` for the eager wrapping.
    pub fn into_cursor(self) -> Option<PageCursor<'conn, T>> {
        match self {
            Self::Eager(_) => None,
            Self::Paged(cursor) => Some(cursor),
        }
    }
}

/// Lazy page-addressable cursor over one entity query.
///
/// Knows the total row count up front; materializes rows only when a page
/// is requested. The cursor is just the query parameters needed to refetch
/// a page, so it is safe to discard at any point.
#[derive(Debug)]
pub struct PageCursor<'conn, T> {
    conn: &'conn Connection,
    select_sql: String,
    binds: Vec<FieldValue>,
    dynamic_fields: Vec<String>,
    total: u64,
    _marker: PhantomData<T>,
}

impl<'conn, T: ContentEntity> PageCursor<'conn, T> {
    /// Builds a cursor, computing the total row count via `count_sql`.
    pub(crate) fn new(
        conn: &'conn Connection,
        select_sql: String,
        count_sql: &str,
        binds: Vec<FieldValue>,
        dynamic_fields: Vec<String>,
    ) -> RepoResult<Self> {
        let total: i64 =
            conn.query_row(count_sql, params_from_iter(binds.iter()), |row| row.get(0))?;

        Ok(Self {
            conn,
            select_sql,
            binds,
            dynamic_fields,
            total: total.max(0) as u64,
            _marker: PhantomData,
        })
    }

    /// Total number of rows matching the query.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of pages for the given page size. Zero for `page_size == 0`.
    pub fn page_count(&self, page_size: u32) -> u64 {
        if page_size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(page_size))
    }

    /// Materializes one page (zero-based index) with a fresh bounded query.
    pub fn page(&self, page_index: u64, page_size: u32) -> RepoResult<Vec<T>> {
        let sql = format!("{} LIMIT ? OFFSET ?", self.select_sql);
        let offset = page_index.saturating_mul(u64::from(page_size));

        let mut binds = self.binds.clone();
        binds.push(FieldValue::Integer(i64::from(page_size)));
        binds.push(FieldValue::Integer(offset as i64));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(binds.iter()))?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(T::from_row(row, &self.dynamic_fields)?);
        }

        Ok(items)
    }
}

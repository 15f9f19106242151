//! Daily statistics aggregation.
//!
//! # Responsibility
//! - Append daily `{new, total}` snapshots per content type to the shared
//!   statistics table.
//!
//! # Invariants
//! - Statistics records are append-only: no update or delete path exists.
//! - `record_daily` is deliberately not idempotent; two calls on the same
//!   day append two records.

use crate::repo::audit;
use crate::repo::entity_table::{ContentEntity, EntityTable};
use crate::repo::filter::{FilterSpec, LIKE_SUFFIX};
use crate::repo::RepoResult;
use log::info;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

/// One day's aggregate counts for a content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySnapshot {
    /// Rows created today.
    pub new: u64,
    /// All rows at snapshot time.
    pub total: u64,
}

/// Append-only writer for the shared `core_statistic` table.
pub struct StatsTable<'conn> {
    conn: &'conn Connection,
}

impl<'conn> StatsTable<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Appends one statistics record.
    pub fn insert(&self, stats_key: &str, data: &str, date: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO core_statistic (stats_key, data, date) VALUES (?1, ?2, ?3);",
            params![stats_key, data, date],
        )?;
        Ok(())
    }
}

impl<T: ContentEntity> EntityTable<'_, T> {
    /// Appends today's `{new, total}` snapshot for this content type under
    /// the key `"<type>-daily"`.
    ///
    /// Counts are taken with the same eager fetch path callers use, so the
    /// snapshot reflects exactly what `fetch_all` would return at call
    /// time. New-today rows are found via a `created_date` prefix filter.
    pub fn record_daily(&self, stats: &StatsTable<'_>) -> RepoResult<()> {
        let total = self.fetch_rows(&FilterSpec::new())?.len() as u64;

        let today_filter =
            FilterSpec::new().with(format!("created_date{LIKE_SUFFIX}"), audit::current_date());
        let new = self.fetch_rows(&today_filter)?.len() as u64;

        let snapshot = DailySnapshot { new, total };
        let data = serde_json::to_string(&snapshot)?;
        stats.insert(
            &format!("{}-daily", T::TYPE_NAME),
            &data,
            &audit::current_timestamp(),
        )?;

        info!(
            "event=stats_daily module=repo status=ok entity={} new={new} total={total}",
            T::TYPE_NAME
        );
        Ok(())
    }
}

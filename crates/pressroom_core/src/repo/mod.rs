//! Repository layer: the generic entity-table gateway and its parts.
//!
//! # Responsibility
//! - Define the shared fetch/filter/paginate/save/audit behavior every
//!   content-type gateway inherits.
//! - Isolate SQL details from domain models and callers.
//!
//! # Invariants
//! - `NotFound` and `UpdateTargetMissing` are the only recoverable error
//!   classes; everything else fails the operation and is attempted once.
//! - Audit columns are written exclusively by the audit stamper.

use crate::db::DbError;
use crate::model::EntityId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod audit;
pub mod blog_table;
pub mod dynamic;
pub mod entity_table;
pub mod filter;
pub mod page;
pub mod stats;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for entity persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Lookup by id matched no row. Recoverable; callers surface it as a
    /// structured error response, never as a process failure.
    NotFound {
        entity: &'static str,
        id: EntityId,
    },
    /// Update attempted against an id that does not exist. No write is
    /// performed.
    UpdateTargetMissing {
        entity: &'static str,
        id: EntityId,
    },
    /// Connection readiness check failed: backing table is absent.
    MissingRequiredTable(&'static str),
    /// Connection readiness check failed: a required column is absent.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// A filter key or payload key does not name a valid column identifier.
    InvalidIdentifier(String),
    InvalidData(String),
    Json(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => {
                write!(f, "could not find {entity} with identifier {id}")
            }
            Self::UpdateTargetMissing { entity, id } => {
                write!(f, "cannot update {entity} with identifier {id}; it does not exist")
            }
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{column}` is missing on table `{table}`")
            }
            Self::InvalidIdentifier(name) => {
                write!(f, "invalid column identifier `{name}`")
            }
            Self::InvalidData(message) => {
                write!(f, "invalid persisted entity data: {message}")
            }
            Self::Json(err) => write!(f, "failed to encode statistics payload: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

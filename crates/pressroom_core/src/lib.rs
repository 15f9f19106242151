//! Core entity persistence for Pressroom content modules.
//! This crate is the single source of truth for fetch/filter/save invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod schema;
pub mod session;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::blog::Blog;
pub use model::field::FieldValue;
pub use model::EntityId;
pub use repo::audit::WriteKind;
pub use repo::blog_table::BlogTable;
pub use repo::entity_table::{ContentEntity, EntityTable, Payload};
pub use repo::filter::{FilterSpec, Predicate};
pub use repo::page::{PageCursor, ResultSet};
pub use repo::stats::{DailySnapshot, StatsTable};
pub use repo::{RepoError, RepoResult};
pub use schema::{EmptySchema, SchemaProvider, StaticSchema};
pub use session::ActorContext;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

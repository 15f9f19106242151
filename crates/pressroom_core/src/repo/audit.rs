//! Audit stamping of write payloads.
//!
//! # Responsibility
//! - Inject actor and timestamp metadata into every write payload.
//! - Own the audit columns; no other code writes them.
//!
//! # Invariants
//! - Create stamps all four audit columns from one timestamp, so
//!   `created_date == modified_date` at insert time.
//! - Update stamps only `modified_by`/`modified_date`; creation metadata is
//!   never overwritten.

use crate::model::field::FieldValue;
use crate::repo::entity_table::Payload;
use crate::session::ActorContext;
use chrono::Utc;

/// Columns owned by the audit stamper.
pub const AUDIT_COLUMNS: [&str; 4] = [
    "created_by",
    "created_date",
    "modified_by",
    "modified_date",
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Whether a save is the first insert or an update of an existing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Create,
    Update,
}

/// Stamps audit metadata onto a write payload.
pub fn stamp(payload: &mut Payload, kind: WriteKind, actor: &ActorContext) {
    stamp_at(payload, kind, actor, &current_timestamp());
}

fn stamp_at(payload: &mut Payload, kind: WriteKind, actor: &ActorContext, now: &str) {
    let actor_id = FieldValue::Integer(actor.actor_id());

    if kind == WriteKind::Create {
        payload.insert("created_by".to_string(), actor_id.clone());
        payload.insert("created_date".to_string(), FieldValue::from(now));
    }
    payload.insert("modified_by".to_string(), actor_id);
    payload.insert("modified_date".to_string(), FieldValue::from(now));
}

/// Current UTC timestamp in the store's audit format.
pub fn current_timestamp() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Current UTC date, the prefix shared by every timestamp stamped today.
pub fn current_date() -> String {
    Utc::now().format(DATE_FORMAT).to_string()
}

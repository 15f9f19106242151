//! Authenticated-actor context consumed by write paths.
//!
//! # Responsibility
//! - Carry the identity of the actor performing a write.
//!
//! # Invariants
//! - Every gateway write requires an actor; integrators construct the
//!   context from their session subsystem before touching the core.

/// Identity of the authenticated actor performing writes.
///
/// The audit stamper reads this for `created_by`/`modified_by`. There is no
/// anonymous fallback: an integrator without a session must not reach the
/// write path at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorContext {
    actor_id: i64,
}

impl ActorContext {
    /// Creates a context for the given actor id.
    pub fn new(actor_id: i64) -> Self {
        Self { actor_id }
    }

    /// Returns the actor id used for audit stamping.
    pub fn actor_id(&self) -> i64 {
        self.actor_id
    }
}

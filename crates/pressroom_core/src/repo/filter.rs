//! Declarative filter specifications and predicate building.
//!
//! # Responsibility
//! - Parse the filter-key suffix convention once into tagged predicates.
//! - Render predicates into a WHERE clause plus bind values.
//!
//! # Invariants
//! - An empty specification matches all rows (no WHERE clause).
//! - Keys without a recognized suffix are silently ignored, never an error;
//!   they are reserved for future predicate kinds.
//! - `PrefixLike` matches prefixes only, not arbitrary substrings.

use crate::model::field::FieldValue;
use crate::repo::{RepoError, RepoResult};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Key suffix selecting a prefix-match predicate on the remaining column
/// name.
pub const LIKE_SUFFIX: &str = "-like";

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern must compile")
});

/// Ordered mapping of filter keys to values.
///
/// Keys carry the predicate kind in their suffix; `FilterSpec` itself stays
/// a dumb container so the convention is interpreted in exactly one place,
/// [`FilterSpec::predicates`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    entries: Vec<(String, String)>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one filter entry, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds one filter entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parses the specification into tagged predicates.
    ///
    /// Keys ending in [`LIKE_SUFFIX`] become [`Predicate::PrefixLike`] on
    /// the column named by stripping the suffix. Every other key is skipped.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();
        for (key, value) in &self.entries {
            match key.strip_suffix(LIKE_SUFFIX) {
                Some(column) => predicates.push(Predicate::PrefixLike {
                    column: column.to_string(),
                    prefix: value.clone(),
                }),
                None => {
                    debug!(
                        "event=filter_skip module=repo status=ok key={key} reason=unrecognized_suffix"
                    );
                }
            }
        }
        predicates
    }
}

/// One parsed filter condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Column equals value exactly.
    Exact { column: String, value: FieldValue },
    /// Column starts with the given prefix.
    PrefixLike { column: String, prefix: String },
}

impl Predicate {
    /// Renders this predicate as one SQL condition plus its bind value.
    fn to_sql(&self) -> RepoResult<(String, FieldValue)> {
        match self {
            Self::Exact { column, value } => {
                ensure_identifier(column)?;
                Ok((format!("{column} = ?"), value.clone()))
            }
            Self::PrefixLike { column, prefix } => {
                ensure_identifier(column)?;
                // Trailing wildcard only: prefix matching, not substring.
                Ok((format!("{column} LIKE ?"), FieldValue::Text(format!("{prefix}%"))))
            }
        }
    }
}

/// Builds the WHERE clause for a predicate list.
///
/// Returns the clause with a leading space (empty for no predicates) and
/// the bind values in condition order.
pub(crate) fn build_where(predicates: &[Predicate]) -> RepoResult<(String, Vec<FieldValue>)> {
    if predicates.is_empty() {
        return Ok((String::new(), Vec::new()));
    }

    let mut conditions = Vec::with_capacity(predicates.len());
    let mut binds = Vec::with_capacity(predicates.len());
    for predicate in predicates {
        let (condition, bind) = predicate.to_sql()?;
        conditions.push(condition);
        binds.push(bind);
    }

    Ok((format!(" WHERE {}", conditions.join(" AND ")), binds))
}

/// Rejects names that cannot safely be interpolated as column identifiers.
pub(crate) fn ensure_identifier(name: &str) -> RepoResult<()> {
    if IDENTIFIER.is_match(name) {
        Ok(())
    } else {
        Err(RepoError::InvalidIdentifier(name.to_string()))
    }
}

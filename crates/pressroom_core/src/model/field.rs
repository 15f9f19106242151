//! Scalar column values exchanged with the store.
//!
//! # Responsibility
//! - Represent one column value independently of rusqlite types.
//! - Bridge to SQLite binding/reading via `ToSql`/`FromSql`.
//!
//! # Invariants
//! - Dynamic (schema-extension) columns are scalars; blobs are rejected.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Value, ValueRef};
use serde::{Deserialize, Serialize};

/// Scalar value of one entity column.
///
/// Used for write payloads, filter bind values and dynamic-field reads, so
/// one shape covers everything that crosses the store boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl FieldValue {
    /// Returns the text content when this value is `Text`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Returns the integer content when this value is `Integer`.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns whether this value is SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl ToSql for FieldValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Self::Null => ToSqlOutput::Owned(Value::Null),
            Self::Integer(value) => ToSqlOutput::Owned(Value::Integer(*value)),
            Self::Real(value) => ToSqlOutput::Owned(Value::Real(*value)),
            Self::Text(value) => ToSqlOutput::Borrowed(ValueRef::Text(value.as_bytes())),
        })
    }
}

impl FromSql for FieldValue {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Null => Ok(Self::Null),
            ValueRef::Integer(value) => Ok(Self::Integer(value)),
            ValueRef::Real(value) => Ok(Self::Real(value)),
            ValueRef::Text(bytes) => std::str::from_utf8(bytes)
                .map(|text| Self::Text(text.to_string()))
                .map_err(|err| FromSqlError::Other(Box::new(err))),
            // Blob columns are not valid dynamic fields.
            ValueRef::Blob(_) => Err(FromSqlError::InvalidType),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FieldValue;

    #[test]
    fn accessors_match_variants() {
        assert_eq!(FieldValue::from("abc").as_text(), Some("abc"));
        assert_eq!(FieldValue::from(42).as_integer(), Some(42));
        assert!(FieldValue::Null.is_null());
        assert_eq!(FieldValue::from(42).as_text(), None);
    }

    #[test]
    fn serializes_as_plain_json_scalars() {
        assert_eq!(
            serde_json::to_string(&FieldValue::from("x")).unwrap(),
            "\"x\""
        );
        assert_eq!(serde_json::to_string(&FieldValue::from(7)).unwrap(), "7");
        assert_eq!(serde_json::to_string(&FieldValue::Null).unwrap(), "null");
    }
}

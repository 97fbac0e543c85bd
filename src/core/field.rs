//! Field value types and per-type field access

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// A polymorphic field value that can hold different types
///
/// Shaped records and sort comparisons both operate on this type rather than
/// on the concrete DTO or entity structs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    Date(NaiveDate),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a UUID if possible
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            FieldValue::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Total ordering used by the multi-key sort.
    ///
    /// Null sorts before any concrete value. Values of different concrete
    /// kinds compare equal; within one storage column all values share a
    /// kind, so the mixed case only arises on malformed data.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        use FieldValue::*;
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Null, _) => Ordering::Less,
            (_, Null) => Ordering::Greater,
            (String(a), String(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Boolean(a), Boolean(b)) => a.cmp(b),
            (Uuid(a), Uuid(b)) => a.cmp(b),
            (Date(a), Date(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Per-type field-descriptor table
///
/// Implemented by hand for every struct whose fields can be addressed by
/// name over the wire (projection) or by the storage layer (sorting). This
/// replaces runtime reflection with a declared table: `field_names` lists
/// the names in declared order, `field_value` reads one of them.
pub trait FieldAccess {
    /// Human-readable type name, used in error messages
    fn type_name() -> &'static str;

    /// Declared field names, in declared order and original casing
    fn field_names() -> &'static [&'static str];

    /// Read a field by its declared name
    ///
    /// Returns `None` for names not in `field_names`. Lookup here is exact;
    /// case-insensitive resolution happens once per request, not per object.
    fn field_value(&self, field: &str) -> Option<FieldValue>;
}

//! Wrapping native values into `FieldValue` and extracting them back out.
//!
//! Wrapping is total: every supported native type maps to exactly one kind,
//! and a type without a `From` impl simply does not compile. Extraction is
//! the opposite: it always succeeds, substituting a type-appropriate zero
//! value whenever the held kind is not what the requested type expects.
//! Application code relies on those defaults for optional fields, so a kind
//! mismatch is never surfaced as an error.

use std::collections::HashMap;

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};

use crate::value::{FieldMap, FieldValue};

/// Extraction half of the type mapping.
///
/// `from_field` returns the payload when the kind matches and the
/// implementor's zero value otherwise.
pub trait FromFieldValue: Sized {
    /// Extract `Self` from a field value, defaulting on kind mismatch.
    fn from_field(value: &FieldValue) -> Self;
}

/// Maps a user enum onto its `Int32` storage representation.
///
/// Enums are stored as their integer discriminant and cast back on
/// extraction; an out-of-range integer maps to whatever `from_i32` decides,
/// and a non-`Int32` field maps to `Default::default()`.
pub trait FieldEnum: Sized + Default {
    /// The stored integer representation.
    fn to_i32(&self) -> i32;
    /// Recover the enum from its stored representation.
    fn from_i32(raw: i32) -> Self;
}

// --- wrapping -----------------------------------------------------------

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int32(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int64(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Double(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<ObjectId> for FieldValue {
    fn from(value: ObjectId) -> Self {
        FieldValue::ObjectId(value)
    }
}

impl From<bson::DateTime> for FieldValue {
    fn from(value: bson::DateTime) -> Self {
        FieldValue::Date(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Date(bson::DateTime::from_chrono(value))
    }
}

impl From<std::time::SystemTime> for FieldValue {
    fn from(value: std::time::SystemTime) -> Self {
        FieldValue::Date(bson::DateTime::from_system_time(value))
    }
}

impl From<bson::Timestamp> for FieldValue {
    fn from(value: bson::Timestamp) -> Self {
        FieldValue::Timestamp(value)
    }
}

impl From<&[u8]> for FieldValue {
    fn from(value: &[u8]) -> Self {
        FieldValue::Binary(value.to_vec())
    }
}

impl From<FieldMap> for FieldValue {
    fn from(value: FieldMap) -> Self {
        FieldValue::Object(value)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        FieldValue::Array(values.into_iter().map(Into::into).collect())
    }
}

// --- extraction ---------------------------------------------------------

impl FromFieldValue for FieldValue {
    fn from_field(value: &FieldValue) -> Self {
        value.clone()
    }
}

impl FromFieldValue for bool {
    fn from_field(value: &FieldValue) -> Self {
        match value {
            FieldValue::Boolean(b) => *b,
            _ => false,
        }
    }
}

impl FromFieldValue for i32 {
    fn from_field(value: &FieldValue) -> Self {
        match value {
            FieldValue::Int32(i) => *i,
            _ => 0,
        }
    }
}

impl FromFieldValue for i64 {
    fn from_field(value: &FieldValue) -> Self {
        match value {
            FieldValue::Int64(i) => *i,
            _ => 0,
        }
    }
}

impl FromFieldValue for f64 {
    fn from_field(value: &FieldValue) -> Self {
        match value {
            FieldValue::Double(f) => *f,
            _ => 0.0,
        }
    }
}

impl FromFieldValue for String {
    fn from_field(value: &FieldValue) -> Self {
        // Code, Symbol and RegExpr share the string payload and extract
        // the same way String does.
        match value {
            FieldValue::String(s)
            | FieldValue::Code(s)
            | FieldValue::Symbol(s)
            | FieldValue::RegExpr(s) => s.clone(),
            _ => String::new(),
        }
    }
}

impl FromFieldValue for ObjectId {
    fn from_field(value: &FieldValue) -> Self {
        match value {
            FieldValue::ObjectId(oid) => *oid,
            _ => ObjectId::from_bytes([0u8; 12]),
        }
    }
}

impl FromFieldValue for bson::DateTime {
    fn from_field(value: &FieldValue) -> Self {
        match value {
            FieldValue::Date(dt) => *dt,
            _ => bson::DateTime::from_millis(0),
        }
    }
}

impl FromFieldValue for DateTime<Utc> {
    fn from_field(value: &FieldValue) -> Self {
        match value {
            FieldValue::Date(dt) => dt.to_chrono(),
            _ => DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

impl FromFieldValue for bson::Timestamp {
    fn from_field(value: &FieldValue) -> Self {
        match value {
            FieldValue::Timestamp(ts) => *ts,
            _ => bson::Timestamp {
                time: 0,
                increment: 0,
            },
        }
    }
}

impl FromFieldValue for FieldMap {
    fn from_field(value: &FieldValue) -> Self {
        match value {
            FieldValue::Object(map) => map.clone(),
            _ => HashMap::new(),
        }
    }
}

impl<T: FromFieldValue> FromFieldValue for Vec<T> {
    fn from_field(value: &FieldValue) -> Self {
        // Element-wise: a mismatched element yields that element's default,
        // not an extraction failure for the whole array.
        match value {
            FieldValue::Array(items) => items.iter().map(T::from_field).collect(),
            _ => Vec::new(),
        }
    }
}

impl FieldValue {
    /// Extract a binary payload, yielding an empty vector for any other
    /// kind. (`extract::<Vec<u8>>()` cannot exist alongside the generic
    /// array extraction, so bytes have their own accessor.)
    pub fn extract_bytes(&self) -> Vec<u8> {
        match self {
            FieldValue::Binary(bytes) => bytes.clone(),
            _ => Vec::new(),
        }
    }

    /// Borrow the payload as a bool, if that is what is held.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrow the payload as an i32, if that is what is held.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            FieldValue::Int32(i) => Some(*i),
            _ => None,
        }
    }

    /// Borrow the payload as an i64, if that is what is held.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int64(i) => Some(*i),
            _ => None,
        }
    }

    /// Borrow the payload as an f64, if that is what is held.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Double(f) => Some(*f),
            _ => None,
        }
    }

    /// Borrow the string payload of a `String` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the byte payload of a `Binary` value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            FieldValue::Binary(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Borrow the payload as an ObjectId, if that is what is held.
    pub fn as_object_id(&self) -> Option<ObjectId> {
        match self {
            FieldValue::ObjectId(oid) => Some(*oid),
            _ => None,
        }
    }

    /// Borrow the elements of an `Array` value.
    pub fn as_array(&self) -> Option<&Vec<FieldValue>> {
        match self {
            FieldValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the map of an `Object` value.
    pub fn as_object(&self) -> Option<&FieldMap> {
        match self {
            FieldValue::Object(map) => Some(map),
            _ => None,
        }
    }
}

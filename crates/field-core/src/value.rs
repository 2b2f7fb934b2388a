//! The tagged field-value model.
//!
//! `FieldValue` represents every value a document field can hold, including
//! the recursive array and object containers. The discriminant and the
//! payload are one construct, so a value can never report one kind while
//! carrying another kind's payload.

use std::collections::HashMap;

use bson::oid::ObjectId;

use crate::convert::{FieldEnum, FromFieldValue};
use crate::document::Document;

/// A map from field name to value, as produced by `Document::to_fields`.
///
/// Keys are unique; iteration order is unspecified and irrelevant for
/// equality.
pub type FieldMap = HashMap<String, FieldValue>;

/// Discriminant tag identifying which BSON-like type a `FieldValue` holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Array of field values.
    Array,
    /// Binary data.
    Binary,
    /// Boolean.
    Boolean,
    /// JavaScript code.
    Code,
    /// Date, millisecond precision since the Unix epoch.
    Date,
    /// High-precision decimal.
    Decimal128,
    /// Double-precision floating point.
    Double,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// MaxKey (internal MongoDB type).
    MaxKey,
    /// MinKey (internal MongoDB type).
    MinKey,
    /// Null.
    Null,
    /// Embedded document/object.
    Object,
    /// ObjectId (unique identifier).
    ObjectId,
    /// Regular expression.
    RegExpr,
    /// UTF-8 string.
    String,
    /// Symbol (deprecated in BSON).
    Symbol,
    /// Timestamp (internal MongoDB type).
    Timestamp,
    /// Undefined, the default empty state. Distinct from `Null`.
    Undefined,
}

/// A single field value: one active kind plus its payload.
///
/// Arrays and objects are recursive; their elements are full `FieldValue`s.
/// `Code`, `Symbol` and `RegExpr` normalize to a string payload. `Undefined`
/// is the default state of a freshly constructed value.
///
/// Equality is structural and recursive: two values are equal when their
/// kinds match and their payloads compare equal at every depth.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// Ordered sequence of values.
    Array(Vec<FieldValue>),
    /// Byte sequence with explicit length.
    Binary(Vec<u8>),
    /// Boolean.
    Boolean(bool),
    /// JavaScript code, stored as its source string.
    Code(String),
    /// Date with millisecond precision, always UTC.
    Date(bson::DateTime),
    /// Decimal128 carries no payload in this model; it degrades to null on
    /// the wire.
    Decimal128,
    /// 64-bit IEEE 754 floating point.
    Double(f64),
    /// 32-bit signed integer.
    Int32(i32),
    /// 64-bit signed integer.
    Int64(i64),
    /// MaxKey.
    MaxKey,
    /// MinKey.
    MinKey,
    /// Null.
    Null,
    /// Mapping from field name to value.
    Object(FieldMap),
    /// 12-byte ObjectId (24 hex characters in canonical form).
    ObjectId(ObjectId),
    /// Regular expression pattern, stored as a string.
    RegExpr(String),
    /// UTF-8 string.
    String(String),
    /// Symbol, stored as a string.
    Symbol(String),
    /// Two-part timestamp: seconds plus an increment ordinal.
    Timestamp(bson::Timestamp),
    /// Undefined, the default empty state.
    #[default]
    Undefined,
}

impl FieldValue {
    /// The discriminant of the currently held payload.
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Array(_) => FieldKind::Array,
            FieldValue::Binary(_) => FieldKind::Binary,
            FieldValue::Boolean(_) => FieldKind::Boolean,
            FieldValue::Code(_) => FieldKind::Code,
            FieldValue::Date(_) => FieldKind::Date,
            FieldValue::Decimal128 => FieldKind::Decimal128,
            FieldValue::Double(_) => FieldKind::Double,
            FieldValue::Int32(_) => FieldKind::Int32,
            FieldValue::Int64(_) => FieldKind::Int64,
            FieldValue::MaxKey => FieldKind::MaxKey,
            FieldValue::MinKey => FieldKind::MinKey,
            FieldValue::Null => FieldKind::Null,
            FieldValue::Object(_) => FieldKind::Object,
            FieldValue::ObjectId(_) => FieldKind::ObjectId,
            FieldValue::RegExpr(_) => FieldKind::RegExpr,
            FieldValue::String(_) => FieldKind::String,
            FieldValue::Symbol(_) => FieldKind::Symbol,
            FieldValue::Timestamp(_) => FieldKind::Timestamp,
            FieldValue::Undefined => FieldKind::Undefined,
        }
    }

    /// Create a binary value from a byte sequence.
    pub fn binary(bytes: impl Into<Vec<u8>>) -> Self {
        FieldValue::Binary(bytes.into())
    }

    /// Wrap an enum as its `Int32` representation.
    pub fn from_enum<E: FieldEnum>(value: E) -> Self {
        FieldValue::Int32(value.to_i32())
    }

    /// Wrap a slice of documents as an array of objects, each element
    /// serialized through its own `to_fields`.
    pub fn from_documents<T: Document>(docs: &[T]) -> Self {
        FieldValue::Array(docs.iter().map(Document::to_field_value).collect())
    }

    /// Check if this value is null. `Undefined` is not null.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Check if this value is still in its default, undefined state.
    pub fn is_undefined(&self) -> bool {
        matches!(self, FieldValue::Undefined)
    }

    /// Extract the payload as `T`.
    ///
    /// This never fails: when the held kind is not what `T` expects, the
    /// result is `T`'s zero value (`0`, `false`, an empty string or an
    /// empty container). Callers that need to distinguish "absent" from
    /// "zero" should check [`kind`](Self::kind) first.
    pub fn extract<T: FromFieldValue>(&self) -> T {
        T::from_field(self)
    }

    /// Extract an enum stored as `Int32`, defaulting on any other kind.
    pub fn extract_enum<E: FieldEnum>(&self) -> E {
        match self {
            FieldValue::Int32(raw) => E::from_i32(*raw),
            _ => E::default(),
        }
    }

    /// Extract a document from an `Object` value.
    ///
    /// Any other kind yields a default-constructed `T`.
    pub fn extract_document<T: Document + Default>(&self) -> T {
        let mut doc = T::default();
        doc.from_field_value(self);
        doc
    }

    /// Extract a vector of documents from an `Array` of objects.
    ///
    /// Any other kind yields an empty vector; a non-object element yields
    /// that element's default document.
    pub fn extract_documents<T: Document + Default>(&self) -> Vec<T> {
        match self {
            FieldValue::Array(items) => items
                .iter()
                .map(|item| item.extract_document::<T>())
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_undefined() {
        let fv = FieldValue::default();
        assert_eq!(fv.kind(), FieldKind::Undefined);
        assert!(fv.is_undefined());
        assert!(!fv.is_null());
    }

    #[test]
    fn test_null_and_undefined_are_distinct() {
        assert_ne!(FieldValue::Null, FieldValue::Undefined);
        assert!(FieldValue::Null.is_null());
        assert!(!FieldValue::Null.is_undefined());
    }

    #[test]
    fn test_kind_reports_active_payload() {
        assert_eq!(FieldValue::Boolean(true).kind(), FieldKind::Boolean);
        assert_eq!(FieldValue::Int32(1).kind(), FieldKind::Int32);
        assert_eq!(FieldValue::Int64(1).kind(), FieldKind::Int64);
        assert_eq!(FieldValue::Double(1.0).kind(), FieldKind::Double);
        assert_eq!(
            FieldValue::String("s".to_string()).kind(),
            FieldKind::String
        );
        assert_eq!(FieldValue::Code("c".to_string()).kind(), FieldKind::Code);
        assert_eq!(FieldValue::binary(vec![1u8]).kind(), FieldKind::Binary);
        assert_eq!(FieldValue::Array(vec![]).kind(), FieldKind::Array);
        assert_eq!(FieldValue::Object(FieldMap::new()).kind(), FieldKind::Object);
    }

    #[test]
    fn test_structural_equality_recurses() {
        let make = || {
            let mut inner = FieldMap::new();
            inner.insert("n".to_string(), FieldValue::Int32(7));
            FieldValue::Array(vec![
                FieldValue::Object(inner),
                FieldValue::String("x".to_string()),
            ])
        };
        assert_eq!(make(), make());

        let mut other_inner = FieldMap::new();
        other_inner.insert("n".to_string(), FieldValue::Int32(8));
        let other = FieldValue::Array(vec![
            FieldValue::Object(other_inner),
            FieldValue::String("x".to_string()),
        ]);
        assert_ne!(make(), other);
    }

    #[test]
    fn test_equality_requires_matching_kind() {
        // Same string payload under different kinds compares unequal.
        assert_ne!(
            FieldValue::String("f".to_string()),
            FieldValue::Code("f".to_string())
        );
    }

    #[test]
    fn test_object_equality_ignores_insertion_order() {
        let mut a = FieldMap::new();
        a.insert("x".to_string(), FieldValue::Int32(1));
        a.insert("y".to_string(), FieldValue::Int32(2));

        let mut b = FieldMap::new();
        b.insert("y".to_string(), FieldValue::Int32(2));
        b.insert("x".to_string(), FieldValue::Int32(1));

        assert_eq!(FieldValue::Object(a), FieldValue::Object(b));
    }
}

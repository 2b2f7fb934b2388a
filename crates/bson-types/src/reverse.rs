//! Reverse conversion: BSON value → FieldValue.
//!
//! The dispatch mirrors the forward direction: every explicitly handled
//! wire type maps back to the matching kind, and any other wire type
//! collapses silently to a `Null` field. Exotic element types are
//! therefore unrepresentable in this model; callers must not assume full
//! fidelity outside the explicitly listed set.

use bson::{Bson, Document};
use field_core::{FieldMap, FieldValue};

/// Convert a wire element to a `FieldValue`.
pub fn bson_to_field(value: &Bson) -> FieldValue {
    match value {
        Bson::Boolean(b) => FieldValue::Boolean(*b),
        Bson::Int32(i) => FieldValue::Int32(*i),
        Bson::Int64(i) => FieldValue::Int64(*i),
        Bson::Double(f) => FieldValue::Double(*f),
        Bson::String(s) => FieldValue::String(s.clone()),
        Bson::ObjectId(oid) => FieldValue::ObjectId(*oid),
        Bson::DateTime(dt) => FieldValue::Date(*dt),
        Bson::Timestamp(ts) => FieldValue::Timestamp(*ts),
        Bson::Binary(bin) => FieldValue::Binary(bin.bytes.clone()),
        Bson::Document(doc) => FieldValue::Object(document_to_fields(doc)),
        Bson::Array(items) => FieldValue::Array(items.iter().map(bson_to_field).collect()),
        Bson::Null => FieldValue::Null,
        // Everything else (JavaScript code, symbols, regular expressions,
        // Decimal128, MinKey/MaxKey, ...) collapses to null.
        _ => FieldValue::Null,
    }
}

/// Convert a complete wire document to a field map.
pub fn document_to_fields(doc: &Document) -> FieldMap {
    doc.iter()
        .map(|(key, value)| (key.clone(), bson_to_field(value)))
        .collect()
}

/// Extract a single field from a wire document, if present.
pub fn extract_field(doc: &Document, key: &str) -> Option<FieldValue> {
    doc.get(key).map(bson_to_field)
}

//! Forward conversion: FieldValue → BSON value.
//!
//! Each field kind maps to exactly one wire element type. Kinds with no
//! wire mapping in this model (Undefined, MaxKey, MinKey, Code, Symbol,
//! RegExpr, Decimal128) degrade to a wire null element. That loss is
//! accepted and silent: no log, no error.

use bson::spec::BinarySubtype;
use bson::{Bson, Document};
use field_core::{FieldMap, FieldValue};

/// Wrapper for BSON values produced from a `FieldValue`.
#[derive(Debug, Clone)]
pub struct BsonValue(pub Bson);

impl BsonValue {
    /// Get the inner BSON value.
    pub fn into_inner(self) -> Bson {
        self.0
    }

    /// Get a reference to the inner BSON value.
    pub fn as_inner(&self) -> &Bson {
        &self.0
    }
}

impl From<&FieldValue> for BsonValue {
    fn from(fv: &FieldValue) -> Self {
        BsonValue(field_to_bson(fv))
    }
}

impl From<FieldValue> for BsonValue {
    fn from(fv: FieldValue) -> Self {
        BsonValue(field_to_bson(&fv))
    }
}

/// Convert a single `FieldValue` to its wire element.
pub fn field_to_bson(fv: &FieldValue) -> Bson {
    match fv {
        FieldValue::Boolean(b) => Bson::Boolean(*b),
        FieldValue::Int32(i) => Bson::Int32(*i),
        FieldValue::Int64(i) => Bson::Int64(*i),
        FieldValue::Double(f) => Bson::Double(*f),
        FieldValue::Null => Bson::Null,
        FieldValue::String(s) => Bson::String(s.clone()),
        FieldValue::ObjectId(oid) => Bson::ObjectId(*oid),
        FieldValue::Date(dt) => Bson::DateTime(*dt),
        FieldValue::Timestamp(ts) => Bson::Timestamp(*ts),
        FieldValue::Binary(bytes) => Bson::Binary(bson::Binary {
            subtype: BinarySubtype::Generic,
            bytes: bytes.clone(),
        }),
        FieldValue::Object(map) => {
            let mut sub_doc = Document::new();
            for (key, value) in map {
                append_to_document(&mut sub_doc, key, value);
            }
            Bson::Document(sub_doc)
        }
        FieldValue::Array(items) => {
            let mut sub_arr = bson::Array::new();
            for item in items {
                append_to_array(&mut sub_arr, item);
            }
            Bson::Array(sub_arr)
        }
        // No wire mapping in this model; degrades to null.
        FieldValue::Code(_)
        | FieldValue::Symbol(_)
        | FieldValue::RegExpr(_)
        | FieldValue::Decimal128
        | FieldValue::MaxKey
        | FieldValue::MinKey
        | FieldValue::Undefined => Bson::Null,
    }
}

/// Append a key/value pair to a BSON document under construction.
pub fn append_to_document(doc: &mut Document, key: &str, fv: &FieldValue) {
    doc.insert(key, field_to_bson(fv));
}

/// Append a value to a BSON array under construction.
pub fn append_to_array(arr: &mut bson::Array, fv: &FieldValue) {
    arr.push(field_to_bson(fv));
}

/// Build a complete BSON document from a field map.
pub fn fields_to_document(fields: &FieldMap) -> Document {
    let mut doc = Document::new();
    for (key, value) in fields {
        append_to_document(&mut doc, key, value);
    }
    doc
}

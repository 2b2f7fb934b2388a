//! The `Document` trait implemented by application model types.

use bson::oid::ObjectId;

use crate::convert::FromFieldValue;
use crate::value::{FieldMap, FieldValue};

/// An application type that can be stored in a collection.
///
/// Implementors convert their fields to and from a [`FieldMap`]; the
/// storage layer owns the `_id` and assigns it on insert via
/// [`set_id`](Document::set_id).
///
/// `from_fields` must accept partial maps: a missing key leaves the
/// corresponding field at its prior value rather than failing. The
/// [`get_field`] helper supports that contract.
pub trait Document {
    /// Serialize this document's fields into a map.
    fn to_fields(&self) -> FieldMap;

    /// Populate this document's fields from a map. Missing keys leave the
    /// target fields untouched.
    fn from_fields(&mut self, fields: &FieldMap);

    /// The document's ObjectId, assigned by the storage layer on insert.
    fn id(&self) -> ObjectId;

    /// Set the document's ObjectId. Called by the collection after insert.
    fn set_id(&mut self, id: ObjectId);

    /// The 24-character hex form of the document's id.
    fn id_hex(&self) -> String {
        self.id().to_hex()
    }

    /// Wrap this document as an `Object` field value, for embedding.
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Object(self.to_fields())
    }

    /// Populate this document from an `Object` field value. Any other kind
    /// leaves the document untouched.
    fn from_field_value(&mut self, value: &FieldValue) {
        if let FieldValue::Object(map) = value {
            self.from_fields(map);
        }
    }
}

/// Look up `key` and extract it as `T`.
///
/// Returns `None` when the key is absent, so callers can distinguish a
/// missing field from a present-but-mismatched one (which extracts to the
/// zero value as usual).
pub fn get_field<T: FromFieldValue>(fields: &FieldMap, key: &str) -> Option<T> {
    fields.get(key).map(T::from_field)
}

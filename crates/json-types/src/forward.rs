//! Forward conversion: FieldValue → JSON value.
//!
//! Dates render as ISO 8601 in UTC regardless of the host timezone, binary
//! payloads as standard padded base64, ObjectIds as their 24-hex-character
//! canonical form. Kinds with no JSON representation map to null.

use base64::Engine;
use serde_json::{json, Value};

use field_core::FieldValue;

/// Wrapper for JSON values produced from a `FieldValue`.
#[derive(Debug, Clone)]
pub struct JsonValue(pub Value);

impl JsonValue {
    /// Get the inner JSON value.
    pub fn into_inner(self) -> Value {
        self.0
    }

    /// Get a reference to the inner JSON value.
    pub fn as_inner(&self) -> &Value {
        &self.0
    }
}

impl From<&FieldValue> for JsonValue {
    fn from(fv: &FieldValue) -> Self {
        JsonValue(field_to_json(fv))
    }
}

impl From<FieldValue> for JsonValue {
    fn from(fv: FieldValue) -> Self {
        JsonValue(field_to_json(&fv))
    }
}

/// Convert a `FieldValue` tree to a JSON value tree.
pub fn field_to_json(fv: &FieldValue) -> Value {
    match fv {
        FieldValue::Array(items) => Value::Array(items.iter().map(field_to_json).collect()),
        FieldValue::Object(map) => {
            let mut obj = serde_json::Map::new();
            for (key, value) in map {
                obj.insert(key.clone(), field_to_json(value));
            }
            Value::Object(obj)
        }
        FieldValue::Boolean(b) => json!(*b),
        FieldValue::Int32(i) => json!(*i),
        FieldValue::Int64(i) => json!(*i),
        FieldValue::Double(f) => json!(*f),
        // String-payload kinds all render as the plain string.
        FieldValue::String(s)
        | FieldValue::Code(s)
        | FieldValue::Symbol(s)
        | FieldValue::RegExpr(s) => json!(s),
        FieldValue::ObjectId(oid) => json!(oid.to_hex()),
        FieldValue::Date(dt) => {
            // UTC breakdown, never the host timezone.
            json!(dt.to_chrono().format("%Y-%m-%dT%H:%M:%SZ").to_string())
        }
        FieldValue::Timestamp(ts) => json!({
            "timestamp": ts.time,
            "increment": ts.increment,
        }),
        FieldValue::Binary(bytes) => {
            json!(base64::engine::general_purpose::STANDARD.encode(bytes))
        }
        FieldValue::Null
        | FieldValue::Undefined
        | FieldValue::Decimal128
        | FieldValue::MaxKey
        | FieldValue::MinKey => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::oid::ObjectId;
    use chrono::{TimeZone, Utc};
    use field_core::FieldMap;

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(field_to_json(&FieldValue::Boolean(true)), json!(true));
        assert_eq!(field_to_json(&FieldValue::Int32(42)), json!(42));
        assert_eq!(
            field_to_json(&FieldValue::Int64(9_876_543_210)),
            json!(9_876_543_210i64)
        );
        assert_eq!(field_to_json(&FieldValue::Double(1.5)), json!(1.5));
        assert_eq!(
            field_to_json(&FieldValue::String("hi".to_string())),
            json!("hi")
        );
        assert_eq!(field_to_json(&FieldValue::Null), Value::Null);
    }

    #[test]
    fn test_object_id_renders_as_hex_string() {
        let oid = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        assert_eq!(
            field_to_json(&FieldValue::ObjectId(oid)),
            json!("507f1f77bcf86cd799439011")
        );
    }

    #[test]
    fn test_date_renders_as_utc_iso8601() {
        let dt = bson::DateTime::from_chrono(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());
        assert_eq!(
            field_to_json(&FieldValue::Date(dt)),
            json!("2024-01-15T10:30:00Z")
        );
    }

    #[test]
    fn test_timestamp_renders_as_object() {
        let ts = bson::Timestamp {
            time: 1_700_000_000,
            increment: 5,
        };
        assert_eq!(
            field_to_json(&FieldValue::Timestamp(ts)),
            json!({"timestamp": 1_700_000_000u32, "increment": 5u32})
        );
    }

    #[test]
    fn test_binary_renders_as_standard_base64() {
        assert_eq!(field_to_json(&FieldValue::binary(Vec::new())), json!(""));
        assert_eq!(
            field_to_json(&FieldValue::binary(vec![0x00])),
            json!("AA==")
        );
        assert_eq!(
            field_to_json(&FieldValue::binary(b"Hello, GridFS!".to_vec())),
            json!("SGVsbG8sIEdyaWRGUyE=")
        );
    }

    #[test]
    fn test_string_payload_kinds_render_as_strings() {
        assert_eq!(
            field_to_json(&FieldValue::Code("function() {}".to_string())),
            json!("function() {}")
        );
        assert_eq!(
            field_to_json(&FieldValue::Symbol("sym".to_string())),
            json!("sym")
        );
        assert_eq!(
            field_to_json(&FieldValue::RegExpr("^a.*$".to_string())),
            json!("^a.*$")
        );
    }

    #[test]
    fn test_kinds_without_json_form_map_to_null() {
        assert_eq!(field_to_json(&FieldValue::Undefined), Value::Null);
        assert_eq!(field_to_json(&FieldValue::Decimal128), Value::Null);
        assert_eq!(field_to_json(&FieldValue::MaxKey), Value::Null);
        assert_eq!(field_to_json(&FieldValue::MinKey), Value::Null);
    }

    #[test]
    fn test_nested_tree_conversion() {
        let mut leaf = FieldMap::new();
        leaf.insert("n".to_string(), FieldValue::Int32(1));

        let mut root = FieldMap::new();
        root.insert(
            "items".to_string(),
            FieldValue::Array(vec![
                FieldValue::Object(leaf),
                FieldValue::String("x".to_string()),
            ]),
        );

        let value = field_to_json(&FieldValue::Object(root));
        assert_eq!(value["items"][0]["n"], json!(1));
        assert_eq!(value["items"][1], json!("x"));
    }

    #[test]
    fn test_wrapper_round_trip() {
        let jv: JsonValue = FieldValue::from("wrapped").into();
        assert_eq!(jv.into_inner(), json!("wrapped"));
    }
}

//! A fluent interface for building update documents.

use bson_types::forward::fields_to_document;
use field_core::{FieldMap, FieldValue};

/// Bitwise operation applied by [`Update::bit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitOp {
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Bitwise XOR.
    Xor,
}

impl BitOp {
    fn as_str(self) -> &'static str {
        match self {
            BitOp::And => "and",
            BitOp::Or => "or",
            BitOp::Xor => "xor",
        }
    }
}

/// Which end of an array [`Update::pop`] removes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopFrom {
    /// Remove the first element (-1).
    First,
    /// Remove the last element (1).
    Last,
}

impl PopFrom {
    fn as_i32(self) -> i32 {
        match self {
            PopFrom::First => -1,
            PopFrom::Last => 1,
        }
    }
}

/// An update document under construction.
///
/// Repeated calls for the same operator merge into a single operator
/// sub-document, so `set("a", 1).set("b", 2)` produces one `$set` stage
/// with both fields.
#[derive(Debug, Clone, Default)]
pub struct Update {
    operators: FieldMap,
}

impl Update {
    /// An empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `$set` operation.
    pub fn set(self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.operator_field("$set", field, value.into())
    }

    /// Add a `$push` operation.
    pub fn push(self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.operator_field("$push", field, value.into())
    }

    /// Add a `$push` operation with an `$each` modifier.
    pub fn push_each<T: Into<FieldValue>>(
        self,
        field: impl Into<String>,
        values: Vec<T>,
    ) -> Self {
        self.operator_field("$push", field, each_modifier(values))
    }

    /// Add a `$pull` operation.
    pub fn pull(self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.operator_field("$pull", field, value.into())
    }

    /// Add a `$pull` operation with an `$each` modifier.
    pub fn pull_each<T: Into<FieldValue>>(
        self,
        field: impl Into<String>,
        values: Vec<T>,
    ) -> Self {
        self.operator_field("$pull", field, each_modifier(values))
    }

    /// Add a `$pullAll` operation removing every instance of the given
    /// values from an array field.
    pub fn pull_all<T: Into<FieldValue>>(
        self,
        field: impl Into<String>,
        values: Vec<T>,
    ) -> Self {
        let values = FieldValue::Array(values.into_iter().map(Into::into).collect());
        self.operator_field("$pullAll", field, values)
    }

    /// Add an `$addToSet` operation.
    pub fn add_to_set(self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.operator_field("$addToSet", field, value.into())
    }

    /// Add a `$bit` operation performing a bitwise update.
    pub fn bit(self, field: impl Into<String>, op: BitOp, value: i32) -> Self {
        let mut bit_op = FieldMap::new();
        bit_op.insert(op.as_str().to_string(), FieldValue::Int32(value));
        self.operator_field("$bit", field, FieldValue::Object(bit_op))
    }

    /// Add an `$inc` operation.
    pub fn inc(self, field: impl Into<String>, amount: impl Into<FieldValue>) -> Self {
        self.operator_field("$inc", field, amount.into())
    }

    /// Add a `$mul` operation.
    pub fn mul(self, field: impl Into<String>, amount: impl Into<FieldValue>) -> Self {
        self.operator_field("$mul", field, amount.into())
    }

    /// Add a `$min` operation, updating the field only if the new value is
    /// less than the current one.
    pub fn min(self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.operator_field("$min", field, value.into())
    }

    /// Add a `$max` operation, updating the field only if the new value is
    /// greater than the current one.
    pub fn max(self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.operator_field("$max", field, value.into())
    }

    /// Add a `$pop` operation removing the first or last array element.
    pub fn pop(self, field: impl Into<String>, from: PopFrom) -> Self {
        self.operator_field("$pop", field, FieldValue::Int32(from.as_i32()))
    }

    /// Add a `$rename` operation.
    pub fn rename(self, old_name: impl Into<String>, new_name: impl Into<String>) -> Self {
        self.operator_field("$rename", old_name, FieldValue::String(new_name.into()))
    }

    /// Add a `$currentDate` operation. When `as_timestamp` is true the
    /// field is set to a timestamp instead of a date.
    pub fn current_date(self, field: impl Into<String>, as_timestamp: bool) -> Self {
        self.operator_field("$currentDate", field, FieldValue::Boolean(as_timestamp))
    }

    /// Add an `$unset` operation removing the field.
    pub fn unset(self, field: impl Into<String>) -> Self {
        self.operator_field("$unset", field, FieldValue::String(String::new()))
    }

    /// The accumulated operator map.
    pub fn fields(&self) -> &FieldMap {
        &self.operators
    }

    /// Render the update as a BSON document.
    pub fn to_document(&self) -> bson::Document {
        fields_to_document(&self.operators)
    }

    fn operator_field(mut self, op: &str, field: impl Into<String>, value: FieldValue) -> Self {
        let entry = self
            .operators
            .entry(op.to_string())
            .or_insert_with(|| FieldValue::Object(FieldMap::new()));
        if let FieldValue::Object(map) = entry {
            map.insert(field.into(), value);
        }
        self
    }
}

fn each_modifier<T: Into<FieldValue>>(values: Vec<T>) -> FieldValue {
    let mut each = FieldMap::new();
    each.insert(
        "$each".to_string(),
        FieldValue::Array(values.into_iter().map(Into::into).collect()),
    );
    FieldValue::Object(each)
}

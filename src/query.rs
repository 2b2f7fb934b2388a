//! A fluent interface for building query filters.
//!
//! Conditions accumulate in a field map and only become BSON when the
//! collection sends them to the driver, so no BSON is built by hand.

use bson::oid::ObjectId;
use bson_types::forward::fields_to_document;
use field_core::{FieldMap, FieldValue};

use crate::error::Result;

/// A query filter under construction.
///
/// ```
/// use quickdb::Query;
///
/// let query = Query::new().eq("status", "active").gt("age", 21);
/// assert_eq!(query.fields().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Query {
    filters: FieldMap,
}

impl Query {
    /// An empty query, matching every document.
    pub fn new() -> Self {
        Self::default()
    }

    /// A query matching the document with the given ObjectId.
    pub fn by_id(id: ObjectId) -> Self {
        Self::new().eq("_id", id)
    }

    /// A query matching the document whose ObjectId has the given hex
    /// representation.
    pub fn by_hex(id_hex: &str) -> Result<Self> {
        Ok(Self::by_id(ObjectId::parse_str(id_hex)?))
    }

    /// Add an equality condition.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }

    /// Add a "not equal" (`$ne`) condition.
    pub fn ne(self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.operator_condition(field, "$ne", value.into())
    }

    /// Add a "greater than" (`$gt`) condition.
    pub fn gt(self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.operator_condition(field, "$gt", value.into())
    }

    /// Add a "greater than or equal" (`$gte`) condition.
    pub fn gte(self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.operator_condition(field, "$gte", value.into())
    }

    /// Add a "less than" (`$lt`) condition.
    pub fn lt(self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.operator_condition(field, "$lt", value.into())
    }

    /// Add a "less than or equal" (`$lte`) condition.
    pub fn lte(self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.operator_condition(field, "$lte", value.into())
    }

    /// Add an "in" (`$in`) condition over a set of candidate values.
    pub fn is_in<T: Into<FieldValue>>(self, field: impl Into<String>, values: Vec<T>) -> Self {
        let candidates = FieldValue::Array(values.into_iter().map(Into::into).collect());
        self.operator_condition(field, "$in", candidates)
    }

    /// The accumulated filter map.
    pub fn fields(&self) -> &FieldMap {
        &self.filters
    }

    /// Render the filter as a BSON document.
    pub fn to_document(&self) -> bson::Document {
        fields_to_document(&self.filters)
    }

    fn operator_condition(
        mut self,
        field: impl Into<String>,
        op: &str,
        value: FieldValue,
    ) -> Self {
        let mut condition = FieldMap::new();
        condition.insert(op.to_string(), value);
        self.filters
            .insert(field.into(), FieldValue::Object(condition));
        self
    }
}

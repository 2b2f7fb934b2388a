//! A fluent interface for building aggregation pipelines.

use bson::{doc, Document};
use bson_types::forward::fields_to_document;
use field_core::{FieldMap, FieldValue};

use crate::query::Query;

/// A helper for building BSON documents for aggregation stages.
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    fields: FieldMap,
}

impl DocumentBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a nested document as a field.
    pub fn document(mut self, key: impl Into<String>, builder: DocumentBuilder) -> Self {
        self.fields
            .insert(key.into(), FieldValue::Object(builder.fields));
        self
    }

    /// Build the BSON document from the added fields.
    pub fn build(&self) -> Document {
        fields_to_document(&self.fields)
    }
}

/// An aggregation pipeline under construction.
///
/// Each stage method appends one complete stage document, in call order;
/// the finished pipeline feeds `Collection::aggregate`.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    stages: Vec<Document>,
}

impl Aggregation {
    /// An empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `$match` stage from a query filter.
    pub fn match_stage(mut self, query: &Query) -> Self {
        self.stages.push(doc! { "$match": query.to_document() });
        self
    }

    /// Add a `$group` stage.
    pub fn group(mut self, group_doc: &DocumentBuilder) -> Self {
        self.stages.push(doc! { "$group": group_doc.build() });
        self
    }

    /// Add a `$project` stage.
    pub fn project(mut self, project_doc: &DocumentBuilder) -> Self {
        self.stages.push(doc! { "$project": project_doc.build() });
        self
    }

    /// Add a `$sort` stage.
    pub fn sort(mut self, sort_doc: &DocumentBuilder) -> Self {
        self.stages.push(doc! { "$sort": sort_doc.build() });
        self
    }

    /// Add a `$lookup` (left outer join) stage.
    pub fn lookup(
        mut self,
        from: impl Into<String>,
        local_field: impl Into<String>,
        foreign_field: impl Into<String>,
        as_field: impl Into<String>,
    ) -> Self {
        self.stages.push(doc! {
            "$lookup": {
                "from": from.into(),
                "localField": local_field.into(),
                "foreignField": foreign_field.into(),
                "as": as_field.into(),
            }
        });
        self
    }

    /// Add an `$unwind` stage deconstructing an array field. The field is
    /// given as a path, e.g. `"$items"`.
    pub fn unwind(mut self, field: impl Into<String>) -> Self {
        self.stages
            .push(doc! { "$unwind": { "path": field.into() } });
        self
    }

    /// Add a `$limit` stage.
    pub fn limit(mut self, limit: i64) -> Self {
        self.stages.push(doc! { "$limit": limit });
        self
    }

    /// Add a `$skip` stage.
    pub fn skip(mut self, skip: i64) -> Self {
        self.stages.push(doc! { "$skip": skip });
        self
    }

    /// Add a `$count` stage writing the count into the named output field.
    pub fn count(mut self, output_field: impl Into<String>) -> Self {
        self.stages.push(doc! { "$count": output_field.into() });
        self
    }

    /// The accumulated pipeline stages.
    pub fn pipeline(&self) -> &[Document] {
        &self.stages
    }

    /// Consume the builder, yielding the pipeline for the driver.
    pub fn into_pipeline(self) -> Vec<Document> {
        self.stages
    }
}

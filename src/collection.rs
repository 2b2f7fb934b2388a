//! A type-safe wrapper around a driver collection handle.

use std::marker::PhantomData;

use bson::{Bson, Document as BsonDocument};
use futures::TryStreamExt;
use mongodb::{ClientSession, IndexModel};

use bson_types::forward::fields_to_document;
use bson_types::reverse::bson_to_field;
use field_core::{Document, FieldMap};

use crate::aggregation::Aggregation;
use crate::error::{Error, Result};
use crate::options::{FindAndModifyOptions, FindOptions, UpdateOptions};
use crate::query::Query;
use crate::update::Update;

/// A typed handle to a collection of `T` documents.
///
/// Every operation serializes through `Document::to_fields` /
/// `Document::from_fields` and forwards to the driver; the `_id` field is
/// owned by this layer, stripped out of the field map on reads and written
/// back into the document after inserts.
pub struct Collection<T: Document> {
    inner: mongodb::Collection<BsonDocument>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Document + Default> Collection<T> {
    pub(crate) fn new(inner: mongodb::Collection<BsonDocument>) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }

    /// The collection name.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    // --- create ---------------------------------------------------------

    /// Insert a single document, writing the assigned ObjectId back into
    /// it. Returns the number of documents inserted.
    pub async fn create_one(&self, doc: &mut T) -> Result<u64> {
        tracing::debug!(collection = self.name(), "inserting one document");
        let bson_doc = fields_to_document(&doc.to_fields());
        let result = self.inner.insert_one(bson_doc).await?;
        if let Bson::ObjectId(oid) = result.inserted_id {
            doc.set_id(oid);
        }
        Ok(1)
    }

    /// Insert a single document within a session.
    pub async fn create_one_with_session(
        &self,
        doc: &mut T,
        session: &mut ClientSession,
    ) -> Result<u64> {
        let bson_doc = fields_to_document(&doc.to_fields());
        let result = self.inner.insert_one(bson_doc).session(session).await?;
        if let Bson::ObjectId(oid) = result.inserted_id {
            doc.set_id(oid);
        }
        Ok(1)
    }

    /// Insert multiple documents, writing each assigned ObjectId back.
    /// Returns the number of documents inserted.
    pub async fn create_many(&self, docs: &mut [T]) -> Result<u64> {
        if docs.is_empty() {
            return Ok(0);
        }
        tracing::debug!(
            collection = self.name(),
            count = docs.len(),
            "inserting documents"
        );
        let bson_docs: Vec<BsonDocument> = docs
            .iter()
            .map(|doc| fields_to_document(&doc.to_fields()))
            .collect();
        let result = self.inner.insert_many(bson_docs).await?;
        for (index, id) in &result.inserted_ids {
            if let Bson::ObjectId(oid) = id {
                if let Some(doc) = docs.get_mut(*index) {
                    doc.set_id(*oid);
                }
            }
        }
        Ok(result.inserted_ids.len() as u64)
    }

    /// Insert multiple documents within a session.
    pub async fn create_many_with_session(
        &self,
        docs: &mut [T],
        session: &mut ClientSession,
    ) -> Result<u64> {
        if docs.is_empty() {
            return Ok(0);
        }
        let bson_docs: Vec<BsonDocument> = docs
            .iter()
            .map(|doc| fields_to_document(&doc.to_fields()))
            .collect();
        let result = self.inner.insert_many(bson_docs).session(session).await?;
        for (index, id) in &result.inserted_ids {
            if let Bson::ObjectId(oid) = id {
                if let Some(doc) = docs.get_mut(*index) {
                    doc.set_id(*oid);
                }
            }
        }
        Ok(result.inserted_ids.len() as u64)
    }

    // --- find -----------------------------------------------------------

    /// Find a single document matching the query.
    pub async fn find_one(&self, query: &Query) -> Result<Option<T>> {
        let found = self.inner.find_one(query.to_document()).await?;
        Ok(found.map(|doc| self.from_bson_doc(&doc)))
    }

    /// Find a single document with sort/projection/skip options.
    pub async fn find_one_with_options(
        &self,
        query: &Query,
        options: &FindOptions,
    ) -> Result<Option<T>> {
        let found = self
            .inner
            .find_one(query.to_document())
            .with_options(options.to_driver_find_one())
            .await?;
        Ok(found.map(|doc| self.from_bson_doc(&doc)))
    }

    /// Find a single document within a session.
    pub async fn find_one_with_session(
        &self,
        query: &Query,
        session: &mut ClientSession,
    ) -> Result<Option<T>> {
        let found = self
            .inner
            .find_one(query.to_document())
            .session(session)
            .await?;
        Ok(found.map(|doc| self.from_bson_doc(&doc)))
    }

    /// Find all documents matching the query.
    pub async fn find_many(&self, query: &Query) -> Result<Vec<T>> {
        let mut cursor = self.inner.find(query.to_document()).await?;
        let mut results = Vec::new();
        while let Some(doc) = cursor.try_next().await? {
            results.push(self.from_bson_doc(&doc));
        }
        Ok(results)
    }

    /// Find all documents matching the query, with sort/limit/skip options.
    pub async fn find_many_with_options(
        &self,
        query: &Query,
        options: &FindOptions,
    ) -> Result<Vec<T>> {
        let mut cursor = self
            .inner
            .find(query.to_document())
            .with_options(options.to_driver())
            .await?;
        let mut results = Vec::new();
        while let Some(doc) = cursor.try_next().await? {
            results.push(self.from_bson_doc(&doc));
        }
        Ok(results)
    }

    // --- update ---------------------------------------------------------

    /// Update a single document matching the filter. Returns the number of
    /// documents modified.
    pub async fn update_one(&self, filter: &Query, update: &Update) -> Result<u64> {
        self.update_one_with_options(filter, update, &UpdateOptions::new())
            .await
    }

    /// Update a single document with options (e.g. upsert).
    pub async fn update_one_with_options(
        &self,
        filter: &Query,
        update: &Update,
        options: &UpdateOptions,
    ) -> Result<u64> {
        tracing::debug!(collection = self.name(), "updating one document");
        let result = self
            .inner
            .update_one(filter.to_document(), update.to_document())
            .with_options(options.to_driver())
            .await?;
        Ok(result.modified_count)
    }

    /// Update a single document within a session.
    pub async fn update_one_with_session(
        &self,
        filter: &Query,
        update: &Update,
        session: &mut ClientSession,
    ) -> Result<u64> {
        let result = self
            .inner
            .update_one(filter.to_document(), update.to_document())
            .session(session)
            .await?;
        Ok(result.modified_count)
    }

    /// Update all documents matching the filter. Returns the number of
    /// documents modified.
    pub async fn update_many(&self, filter: &Query, update: &Update) -> Result<u64> {
        self.update_many_with_options(filter, update, &UpdateOptions::new())
            .await
    }

    /// Update all matching documents with options (e.g. upsert).
    pub async fn update_many_with_options(
        &self,
        filter: &Query,
        update: &Update,
        options: &UpdateOptions,
    ) -> Result<u64> {
        tracing::debug!(collection = self.name(), "updating documents");
        let result = self
            .inner
            .update_many(filter.to_document(), update.to_document())
            .with_options(options.to_driver())
            .await?;
        Ok(result.modified_count)
    }

    /// Update all matching documents within a session.
    pub async fn update_many_with_session(
        &self,
        filter: &Query,
        update: &Update,
        session: &mut ClientSession,
    ) -> Result<u64> {
        let result = self
            .inner
            .update_many(filter.to_document(), update.to_document())
            .session(session)
            .await?;
        Ok(result.modified_count)
    }

    // --- delete ---------------------------------------------------------

    /// Delete a single document matching the filter. Returns the number of
    /// documents deleted.
    pub async fn delete_one(&self, query: &Query) -> Result<u64> {
        tracing::debug!(collection = self.name(), "deleting one document");
        let result = self.inner.delete_one(query.to_document()).await?;
        Ok(result.deleted_count)
    }

    /// Delete a single document within a session.
    pub async fn delete_one_with_session(
        &self,
        query: &Query,
        session: &mut ClientSession,
    ) -> Result<u64> {
        let result = self
            .inner
            .delete_one(query.to_document())
            .session(session)
            .await?;
        Ok(result.deleted_count)
    }

    /// Delete all documents matching the filter. Returns the number of
    /// documents deleted.
    pub async fn delete_many(&self, query: &Query) -> Result<u64> {
        tracing::debug!(collection = self.name(), "deleting documents");
        let result = self.inner.delete_many(query.to_document()).await?;
        Ok(result.deleted_count)
    }

    /// Delete all matching documents within a session.
    pub async fn delete_many_with_session(
        &self,
        query: &Query,
        session: &mut ClientSession,
    ) -> Result<u64> {
        let result = self
            .inner
            .delete_many(query.to_document())
            .session(session)
            .await?;
        Ok(result.deleted_count)
    }

    // --- other reads ----------------------------------------------------

    /// Count the documents matching the filter.
    pub async fn count_documents(&self, query: &Query) -> Result<u64> {
        Ok(self.inner.count_documents(query.to_document()).await?)
    }

    /// Run an aggregation pipeline, deserializing results into `R`.
    ///
    /// `R` is the document type matching the pipeline's output shape,
    /// which is often not `T` once `$group` or `$project` stages are
    /// involved.
    pub async fn aggregate<R: Document + Default>(
        &self,
        aggregation: &Aggregation,
    ) -> Result<Vec<R>> {
        let mut cursor = self
            .inner
            .aggregate(aggregation.pipeline().to_vec())
            .await?;
        let mut results = Vec::new();
        while let Some(doc) = cursor.try_next().await? {
            results.push(deserialize_document::<R>(&doc));
        }
        Ok(results)
    }

    // --- find-and-modify ------------------------------------------------

    /// Atomically find one document and apply an update to it.
    pub async fn find_one_and_update(
        &self,
        query: &Query,
        update: &Update,
        options: &FindAndModifyOptions,
    ) -> Result<Option<T>> {
        let found = self
            .inner
            .find_one_and_update(query.to_document(), update.to_document())
            .with_options(options.to_driver_update())
            .await?;
        Ok(found.map(|doc| self.from_bson_doc(&doc)))
    }

    /// Atomically find one document and replace it.
    pub async fn find_one_and_replace(
        &self,
        query: &Query,
        replacement: &T,
        options: &FindAndModifyOptions,
    ) -> Result<Option<T>> {
        let replacement_doc = fields_to_document(&replacement.to_fields());
        let found = self
            .inner
            .find_one_and_replace(query.to_document(), replacement_doc)
            .with_options(options.to_driver_replace())
            .await?;
        Ok(found.map(|doc| self.from_bson_doc(&doc)))
    }

    /// Atomically find one document and delete it, returning it.
    pub async fn find_one_and_delete(
        &self,
        query: &Query,
        options: &FindAndModifyOptions,
    ) -> Result<Option<T>> {
        let found = self
            .inner
            .find_one_and_delete(query.to_document())
            .with_options(options.to_driver_delete())
            .await?;
        Ok(found.map(|doc| self.from_bson_doc(&doc)))
    }

    // --- index management -----------------------------------------------

    /// Create a single-field index. Returns the index name.
    pub async fn create_index(&self, field: &str, ascending: bool) -> Result<String> {
        let mut keys = BsonDocument::new();
        keys.insert(field, if ascending { 1 } else { -1 });
        let result = self
            .inner
            .create_index(IndexModel::builder().keys(keys).build())
            .await?;
        Ok(result.index_name)
    }

    /// Create a compound index over multiple fields, each with its own
    /// direction. Returns the index name.
    pub async fn create_compound_index(&self, fields: &[(String, bool)]) -> Result<String> {
        if fields.is_empty() {
            return Err(Error::Index(
                "cannot create a compound index with no fields".to_string(),
            ));
        }
        let mut keys = BsonDocument::new();
        for (field, ascending) in fields {
            keys.insert(field, if *ascending { 1 } else { -1 });
        }
        let result = self
            .inner
            .create_index(IndexModel::builder().keys(keys).build())
            .await?;
        Ok(result.index_name)
    }

    /// Create a text index over the given fields. Returns the index name.
    pub async fn create_text_index(&self, fields: &[String]) -> Result<String> {
        if fields.is_empty() {
            return Err(Error::Index(
                "cannot create a text index with no fields".to_string(),
            ));
        }
        let mut keys = BsonDocument::new();
        for field in fields {
            keys.insert(field, "text");
        }
        let result = self
            .inner
            .create_index(IndexModel::builder().keys(keys).build())
            .await?;
        Ok(result.index_name)
    }

    /// Drop a specific index by name.
    pub async fn drop_index(&self, index_name: &str) -> Result<()> {
        self.inner.drop_index(index_name).await?;
        Ok(())
    }

    /// List the names of all indexes on the collection.
    pub async fn list_index_names(&self) -> Result<Vec<String>> {
        Ok(self.inner.list_index_names().await?)
    }

    // --- internals ------------------------------------------------------

    fn from_bson_doc(&self, view: &BsonDocument) -> T {
        deserialize_document(view)
    }
}

/// Deserialize a wire document into `R`, routing an ObjectId-typed `_id`
/// to `set_id` and everything else through `from_fields`.
fn deserialize_document<R: Document + Default>(view: &BsonDocument) -> R {
    let mut doc = R::default();
    let mut fields = FieldMap::new();
    for (key, value) in view {
        if key == "_id" {
            if let Bson::ObjectId(oid) = value {
                doc.set_id(*oid);
                continue;
            }
        }
        fields.insert(key.clone(), bson_to_field(value));
    }
    doc.from_fields(&fields);
    doc
}

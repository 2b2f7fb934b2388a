//! Options for find, update and find-and-modify operations.
//!
//! Each type collects the commonly used knobs and converts into the
//! corresponding driver options struct when the operation runs.

use bson::Document;
use mongodb::options as driver;

use crate::aggregation::DocumentBuilder;

/// Options for find operations.
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    sort: Document,
    projection: Option<Document>,
    limit: Option<i64>,
    skip: Option<u64>,
}

impl FindOptions {
    /// Default options: no sort, no projection, no limit, no skip.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sort criterion (1 for ascending, -1 for descending). Repeated
    /// calls build a compound sort in call order.
    pub fn sort(mut self, key: impl Into<String>, direction: i32) -> Self {
        self.sort.insert(key.into(), direction);
        self
    }

    /// Cap the number of documents returned.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip this many documents before returning results.
    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Limit the fields returned in matching documents.
    pub fn projection(mut self, projection_doc: &DocumentBuilder) -> Self {
        self.projection = Some(projection_doc.build());
        self
    }

    pub(crate) fn to_driver(&self) -> driver::FindOptions {
        let mut opts = driver::FindOptions::default();
        if !self.sort.is_empty() {
            opts.sort = Some(self.sort.clone());
        }
        opts.projection = self.projection.clone();
        opts.limit = self.limit;
        opts.skip = self.skip;
        opts
    }

    pub(crate) fn to_driver_find_one(&self) -> driver::FindOneOptions {
        let mut opts = driver::FindOneOptions::default();
        if !self.sort.is_empty() {
            opts.sort = Some(self.sort.clone());
        }
        opts.projection = self.projection.clone();
        opts.skip = self.skip;
        opts
    }
}

/// Options for update operations.
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    upsert: Option<bool>,
}

impl UpdateOptions {
    /// Default options: no upsert.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new document when no document matches the filter.
    pub fn upsert(mut self, is_upsert: bool) -> Self {
        self.upsert = Some(is_upsert);
        self
    }

    pub(crate) fn to_driver(&self) -> driver::UpdateOptions {
        let mut opts = driver::UpdateOptions::default();
        opts.upsert = self.upsert;
        opts
    }
}

/// Whether a find-and-modify operation returns the document from before or
/// after the modification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnDocument {
    /// Return the document as it was before the modification.
    Before,
    /// Return the document after the modification.
    After,
}

/// Options for `find_one_and_update`, `find_one_and_replace` and
/// `find_one_and_delete`.
#[derive(Debug, Clone, Default)]
pub struct FindAndModifyOptions {
    sort: Document,
    projection: Document,
    upsert: Option<bool>,
    return_document: Option<ReturnDocument>,
}

impl FindAndModifyOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sort criterion; the first document in this order is modified.
    pub fn sort(mut self, key: impl Into<String>, direction: i32) -> Self {
        self.sort.insert(key.into(), direction);
        self
    }

    /// Include (1) or exclude (0) a field in the returned document.
    pub fn projection(mut self, field: impl Into<String>, include: i32) -> Self {
        self.projection.insert(field.into(), include);
        self
    }

    /// Insert a new document when no document matches the filter. Applies
    /// to update and replace, not delete.
    pub fn upsert(mut self, is_upsert: bool) -> Self {
        self.upsert = Some(is_upsert);
        self
    }

    /// Return the document from before or after the modification. Applies
    /// to update and replace, not delete.
    pub fn return_document(mut self, rd: ReturnDocument) -> Self {
        self.return_document = Some(rd);
        self
    }

    fn driver_return_document(&self) -> Option<driver::ReturnDocument> {
        self.return_document.map(|rd| match rd {
            ReturnDocument::Before => driver::ReturnDocument::Before,
            ReturnDocument::After => driver::ReturnDocument::After,
        })
    }

    fn sort_document(&self) -> Option<Document> {
        if self.sort.is_empty() {
            None
        } else {
            Some(self.sort.clone())
        }
    }

    fn projection_document(&self) -> Option<Document> {
        if self.projection.is_empty() {
            None
        } else {
            Some(self.projection.clone())
        }
    }

    pub(crate) fn to_driver_update(&self) -> driver::FindOneAndUpdateOptions {
        let mut opts = driver::FindOneAndUpdateOptions::default();
        opts.sort = self.sort_document();
        opts.projection = self.projection_document();
        opts.upsert = self.upsert;
        opts.return_document = self.driver_return_document();
        opts
    }

    pub(crate) fn to_driver_replace(&self) -> driver::FindOneAndReplaceOptions {
        let mut opts = driver::FindOneAndReplaceOptions::default();
        opts.sort = self.sort_document();
        opts.projection = self.projection_document();
        opts.upsert = self.upsert;
        opts.return_document = self.driver_return_document();
        opts
    }

    pub(crate) fn to_driver_delete(&self) -> driver::FindOneAndDeleteOptions {
        let mut opts = driver::FindOneAndDeleteOptions::default();
        opts.sort = self.sort_document();
        opts.projection = self.projection_document();
        opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn test_find_options_conversion() {
        let opts = FindOptions::new()
            .sort("age", -1)
            .sort("name", 1)
            .limit(10)
            .skip(5)
            .to_driver();
        assert_eq!(opts.sort, Some(doc! { "age": -1, "name": 1 }));
        assert_eq!(opts.limit, Some(10));
        assert_eq!(opts.skip, Some(5));
        assert!(opts.projection.is_none());
    }

    #[test]
    fn test_empty_find_options_leave_driver_defaults() {
        let opts = FindOptions::new().to_driver();
        assert!(opts.sort.is_none());
        assert!(opts.limit.is_none());
        assert!(opts.skip.is_none());
    }

    #[test]
    fn test_find_options_projection() {
        let opts = FindOptions::new()
            .projection(&DocumentBuilder::new().field("name", 1))
            .to_driver();
        assert_eq!(opts.projection, Some(doc! { "name": 1 }));
    }

    #[test]
    fn test_update_options_upsert() {
        assert_eq!(UpdateOptions::new().to_driver().upsert, None);
        assert_eq!(
            UpdateOptions::new().upsert(true).to_driver().upsert,
            Some(true)
        );
    }

    #[test]
    fn test_find_and_modify_conversion() {
        let opts = FindAndModifyOptions::new()
            .sort("created_at", -1)
            .projection("name", 1)
            .upsert(true)
            .return_document(ReturnDocument::After);

        let update_opts = opts.to_driver_update();
        assert_eq!(update_opts.sort, Some(doc! { "created_at": -1 }));
        assert_eq!(update_opts.projection, Some(doc! { "name": 1 }));
        assert_eq!(update_opts.upsert, Some(true));
        assert!(matches!(
            update_opts.return_document,
            Some(driver::ReturnDocument::After)
        ));

        let delete_opts = opts.to_driver_delete();
        assert_eq!(delete_opts.sort, Some(doc! { "created_at": -1 }));
        assert_eq!(delete_opts.projection, Some(doc! { "name": 1 }));
    }
}

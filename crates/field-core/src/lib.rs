//! Core field-value model for QuickDB.
//!
//! This crate defines `FieldValue`, the tagged value universe that documents
//! are serialized into before they are handed to a storage or display
//! bridge. Each conversion crate defines its own mapping FROM `FieldValue`
//! TO its target representation (BSON, JSON) in a sibling crate.
//!
//! # Modules
//!
//! - [`value`] - `FieldKind`, `FieldValue` and the `FieldMap` alias
//! - [`convert`] - wrapping native values and extracting them back out
//! - [`document`] - the `Document` trait implemented by application types

pub mod convert;
pub mod document;
pub mod value;

pub use bson::oid::ObjectId;
pub use convert::{FieldEnum, FromFieldValue};
pub use document::{get_field, Document};
pub use value::{FieldKind, FieldMap, FieldValue};

//! BSON wire conversions for the QuickDB field-value model.
//!
//! This crate provides bidirectional conversions between `FieldValue`
//! trees and the BSON documents the MongoDB driver puts on the wire.
//!
//! # Modules
//!
//! - [`forward`] - FieldValue → BSON value conversion
//! - [`reverse`] - BSON value → FieldValue conversion
//!
//! # Example
//!
//! ```ignore
//! use bson_types::forward::BsonValue;
//! use field_core::FieldValue;
//!
//! // Convert a FieldValue to a BSON value
//! let fv = FieldValue::from("hello");
//! let bson_val: BsonValue = fv.into();
//! ```

pub mod forward;
pub mod reverse;

pub use forward::{append_to_array, append_to_document, field_to_bson, fields_to_document, BsonValue};
pub use reverse::{bson_to_field, document_to_fields, extract_field};

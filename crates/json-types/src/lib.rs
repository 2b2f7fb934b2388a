//! JSON display conversions for the QuickDB field-value model.
//!
//! One direction only: `FieldValue` trees become JSON value trees for
//! debug printing and API responses. There is no JSON → FieldValue path.
//!
//! # Modules
//!
//! - [`forward`] - FieldValue → JSON value conversion

pub mod forward;

pub use forward::{field_to_json, JsonValue};

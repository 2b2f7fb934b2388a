//! QuickDB
//!
//! A type-safe convenience layer over the official MongoDB Rust driver.
//!
//! # Features
//!
//! - Typed documents: application types implement [`Document`] and move
//!   through a tagged [`FieldValue`] model instead of raw BSON
//! - Fluent builders: [`Query`], [`Update`] and [`Aggregation`] construct
//!   filter, update and pipeline documents without hand-written BSON
//! - Thin forwarding: every operation is a direct pass-through to the
//!   driver's wire client; no protocol or storage logic lives here
//! - GridFS and transactions: small wrappers over the driver's bucket and
//!   session APIs
//!
//! # Conversion crates
//!
//! The value model and its bridges live in dedicated crates:
//!
//! - `field-core` - `FieldKind`/`FieldValue`, wrap/extract, `Document`
//! - `bson-types` - FieldValue ↔ BSON wire conversion
//! - `json-types` - FieldValue → JSON display conversion
//!
//! # Example
//!
//! ```ignore
//! use quickdb::{Database, Query, Update};
//!
//! let db = Database::connect("mongodb://localhost:27017").await?;
//! let users = db.collection::<User>("app", "users");
//!
//! let mut user = User::new("Alice", 30);
//! users.create_one(&mut user).await?;
//!
//! users
//!     .update_one(&Query::by_id(user.id()), &Update::new().inc("age", 1))
//!     .await?;
//! ```

pub mod aggregation;
pub mod collection;
pub mod database;
pub mod error;
pub mod gridfs;
pub mod options;
pub mod query;
pub mod update;

pub use aggregation::{Aggregation, DocumentBuilder};
pub use collection::Collection;
pub use database::Database;
pub use error::{Error, Result};
pub use gridfs::GridFs;
pub use options::{FindAndModifyOptions, FindOptions, ReturnDocument, UpdateOptions};
pub use query::Query;
pub use update::{BitOp, PopFrom, Update};

// Re-export the field model so applications need only this crate.
pub use field_core::{
    get_field, Document, FieldEnum, FieldKind, FieldMap, FieldValue, FromFieldValue, ObjectId,
};

// Conversion crates, for callers that work with the bridges directly.
pub use bson_types;
pub use json_types;

// The wrapped driver and its BSON library.
pub use bson;
pub use mongodb;

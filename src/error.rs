//! Error types for the QuickDB layer.

use thiserror::Error;

/// Errors that can occur while talking to MongoDB through QuickDB.
#[derive(Error, Debug)]
pub enum Error {
    /// An error reported by the underlying MongoDB driver.
    #[error("MongoDB driver error: {0}")]
    Driver(#[from] mongodb::error::Error),

    /// An ObjectId string failed to parse.
    #[error("invalid ObjectId: {0}")]
    ObjectId(#[from] bson::oid::Error),

    /// Local file I/O failed during a GridFS transfer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Index creation was requested with invalid input.
    #[error("index error: {0}")]
    Index(String),

    /// GridFS returned something unexpected.
    #[error("GridFS error: {0}")]
    GridFs(String),

    /// A transaction was rolled back by its callback.
    #[error("transaction aborted: {0}")]
    Transaction(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

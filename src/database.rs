//! The database handle: client construction, collection and GridFS
//! factories, and the transaction helper.

use std::time::Duration;

use bson::Document as BsonDocument;
use futures::future::BoxFuture;
use mongodb::{options::ClientOptions, Client, ClientSession};

use field_core::Document;

use crate::collection::Collection;
use crate::error::Result;
use crate::gridfs::GridFs;

/// A handle to a MongoDB deployment.
///
/// The driver maintains its own connection pool per client, so one
/// `Database` per deployment is enough for a whole process; collection
/// handles borrow nothing and can be created freely.
pub struct Database {
    client: Client,
}

impl Database {
    /// Connect using a MongoDB URI string.
    pub async fn connect(uri: &str) -> Result<Self> {
        let mut options = ClientOptions::parse(uri).await?;
        // Bounded timeouts so a bad URI fails fast instead of hanging.
        options.connect_timeout = Some(Duration::from_secs(10));
        options.server_selection_timeout = Some(Duration::from_secs(10));
        let client = Client::with_options(options)?;
        tracing::info!("MongoDB client created");
        Ok(Self { client })
    }

    /// Connect with credentials, assembling the URI from its components.
    pub async fn with_credentials(
        user: &str,
        pass: &str,
        host: &str,
        port: u16,
        auth_db: &str,
        max_pool_size: u32,
    ) -> Result<Self> {
        let uri = format!(
            "mongodb://{user}:{pass}@{host}:{port}/?authSource={auth_db}&maxPoolSize={max_pool_size}"
        );
        Self::connect(&uri).await
    }

    /// Get a type-safe handle to a collection.
    pub fn collection<T: Document + Default>(
        &self,
        db_name: &str,
        collection_name: &str,
    ) -> Collection<T> {
        Collection::new(
            self.client
                .database(db_name)
                .collection::<BsonDocument>(collection_name),
        )
    }

    /// Get a GridFS handle for large file storage in the given database.
    pub fn gridfs(&self, db_name: &str) -> GridFs {
        GridFs::new(self.client.database(db_name).gridfs_bucket(None))
    }

    /// Start a client session, for use with the `*_with_session` collection
    /// operations.
    pub async fn start_session(&self) -> Result<ClientSession> {
        Ok(self.client.start_session().await?)
    }

    /// Run the given callback inside a transaction.
    ///
    /// `context` carries whatever the callback needs (typically references
    /// to collection handles); the callback must route every operation
    /// through the `*_with_session` collection methods. The transaction is
    /// committed when the callback returns `Ok` and aborted when it
    /// returns `Err`, in which case the error is passed back to the
    /// caller.
    pub async fn with_transaction<C, F>(&self, mut context: C, mut callback: F) -> Result<()>
    where
        F: for<'a> FnMut(&'a mut C, &'a mut ClientSession) -> BoxFuture<'a, Result<()>>,
    {
        let mut session = self.client.start_session().await?;
        session.start_transaction().await?;
        match callback(&mut context, &mut session).await {
            Ok(()) => {
                session.commit_transaction().await?;
                Ok(())
            }
            Err(err) => {
                tracing::debug!(error = %err, "aborting transaction");
                session.abort_transaction().await?;
                Err(err)
            }
        }
    }

    /// The underlying driver client, for operations this layer does not
    /// wrap.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

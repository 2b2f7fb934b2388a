//! GridFS wrapper for large file storage.
//!
//! Chunking and the fs.files/fs.chunks layout are owned by the server and
//! the driver; this wrapper only moves bytes between the local filesystem
//! and a bucket.

use std::path::Path;

use bson::{oid::ObjectId, Bson};
use futures::io::{AsyncReadExt, AsyncWriteExt};
use mongodb::gridfs::GridFsBucket;

use crate::error::{Error, Result};

/// A handle to a GridFS bucket.
pub struct GridFs {
    bucket: GridFsBucket,
}

impl GridFs {
    pub(crate) fn new(bucket: GridFsBucket) -> Self {
        Self { bucket }
    }

    /// Upload a local file under the given GridFS filename. Returns the
    /// ObjectId of the stored file.
    pub async fn upload_from_file(
        &self,
        filename: &str,
        source_path: impl AsRef<Path>,
    ) -> Result<ObjectId> {
        let contents = tokio::fs::read(source_path).await?;
        let mut upload = self.bucket.open_upload_stream(filename).await?;
        let id = upload
            .id()
            .as_object_id()
            .ok_or_else(|| Error::GridFs("upload stream id was not an ObjectId".to_string()))?;
        upload.write_all(&contents).await?;
        upload.close().await?;
        tracing::debug!(%filename, bytes = contents.len(), "uploaded file to GridFS");
        Ok(id)
    }

    /// Download a stored file to a local path.
    pub async fn download_to_file(
        &self,
        file_id: ObjectId,
        destination_path: impl AsRef<Path>,
    ) -> Result<()> {
        let mut download = self
            .bucket
            .open_download_stream(Bson::ObjectId(file_id))
            .await?;
        let mut contents = Vec::new();
        download.read_to_end(&mut contents).await?;
        tokio::fs::write(destination_path, &contents).await?;
        tracing::debug!(%file_id, bytes = contents.len(), "downloaded file from GridFS");
        Ok(())
    }

    /// Delete a stored file and its chunks.
    pub async fn delete(&self, file_id: ObjectId) -> Result<()> {
        self.bucket.delete(Bson::ObjectId(file_id)).await?;
        Ok(())
    }
}

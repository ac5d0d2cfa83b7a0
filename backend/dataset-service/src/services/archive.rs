/// Object-store archive of inserted batches
///
/// Each successful batch leaves one JSON document in the bucket, named after
/// the record it holds.
use crate::models::FullDataset;
use async_trait::async_trait;
use s3_utils::{S3Client, S3Config, S3Error};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("archive storage failed: {0}")]
    Storage(#[from] S3Error),
}

/// Object key for an archived record
pub fn archive_key(prefix: &str, name: &str) -> String {
    S3Config::object_key(prefix, &format!("{}.json", name))
}

#[async_trait]
pub trait DatasetArchive: Send + Sync {
    /// Store `record` as JSON and return the key it was written under
    async fn archive_record(&self, record: &FullDataset) -> Result<String, ArchiveError>;
}

/// S3-backed archive
#[derive(Clone)]
pub struct S3DatasetArchive {
    client: S3Client,
    prefix: String,
}

impl S3DatasetArchive {
    pub fn new(client: S3Client, prefix: impl Into<String>) -> Self {
        Self {
            client,
            prefix: prefix.into(),
        }
    }
}

#[async_trait]
impl DatasetArchive for S3DatasetArchive {
    async fn archive_record(&self, record: &FullDataset) -> Result<String, ArchiveError> {
        let key = archive_key(&self.prefix, &record.name);
        self.client.operations().put_json(&key, record).await?;

        tracing::debug!(
            bucket = %self.client.config().bucket,
            key = %key,
            "archived dataset record"
        );
        Ok(key)
    }
}

/// S3 object operations
use crate::config::S3Config;
use crate::S3Error;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone)]
pub struct S3Operations {
    client: Arc<Client>,
    config: S3Config,
}

impl S3Operations {
    pub fn new(client: Arc<Client>, config: S3Config) -> Self {
        Self { client, config }
    }

    /// Upload raw bytes to the configured bucket
    pub async fn upload_file(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), S3Error> {
        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| S3Error::Sdk(DisplayErrorContext(&e).to_string()))?;

        tracing::debug!(bucket = %self.config.bucket, key = %key, "uploaded object");
        Ok(())
    }

    /// Serialize `value` as JSON and upload it under `key`
    pub async fn put_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), S3Error> {
        let body = serde_json::to_vec(value)?;
        self.upload_file(key, body, "application/json").await
    }
}

use crate::domain::{
    errors::StorageResult,
    models::{Download, ObjectMetadata, UploadOptions, UploadSource},
    value_objects::{BucketName, Locator, ObjectKey},
};
use async_trait::async_trait;
use std::path::Path;

/// Port for the object storage façade
/// This trait defines the operations callers use to manage remote objects
#[async_trait]
pub trait ObjectService: Send + Sync + 'static {
    /// Upload a local file or in-memory bytes, replacing any existing object
    async fn upload(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        source: UploadSource,
        content_type: Option<&str>,
    ) -> StorageResult<Locator>;

    /// Upload with explicit content type and custom metadata tags
    async fn upload_with_options(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        source: UploadSource,
        options: UploadOptions,
    ) -> StorageResult<Locator>;

    /// Download into memory, or into `destination` when one is given
    async fn download(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        destination: Option<&Path>,
    ) -> StorageResult<Download>;

    /// List keys starting with `prefix`
    async fn list_objects(&self, bucket: &BucketName, prefix: &str) -> StorageResult<Vec<String>>;

    /// Fetch current metadata; fails with `ObjectNotFound` when absent
    async fn stat(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<ObjectMetadata>;

    /// Delete an object. Never fails: errors are logged and swallowed.
    async fn delete_object(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<()>;

    /// Delete an object, propagating backend failures
    async fn delete_object_strict(&self, bucket: &BucketName, key: &ObjectKey)
        -> StorageResult<()>;

    /// Copy an object, possibly across buckets
    async fn copy_object(
        &self,
        source_bucket: &BucketName,
        source_key: &ObjectKey,
        destination_bucket: &BucketName,
        destination_key: &ObjectKey,
    ) -> StorageResult<Locator>;

    /// Copy then delete the source. Not atomic: an interruption between the
    /// two steps leaves the object in both places.
    async fn move_object(
        &self,
        source_bucket: &BucketName,
        source_key: &ObjectKey,
        destination_bucket: &BucketName,
        destination_key: &ObjectKey,
    ) -> StorageResult<Locator>;
}

use crate::domain::{
    errors::StorageResult,
    models::{ObjectMetadata, UploadOptions},
    value_objects::{BucketName, ObjectRef, ProjectId},
};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

/// Chunked object body
pub type ByteStream = BoxStream<'static, StorageResult<Bytes>>;

/// Port for object storage operations
/// This abstracts the actual storage backend (GCS, S3, local disk, memory).
///
/// Every call takes the optional project the request runs under; `None`
/// means whatever default the backend's ambient configuration selects.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Scheme used when rendering locators (`gs`, `s3`, ...)
    fn scheme(&self) -> &'static str;

    /// Store object data, replacing any existing object
    async fn put_object(
        &self,
        project: Option<&ProjectId>,
        object: &ObjectRef,
        data: Bytes,
        options: &UploadOptions,
    ) -> StorageResult<()>;

    /// Retrieve the whole object body
    async fn get_object(&self, project: Option<&ProjectId>, object: &ObjectRef)
        -> StorageResult<Bytes>;

    /// Retrieve the object body as a stream of chunks
    async fn get_object_stream(
        &self,
        project: Option<&ProjectId>,
        object: &ObjectRef,
    ) -> StorageResult<ByteStream>;

    /// Fetch metadata, `None` when no object exists at the key
    async fn head_object(
        &self,
        project: Option<&ProjectId>,
        object: &ObjectRef,
    ) -> StorageResult<Option<ObjectMetadata>>;

    /// Delete object data
    async fn delete_object(&self, project: Option<&ProjectId>, object: &ObjectRef)
        -> StorageResult<()>;

    /// List keys in a bucket starting with `prefix`, in backend order
    async fn list_objects(
        &self,
        project: Option<&ProjectId>,
        bucket: &BucketName,
        prefix: &str,
    ) -> StorageResult<Vec<String>>;

    /// Copy an object to a new location
    async fn copy_object(
        &self,
        project: Option<&ProjectId>,
        source: &ObjectRef,
        destination: &ObjectRef,
    ) -> StorageResult<()>;
}

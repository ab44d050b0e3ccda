use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        models::{Download, ObjectMetadata, UploadOptions, UploadSource},
        value_objects::{BucketName, Locator, ObjectKey, ObjectRef, ProjectId},
    },
    ports::{
        services::ObjectService,
        storage::{ByteStream, ObjectStore},
    },
};

/// The object storage façade.
///
/// Holds no state besides the injected store and the project requests run
/// under, so clones are cheap and may be used from any task.
#[derive(Clone)]
pub struct ObjectServiceImpl {
    store: Arc<dyn ObjectStore>,
    project: Option<ProjectId>,
}

impl ObjectServiceImpl {
    /// Create a façade running under the backend's ambient default project
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            store,
            project: None,
        }
    }

    /// Same store, requests scoped to `project` (`None` = ambient default).
    ///
    /// The project is validated and passed to the client provider, but the
    /// GCS and S3 clients take their project from ambient credentials, so it
    /// does not change where requests are routed.
    pub fn with_project(&self, project: Option<ProjectId>) -> Self {
        Self {
            store: self.store.clone(),
            project,
        }
    }

    pub fn project(&self) -> Option<&ProjectId> {
        self.project.as_ref()
    }

    fn object(bucket: &BucketName, key: &ObjectKey) -> ObjectRef {
        ObjectRef::new(bucket.clone(), key.clone())
    }

    fn locator(&self, object: &ObjectRef) -> Locator {
        object.locator(self.store.scheme())
    }

    /// Download the whole object into memory
    pub async fn download_bytes(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<Bytes> {
        let object = Self::object(bucket, key);
        debug!(object = %object, "Downloading object to memory");
        self.store.get_object(self.project(), &object).await
    }

    /// Download the object into `destination`, creating parent directories.
    ///
    /// The body is streamed into a sibling temporary file that is renamed
    /// over `destination` only once complete.
    pub async fn download_to_file(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        destination: &Path,
    ) -> StorageResult<PathBuf> {
        let object = Self::object(bucket, key);
        let file_name = destination
            .file_name()
            .ok_or_else(|| StorageError::LocalIo {
                path: destination.display().to_string(),
                message: "destination has no file name".to_string(),
            })?
            .to_string_lossy()
            .into_owned();

        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| local_io(parent, e))?;
        }

        let stream = self.store.get_object_stream(self.project(), &object).await?;

        let partial = destination.with_file_name(format!(
            ".{}.{}.part",
            file_name,
            uuid::Uuid::new_v4().simple()
        ));
        if let Err(e) = write_stream(stream, &partial).await {
            remove_partial(&partial).await;
            return Err(e);
        }

        if let Err(e) = fs::rename(&partial, destination).await {
            remove_partial(&partial).await;
            return Err(local_io(destination, e));
        }

        info!(object = %object, path = %destination.display(), "Downloaded object to file");
        Ok(destination.to_path_buf())
    }
}

async fn write_stream(mut stream: ByteStream, path: &Path) -> StorageResult<()> {
    let mut file = fs::File::create(path).await.map_err(|e| local_io(path, e))?;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await.map_err(|e| local_io(path, e))?;
    }
    file.sync_all().await.map_err(|e| local_io(path, e))?;
    Ok(())
}

async fn remove_partial(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        debug!(path = %path.display(), error = %e, "No partial file to remove");
    }
}

fn local_io(path: &Path, err: std::io::Error) -> StorageError {
    StorageError::LocalIo {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

#[async_trait]
impl ObjectService for ObjectServiceImpl {
    async fn upload(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        source: UploadSource,
        content_type: Option<&str>,
    ) -> StorageResult<Locator> {
        let options = UploadOptions {
            content_type: content_type.map(str::to_string),
            ..Default::default()
        };
        self.upload_with_options(bucket, key, source, options).await
    }

    async fn upload_with_options(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        source: UploadSource,
        mut options: UploadOptions,
    ) -> StorageResult<Locator> {
        let object = Self::object(bucket, key);

        if options.content_type.is_none() {
            options.content_type = source.guess_content_type().map(str::to_string);
        }

        let data = match source {
            UploadSource::Bytes(data) => data,
            UploadSource::Path(path) => fs::read(&path)
                .await
                .map(Bytes::from)
                .map_err(|e| local_io(&path, e))?,
        };

        self.store
            .put_object(self.project(), &object, data, &options)
            .await?;

        let locator = self.locator(&object);
        info!(locator = %locator, "Uploaded object");
        Ok(locator)
    }

    async fn download(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        destination: Option<&Path>,
    ) -> StorageResult<Download> {
        match destination {
            Some(path) => self
                .download_to_file(bucket, key, path)
                .await
                .map(Download::File),
            None => self.download_bytes(bucket, key).await.map(Download::Bytes),
        }
    }

    async fn list_objects(&self, bucket: &BucketName, prefix: &str) -> StorageResult<Vec<String>> {
        let keys = self
            .store
            .list_objects(self.project(), bucket, prefix)
            .await?;
        debug!(bucket = %bucket, prefix, count = keys.len(), "Listed objects");
        Ok(keys)
    }

    async fn stat(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<ObjectMetadata> {
        let object = Self::object(bucket, key);
        self.store
            .head_object(self.project(), &object)
            .await?
            .ok_or_else(|| StorageError::ObjectNotFound {
                locator: self.locator(&object),
            })
    }

    async fn delete_object(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<()> {
        let object = Self::object(bucket, key);
        match self.store.delete_object(self.project(), &object).await {
            Ok(()) => info!(locator = %self.locator(&object), "Deleted object"),
            Err(e) if e.is_not_found() => {
                debug!(locator = %self.locator(&object), "Object already absent")
            }
            Err(e) => warn!(
                locator = %self.locator(&object),
                error = %e,
                "Ignoring delete failure"
            ),
        }
        Ok(())
    }

    async fn delete_object_strict(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
    ) -> StorageResult<()> {
        let object = Self::object(bucket, key);
        self.store.delete_object(self.project(), &object).await?;
        info!(locator = %self.locator(&object), "Deleted object");
        Ok(())
    }

    async fn copy_object(
        &self,
        source_bucket: &BucketName,
        source_key: &ObjectKey,
        destination_bucket: &BucketName,
        destination_key: &ObjectKey,
    ) -> StorageResult<Locator> {
        let source = Self::object(source_bucket, source_key);
        let destination = Self::object(destination_bucket, destination_key);

        self.store
            .copy_object(self.project(), &source, &destination)
            .await?;

        let locator = self.locator(&destination);
        info!(source = %self.locator(&source), destination = %locator, "Copied object");
        Ok(locator)
    }

    async fn move_object(
        &self,
        source_bucket: &BucketName,
        source_key: &ObjectKey,
        destination_bucket: &BucketName,
        destination_key: &ObjectKey,
    ) -> StorageResult<Locator> {
        let locator = self
            .copy_object(source_bucket, source_key, destination_bucket, destination_key)
            .await?;
        if source_bucket == destination_bucket && source_key == destination_key {
            return Ok(locator);
        }
        // The object now exists in both places until the delete lands.
        self.delete_object(source_bucket, source_key).await?;
        Ok(locator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::storage::{ApacheObjectStoreAdapter, InMemoryClientProvider};

    fn service() -> ObjectServiceImpl {
        let provider = Arc::new(InMemoryClientProvider::new());
        ObjectServiceImpl::new(Arc::new(ApacheObjectStoreAdapter::new(provider)))
    }

    fn bucket() -> BucketName {
        BucketName::new("unit-bucket").unwrap()
    }

    #[tokio::test]
    async fn test_upload_returns_locator() {
        let service = service();
        let key = ObjectKey::new("examples/hello.txt").unwrap();

        let locator = service
            .upload(&bucket(), &key, b"hi".to_vec().into(), Some("text/plain"))
            .await
            .unwrap();

        assert_eq!(locator.to_string(), "memory://unit-bucket/examples/hello.txt");
    }

    #[tokio::test]
    async fn test_with_project_shares_store() {
        let service = service();
        let key = ObjectKey::new("shared.txt").unwrap();
        service
            .upload(&bucket(), &key, b"x".to_vec().into(), None)
            .await
            .unwrap();

        let scoped = service.with_project(Some(ProjectId::new("learn-cloud-473302").unwrap()));
        assert_eq!(scoped.project().map(ProjectId::as_str), Some("learn-cloud-473302"));
        assert!(service.project().is_none());
        assert_eq!(
            scoped.download_bytes(&bucket(), &key).await.unwrap(),
            Bytes::from_static(b"x")
        );
    }

    #[tokio::test]
    async fn test_upload_from_path_guesses_content_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, b"{\"a\":1}").unwrap();

        let service = service();
        let key = ObjectKey::new("data.json").unwrap();
        service
            .upload(&bucket(), &key, UploadSource::Path(path), None)
            .await
            .unwrap();

        let meta = service.stat(&bucket(), &key).await.unwrap();
        assert_eq!(meta.content_type.as_deref(), Some("application/json"));
        assert_eq!(meta.size, 7);
    }

    #[tokio::test]
    async fn test_upload_missing_file_is_local_io_error() {
        let service = service();
        let key = ObjectKey::new("never.txt").unwrap();

        let err = service
            .upload(
                &bucket(),
                &key,
                UploadSource::Path(PathBuf::from("/definitely/not/here.txt")),
                None,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::LocalIo { .. }));
    }
}

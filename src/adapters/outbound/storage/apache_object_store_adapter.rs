use async_trait::async_trait;
use bytes::Bytes;
use futures::{StreamExt, TryStreamExt};
use object_store::{
    path::Path as ObjectPath, Attribute, AttributeValue, Attributes, GetOptions, GetResult,
    ObjectStore as ApacheObjectStore, PutOptions, PutPayload,
};
use std::{collections::HashMap, sync::Arc};
use tracing::debug;

use super::{
    client::ClientProvider,
    error::{map_object_error, StoreError},
};
use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        models::{ObjectMetadata, UploadOptions},
        value_objects::{BucketName, ObjectRef, ProjectId},
    },
    ports::storage::{ByteStream, ObjectStore},
};

/// Adapter that implements our ObjectStore port using Apache object_store
pub struct ApacheObjectStoreAdapter {
    clients: Arc<dyn ClientProvider>,
}

impl ApacheObjectStoreAdapter {
    pub fn new(clients: Arc<dyn ClientProvider>) -> Self {
        Self { clients }
    }

    fn client(
        &self,
        project: Option<&ProjectId>,
        bucket: &BucketName,
    ) -> StorageResult<Arc<dyn ApacheObjectStore>> {
        Ok(self.clients.client(project, bucket)?)
    }

    fn path(object: &ObjectRef) -> StorageResult<ObjectPath> {
        ObjectPath::parse(object.key.as_str()).map_err(|source| {
            StoreError::InvalidPath {
                key: object.key.to_string(),
                source,
            }
            .into()
        })
    }

    fn map_err(
        &self,
        operation: &'static str,
        object: &ObjectRef,
    ) -> impl FnOnce(object_store::Error) -> StorageError {
        let locator = object.locator(self.clients.scheme());
        move |e| map_object_error(e, operation, locator)
    }

    fn attributes(&self, options: &UploadOptions) -> Attributes {
        let mut attributes = Attributes::new();
        if !self.clients.supports_attributes() {
            return attributes;
        }

        if let Some(content_type) = &options.content_type {
            attributes.insert(
                Attribute::ContentType,
                AttributeValue::from(content_type.clone()),
            );
        }
        for (key, value) in &options.metadata {
            attributes.insert(
                Attribute::Metadata(key.clone().into()),
                AttributeValue::from(value.clone()),
            );
        }
        attributes
    }

    async fn put_with_attributes(
        &self,
        store: &dyn ApacheObjectStore,
        object: &ObjectRef,
        data: Bytes,
        attributes: Attributes,
    ) -> StorageResult<()> {
        let path = Self::path(object)?;
        let opts = PutOptions {
            attributes,
            ..Default::default()
        };

        store
            .put_opts(&path, PutPayload::from(data), opts)
            .await
            .map_err(self.map_err("put", object))?;
        Ok(())
    }

    fn metadata_from(bucket: &BucketName, result: &GetResult) -> ObjectMetadata {
        let meta = &result.meta;
        let mut metadata = ObjectMetadata::new(bucket.as_str(), meta.location.to_string(), meta.size);
        metadata.updated = Some(meta.last_modified);
        metadata.generation = meta.version.clone();
        metadata.etag = meta.e_tag.clone();

        let mut tags = HashMap::new();
        for (attribute, value) in result.attributes.iter() {
            match attribute {
                Attribute::ContentType => metadata.content_type = Some(value.to_string()),
                Attribute::Metadata(key) => {
                    tags.insert(key.to_string(), value.to_string());
                }
                _ => {}
            }
        }
        metadata.metadata = tags;
        metadata
    }
}

#[async_trait]
impl ObjectStore for ApacheObjectStoreAdapter {
    fn scheme(&self) -> &'static str {
        self.clients.scheme()
    }

    async fn put_object(
        &self,
        project: Option<&ProjectId>,
        object: &ObjectRef,
        data: Bytes,
        options: &UploadOptions,
    ) -> StorageResult<()> {
        debug!(object = %object, size = data.len(), "put_object");
        let store = self.client(project, &object.bucket)?;
        self.put_with_attributes(store.as_ref(), object, data, self.attributes(options))
            .await
    }

    async fn get_object(
        &self,
        project: Option<&ProjectId>,
        object: &ObjectRef,
    ) -> StorageResult<Bytes> {
        debug!(object = %object, "get_object");
        let store = self.client(project, &object.bucket)?;
        let path = Self::path(object)?;

        let result = store.get(&path).await.map_err(self.map_err("get", object))?;
        result.bytes().await.map_err(self.map_err("get", object))
    }

    async fn get_object_stream(
        &self,
        project: Option<&ProjectId>,
        object: &ObjectRef,
    ) -> StorageResult<ByteStream> {
        debug!(object = %object, "get_object_stream");
        let store = self.client(project, &object.bucket)?;
        let path = Self::path(object)?;

        let result = store.get(&path).await.map_err(self.map_err("get", object))?;
        let locator = object.locator(self.clients.scheme());
        let stream = result
            .into_stream()
            .map_err(move |e| map_object_error(e, "get", locator.clone()));
        Ok(stream.boxed())
    }

    async fn head_object(
        &self,
        project: Option<&ProjectId>,
        object: &ObjectRef,
    ) -> StorageResult<Option<ObjectMetadata>> {
        debug!(object = %object, "head_object");
        let store = self.client(project, &object.bucket)?;
        let path = Self::path(object)?;

        let options = GetOptions {
            head: true,
            ..Default::default()
        };
        match store.get_opts(&path, options).await {
            Ok(result) => Ok(Some(Self::metadata_from(&object.bucket, &result))),
            Err(object_store::Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(self.map_err("head", object)(e)),
        }
    }

    async fn delete_object(
        &self,
        project: Option<&ProjectId>,
        object: &ObjectRef,
    ) -> StorageResult<()> {
        debug!(object = %object, "delete_object");
        let store = self.client(project, &object.bucket)?;
        let path = Self::path(object)?;

        store
            .delete(&path)
            .await
            .map_err(self.map_err("delete", object))
    }

    async fn list_objects(
        &self,
        project: Option<&ProjectId>,
        bucket: &BucketName,
        prefix: &str,
    ) -> StorageResult<Vec<String>> {
        debug!(bucket = %bucket, prefix, "list_objects");
        let store = self.client(project, bucket)?;

        // object_store lists whole path segments, so list from the deepest
        // directory the prefix names and filter the rest by string prefix.
        let directory = prefix
            .rfind('/')
            .map(|idx| &prefix[..idx])
            .filter(|dir| !dir.is_empty())
            .and_then(|dir| ObjectPath::parse(dir).ok());

        let mut stream = store.list(directory.as_ref());
        let mut keys = Vec::new();

        while let Some(result) = stream.next().await {
            let meta = result.map_err(|e| StorageError::BackendError {
                operation: "list".to_string(),
                message: e.to_string(),
            })?;

            let key = meta.location.to_string();
            if key.starts_with(prefix) {
                keys.push(key);
            }
        }

        Ok(keys)
    }

    async fn copy_object(
        &self,
        project: Option<&ProjectId>,
        source: &ObjectRef,
        destination: &ObjectRef,
    ) -> StorageResult<()> {
        debug!(source = %source, destination = %destination, "copy_object");
        let source_store = self.client(project, &source.bucket)?;
        let source_path = Self::path(source)?;

        if source.bucket == destination.bucket {
            let dest_path = Self::path(destination)?;
            return source_store
                .copy(&source_path, &dest_path)
                .await
                .map_err(self.map_err("copy", source));
        }

        // Clients are bound to one bucket, so a cross-bucket copy goes
        // through the caller: read the source, write the destination.
        let result = source_store
            .get(&source_path)
            .await
            .map_err(self.map_err("copy", source))?;
        let attributes = if self.clients.supports_attributes() {
            result.attributes.clone()
        } else {
            Attributes::new()
        };
        let data = result.bytes().await.map_err(self.map_err("copy", source))?;

        let dest_store = self.client(project, &destination.bucket)?;
        self.put_with_attributes(dest_store.as_ref(), destination, data, attributes)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::storage::client::InMemoryClientProvider;
    use crate::domain::value_objects::ObjectKey;

    fn adapter() -> ApacheObjectStoreAdapter {
        ApacheObjectStoreAdapter::new(Arc::new(InMemoryClientProvider::new()))
    }

    fn object(bucket: &str, key: &str) -> ObjectRef {
        ObjectRef::new(BucketName::new(bucket).unwrap(), ObjectKey::new(key).unwrap())
    }

    #[tokio::test]
    async fn test_basic_object_operations() {
        let adapter = adapter();
        let obj = object("bucket", "test/key");
        let data = Bytes::from_static(b"test data");

        adapter
            .put_object(None, &obj, data.clone(), &UploadOptions::default())
            .await
            .unwrap();

        let retrieved = adapter.get_object(None, &obj).await.unwrap();
        assert_eq!(retrieved, data);

        let meta = adapter.head_object(None, &obj).await.unwrap().unwrap();
        assert_eq!(meta.size, data.len() as u64);
        assert_eq!(meta.name, "test/key");
        assert_eq!(meta.bucket, "bucket");
        assert!(meta.updated.is_some());

        adapter.delete_object(None, &obj).await.unwrap();
        assert!(adapter.head_object(None, &obj).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_head_reports_attributes() {
        let adapter = adapter();
        let obj = object("bucket", "report.csv");
        let options = UploadOptions::default()
            .with_content_type("text/csv")
            .with_metadata("owner", "analytics");

        adapter
            .put_object(None, &obj, Bytes::from_static(b"a,b\n"), &options)
            .await
            .unwrap();

        let meta = adapter.head_object(None, &obj).await.unwrap().unwrap();
        assert_eq!(meta.content_type.as_deref(), Some("text/csv"));
        assert_eq!(meta.metadata.get("owner").map(String::as_str), Some("analytics"));
    }

    #[tokio::test]
    async fn test_get_missing_object_is_not_found() {
        let adapter = adapter();
        let err = adapter
            .get_object(None, &object("bucket", "missing"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_uses_string_prefix() {
        let adapter = adapter();
        let bucket = BucketName::new("bucket").unwrap();
        for key in ["logs/2024-01.txt", "logs/2024-02.txt", "logs/2025-01.txt", "other"] {
            adapter
                .put_object(
                    None,
                    &object("bucket", key),
                    Bytes::from_static(b"x"),
                    &UploadOptions::default(),
                )
                .await
                .unwrap();
        }

        let keys = adapter
            .list_objects(None, &bucket, "logs/2024")
            .await
            .unwrap();
        assert_eq!(keys, vec!["logs/2024-01.txt", "logs/2024-02.txt"]);

        let all = adapter.list_objects(None, &bucket, "").await.unwrap();
        assert_eq!(all.len(), 4);
    }

    #[tokio::test]
    async fn test_stream_yields_whole_body() {
        let adapter = adapter();
        let obj = object("bucket", "stream.bin");
        let data = Bytes::from(vec![7u8; 4096]);
        adapter
            .put_object(None, &obj, data.clone(), &UploadOptions::default())
            .await
            .unwrap();

        let chunks: Vec<Bytes> = adapter
            .get_object_stream(None, &obj)
            .await
            .unwrap()
            .try_collect()
            .await
            .unwrap();
        assert_eq!(chunks.concat(), data.to_vec());
    }

    #[tokio::test]
    async fn test_cross_bucket_copy_keeps_attributes() {
        let adapter = adapter();
        let source = object("source-bucket", "a.json");
        let destination = object("dest-bucket", "b.json");
        let options = UploadOptions::default().with_content_type("application/json");

        adapter
            .put_object(None, &source, Bytes::from_static(b"{}"), &options)
            .await
            .unwrap();
        adapter
            .copy_object(None, &source, &destination)
            .await
            .unwrap();

        let meta = adapter
            .head_object(None, &destination)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(meta.content_type.as_deref(), Some("application/json"));
        assert_eq!(
            adapter.get_object(None, &destination).await.unwrap(),
            Bytes::from_static(b"{}")
        );
    }
}

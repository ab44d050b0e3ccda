use object_store::{
    aws::AmazonS3Builder, gcp::GoogleCloudStorageBuilder, local::LocalFileSystem,
    memory::InMemory, ObjectStore as ApacheObjectStore,
};
use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, Mutex},
};
use tracing::debug;

use super::error::StoreError;
use crate::domain::value_objects::{BucketName, ProjectId};

/// Hands out backend client handles.
///
/// A handle is requested for every operation. Implementations decide whether
/// that means building a fresh client or returning one they already own.
pub trait ClientProvider: Send + Sync + 'static {
    /// Scheme used when rendering locators for objects of this backend
    fn scheme(&self) -> &'static str;

    /// Whether the backend stores content type and custom metadata attributes
    fn supports_attributes(&self) -> bool {
        true
    }

    /// Client handle scoped to one bucket
    fn client(
        &self,
        project: Option<&ProjectId>,
        bucket: &BucketName,
    ) -> Result<Arc<dyn ApacheObjectStore>, StoreError>;
}

/// Builds a new client from ambient configuration on every call
#[derive(Debug, Clone, PartialEq)]
pub enum AmbientClientProvider {
    /// Google Cloud Storage; credentials from `GOOGLE_APPLICATION_CREDENTIALS`
    /// or the other variables `GoogleCloudStorageBuilder::from_env` reads
    Gcs,
    /// Amazon S3 (or compatible); credentials from the `AWS_*` environment
    S3,
    /// Local directory tree, one sub-directory per bucket
    Local { root: PathBuf },
}

impl ClientProvider for AmbientClientProvider {
    fn scheme(&self) -> &'static str {
        match self {
            AmbientClientProvider::Gcs => "gs",
            AmbientClientProvider::S3 => "s3",
            AmbientClientProvider::Local { .. } => "file",
        }
    }

    fn supports_attributes(&self) -> bool {
        !matches!(self, AmbientClientProvider::Local { .. })
    }

    fn client(
        &self,
        project: Option<&ProjectId>,
        bucket: &BucketName,
    ) -> Result<Arc<dyn ApacheObjectStore>, StoreError> {
        debug!(
            scheme = self.scheme(),
            bucket = %bucket,
            project = project.map(ProjectId::as_str),
            "Building storage client"
        );

        match self {
            AmbientClientProvider::Gcs => {
                let store = GoogleCloudStorageBuilder::from_env()
                    .with_bucket_name(bucket.as_str())
                    .build()
                    .map_err(|e| StoreError::Client {
                        backend: "gcs",
                        bucket: bucket.to_string(),
                        message: e.to_string(),
                    })?;
                Ok(Arc::new(store))
            }
            AmbientClientProvider::S3 => {
                let store = AmazonS3Builder::from_env()
                    .with_bucket_name(bucket.as_str())
                    .build()
                    .map_err(|e| StoreError::Client {
                        backend: "s3",
                        bucket: bucket.to_string(),
                        message: e.to_string(),
                    })?;
                Ok(Arc::new(store))
            }
            AmbientClientProvider::Local { root } => {
                let bucket_root = root.join(bucket.as_str());
                std::fs::create_dir_all(&bucket_root)?;
                let store = LocalFileSystem::new_with_prefix(&bucket_root)?;
                Ok(Arc::new(store))
            }
        }
    }
}

/// In-process buckets for tests and demos.
///
/// Buckets are created on first use and live as long as the provider, so the
/// caller owns their lifetime by owning the provider.
#[derive(Debug, Default)]
pub struct InMemoryClientProvider {
    buckets: Mutex<HashMap<BucketName, Arc<InMemory>>>,
}

impl InMemoryClientProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClientProvider for InMemoryClientProvider {
    fn scheme(&self) -> &'static str {
        "memory"
    }

    fn client(
        &self,
        _project: Option<&ProjectId>,
        bucket: &BucketName,
    ) -> Result<Arc<dyn ApacheObjectStore>, StoreError> {
        let mut buckets = self.buckets.lock().map_err(|e| StoreError::Client {
            backend: "memory",
            bucket: bucket.to_string(),
            message: e.to_string(),
        })?;

        let store = buckets
            .entry(bucket.clone())
            .or_insert_with(|| Arc::new(InMemory::new()))
            .clone();
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::{path::Path as ObjectPath, PutPayload};

    #[tokio::test]
    async fn test_in_memory_buckets_persist_between_calls() {
        let provider = InMemoryClientProvider::new();
        let bucket = BucketName::new("bucket-a").unwrap();
        let path = ObjectPath::from("k");

        provider
            .client(None, &bucket)
            .unwrap()
            .put(&path, PutPayload::from_static(b"v"))
            .await
            .unwrap();

        let data = provider
            .client(None, &bucket)
            .unwrap()
            .get(&path)
            .await
            .unwrap()
            .bytes()
            .await
            .unwrap();
        assert_eq!(data.as_ref(), b"v");
    }

    #[tokio::test]
    async fn test_in_memory_buckets_are_isolated() {
        let provider = InMemoryClientProvider::new();
        let path = ObjectPath::from("k");

        provider
            .client(None, &BucketName::new("bucket-a").unwrap())
            .unwrap()
            .put(&path, PutPayload::from_static(b"v"))
            .await
            .unwrap();

        let other = provider
            .client(None, &BucketName::new("bucket-b").unwrap())
            .unwrap();
        assert!(other.head(&path).await.is_err());
    }

    #[test]
    fn test_local_provider_creates_bucket_directory() {
        let dir = tempfile::tempdir().unwrap();
        let provider = AmbientClientProvider::Local {
            root: dir.path().to_path_buf(),
        };

        provider
            .client(None, &BucketName::new("local-bucket").unwrap())
            .unwrap();

        assert!(dir.path().join("local-bucket").is_dir());
        assert_eq!(provider.scheme(), "file");
        assert!(!provider.supports_attributes());
    }

    #[test]
    fn test_cloud_schemes() {
        assert_eq!(AmbientClientProvider::Gcs.scheme(), "gs");
        assert_eq!(AmbientClientProvider::S3.scheme(), "s3");
        assert!(AmbientClientProvider::Gcs.supports_attributes());
    }
}

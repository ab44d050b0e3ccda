use std::{path::PathBuf, sync::Arc};

use crate::{
    adapters::outbound::storage::{
        AmbientClientProvider, ApacheObjectStoreAdapter, ClientProvider, InMemoryClientProvider,
    },
    domain::value_objects::ProjectId,
    ports::storage::ObjectStore,
    services::ObjectServiceImpl,
};

/// Configuration for the application
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    pub project_id: Option<ProjectId>,
}

/// Storage backend configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub enum StorageBackend {
    #[default]
    InMemory,
    Gcs,
    S3,
    LocalFileSystem {
        root: PathBuf,
    },
}

impl StorageBackend {
    /// Parse a backend name as used by `STORAGE_BACKEND` and the CLI
    pub fn from_name(name: &str, local_root: Option<PathBuf>) -> Result<Self, AppError> {
        match name.to_ascii_lowercase().as_str() {
            "memory" | "in-memory" => Ok(StorageBackend::InMemory),
            "gcs" | "gs" => Ok(StorageBackend::Gcs),
            "s3" => Ok(StorageBackend::S3),
            "local" | "file" => {
                let root = local_root.ok_or_else(|| AppError::Configuration {
                    message: "local backend requires a storage root".to_string(),
                })?;
                Ok(StorageBackend::LocalFileSystem { root })
            }
            other => Err(AppError::Configuration {
                message: format!("Unknown storage backend: {}", other),
            }),
        }
    }
}

/// Application dependencies container
pub struct AppDependencies {
    pub client_provider: Arc<dyn ClientProvider>,
    pub object_store: Arc<dyn ObjectStore>,
}

/// Application builder for dependency injection
pub struct AppBuilder {
    config: AppConfig,
    client_provider: Option<Arc<dyn ClientProvider>>,
}

impl AppBuilder {
    /// Create a new application builder
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            client_provider: None,
        }
    }

    /// Configure the application with custom settings
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Configure storage backend
    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage_backend = backend;
        self
    }

    /// Run every request under `project` instead of the ambient default
    pub fn with_project(mut self, project: Option<ProjectId>) -> Self {
        self.config.project_id = project;
        self
    }

    /// Use a caller-supplied client provider instead of the configured backend
    pub fn with_client_provider(mut self, provider: Arc<dyn ClientProvider>) -> Self {
        self.client_provider = Some(provider);
        self
    }

    /// Build the application dependencies
    pub fn build_dependencies(&self) -> AppDependencies {
        let client_provider = self
            .client_provider
            .clone()
            .unwrap_or_else(|| self.create_client_provider());
        let object_store: Arc<dyn ObjectStore> =
            Arc::new(ApacheObjectStoreAdapter::new(client_provider.clone()));

        AppDependencies {
            client_provider,
            object_store,
        }
    }

    /// Build the façade
    pub fn build(self) -> ObjectServiceImpl {
        let deps = self.build_dependencies();
        ObjectServiceImpl::new(deps.object_store).with_project(self.config.project_id)
    }

    fn create_client_provider(&self) -> Arc<dyn ClientProvider> {
        match &self.config.storage_backend {
            StorageBackend::InMemory => Arc::new(InMemoryClientProvider::new()),
            StorageBackend::Gcs => Arc::new(AmbientClientProvider::Gcs),
            StorageBackend::S3 => Arc::new(AmbientClientProvider::S3),
            StorageBackend::LocalFileSystem { root } => {
                Arc::new(AmbientClientProvider::Local { root: root.clone() })
            }
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid project ID: {0}")]
    InvalidProject(#[from] crate::domain::errors::ValidationError),
}

/// Create an in-memory façade for testing and development
pub fn create_in_memory_app() -> ObjectServiceImpl {
    AppBuilder::new()
        .with_storage_backend(StorageBackend::InMemory)
        .build()
}

/// Create a Google Cloud Storage façade using ambient credentials
pub fn create_gcs_app(project_id: Option<ProjectId>) -> ObjectServiceImpl {
    AppBuilder::new()
        .with_storage_backend(StorageBackend::Gcs)
        .with_project(project_id)
        .build()
}

/// Read configuration from `STORAGE_BACKEND`, `LOCAL_STORAGE_ROOT` and
/// `GCP_PROJECT_ID`
pub fn config_from_env() -> Result<AppConfig, AppError> {
    let local_root = std::env::var("LOCAL_STORAGE_ROOT").ok().map(PathBuf::from);
    let storage_backend = match std::env::var("STORAGE_BACKEND") {
        Ok(name) => StorageBackend::from_name(&name, local_root)?,
        Err(_) => StorageBackend::InMemory,
    };

    let project_id = match std::env::var("GCP_PROJECT_ID") {
        Ok(value) if !value.is_empty() => Some(ProjectId::new(value)?),
        _ => None,
    };

    Ok(AppConfig {
        storage_backend,
        project_id,
    })
}

/// Create the façade from environment variables
pub fn create_app_from_env() -> Result<ObjectServiceImpl, AppError> {
    let config = config_from_env()?;
    Ok(AppBuilder::new().with_config(config).build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::value_objects::BucketName, ports::storage::ObjectStore};

    #[test]
    fn test_backend_from_name() {
        assert_eq!(
            StorageBackend::from_name("GCS", None).unwrap(),
            StorageBackend::Gcs
        );
        assert_eq!(
            StorageBackend::from_name("memory", None).unwrap(),
            StorageBackend::InMemory
        );
        assert_eq!(
            StorageBackend::from_name("local", Some(PathBuf::from("/data"))).unwrap(),
            StorageBackend::LocalFileSystem {
                root: PathBuf::from("/data")
            }
        );
        assert!(StorageBackend::from_name("local", None).is_err());
        assert!(StorageBackend::from_name("azure", None).is_err());
    }

    #[test]
    fn test_app_builder_uses_configured_backend() {
        let deps = AppBuilder::new()
            .with_storage_backend(StorageBackend::Gcs)
            .build_dependencies();
        assert_eq!(deps.object_store.scheme(), "gs");

        let deps = AppBuilder::new().build_dependencies();
        assert_eq!(deps.client_provider.scheme(), "memory");
    }

    #[test]
    fn test_app_builder_applies_project() {
        let project = ProjectId::new("learn-cloud-473302").unwrap();
        let service = create_gcs_app(Some(project.clone()));
        assert_eq!(service.project(), Some(&project));
    }

    #[tokio::test]
    async fn test_injected_provider_is_shared() {
        let provider: Arc<dyn ClientProvider> = Arc::new(InMemoryClientProvider::new());
        let bucket = BucketName::new("shared-bucket").unwrap();

        let first = AppBuilder::new()
            .with_client_provider(provider.clone())
            .build_dependencies();
        let second = AppBuilder::new()
            .with_client_provider(provider)
            .build_dependencies();

        let object = crate::domain::value_objects::ObjectRef::new(
            bucket.clone(),
            crate::domain::value_objects::ObjectKey::new("k").unwrap(),
        );
        first
            .object_store
            .put_object(None, &object, bytes::Bytes::from_static(b"v"), &Default::default())
            .await
            .unwrap();

        let keys = second
            .object_store
            .list_objects(None, &bucket, "")
            .await
            .unwrap();
        assert_eq!(keys, vec!["k"]);
    }
}

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - value objects, models and errors
pub use domain::{
    BucketName,
    Download,
    Locator,
    ObjectKey,
    ObjectMetadata,
    ObjectRef,
    ProjectId,
    StorageError,
    StorageResult,
    UploadOptions,
    UploadSource,
    ValidationError,
};

// Port types - interfaces for external systems
pub use ports::{ByteStream, ObjectService, ObjectStore};

// Service implementation - the façade
pub use services::ObjectServiceImpl;

// Application factory and configuration
pub use app::{
    config_from_env, create_app_from_env, create_gcs_app, create_in_memory_app, AppBuilder,
    AppConfig, AppDependencies, AppError, StorageBackend,
};

// Adapter types - infrastructure implementations
pub use adapters::outbound::storage::{
    AmbientClientProvider, ApacheObjectStoreAdapter, ClientProvider, InMemoryClientProvider,
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        create_in_memory_app, AppBuilder, BucketName, Download, ObjectKey, ObjectService,
        ObjectServiceImpl, ProjectId, StorageBackend, StorageError, UploadSource,
    };
}

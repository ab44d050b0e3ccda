use crate::domain::{
    errors::{StorageError, ValidationError},
    value_objects::Locator,
};
use std::io;
use thiserror::Error as ThisError;

/// Failures raised while building or addressing a backend client
#[derive(ThisError, Debug)]
pub enum StoreError {
    #[error("Object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    #[error("Invalid object path {key}: {source}")]
    InvalidPath {
        key: String,
        #[source]
        source: object_store::path::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Cannot build {backend} client for bucket {bucket}: {message}")]
    Client {
        backend: &'static str,
        bucket: String,
        message: String,
    },
}

/// Convert infrastructure StoreError to domain StorageError
impl From<StoreError> for StorageError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidPath { key, source } => {
                StorageError::Validation(ValidationError::UnsupportedObjectKey {
                    key,
                    reason: source.to_string(),
                })
            }
            StoreError::Client { .. } | StoreError::Io(_) => StorageError::Configuration {
                message: err.to_string(),
            },
            StoreError::ObjectStore(store_err) => StorageError::BackendError {
                operation: "client".to_string(),
                message: store_err.to_string(),
            },
        }
    }
}

/// Map a backend error for an operation on one object.
///
/// Not-found becomes `ObjectNotFound`; everything else keeps the backend's
/// message unchanged.
pub(crate) fn map_object_error(
    err: object_store::Error,
    operation: &str,
    locator: Locator,
) -> StorageError {
    match err {
        object_store::Error::NotFound { .. } => StorageError::ObjectNotFound { locator },
        other => StorageError::BackendError {
            operation: operation.to_string(),
            message: other.to_string(),
        },
    }
}

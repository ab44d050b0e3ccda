use super::ValidationError;
use crate::domain::value_objects::Locator;

/// Errors surfaced by façade operations
#[derive(Debug, Clone)]
pub enum StorageError {
    /// No object exists at the locator
    ObjectNotFound { locator: Locator },

    /// Any other failure reported by the backend, message kept verbatim
    BackendError { operation: String, message: String },

    /// A bucket, key or project value failed validation
    Validation(ValidationError),

    /// Reading or writing a local file failed
    LocalIo { path: String, message: String },

    /// The backend client could not be constructed
    Configuration { message: String },
}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::ObjectNotFound { .. })
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::ObjectNotFound { locator } => {
                write!(f, "Object not found: {}", locator)
            }
            StorageError::BackendError { operation, message } => {
                write!(f, "Storage backend error during {}: {}", operation, message)
            }
            StorageError::Validation(err) => {
                write!(f, "Validation error: {}", err)
            }
            StorageError::LocalIo { path, message } => {
                write!(f, "Local file error at {}: {}", path, message)
            }
            StorageError::Configuration { message } => {
                write!(f, "Storage client configuration error: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for StorageError {
    fn from(err: ValidationError) -> Self {
        StorageError::Validation(err)
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Validation errors for domain value objects
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    // ObjectKey validation errors
    EmptyObjectKey,
    ObjectKeyTooLong {
        actual: usize,
        max: usize,
    },
    InvalidObjectKeyCharacter(char),
    ObjectKeyStartsWithSlash,
    ObjectKeyContainsDoubleSlash,
    ObjectKeyEndsWithSlash,
    ObjectKeyRelativeSegment,
    UnsupportedObjectKey {
        key: String,
        reason: String,
    },

    // BucketName validation errors
    BucketNameTooShort {
        actual: usize,
        min: usize,
    },
    BucketNameTooLong {
        actual: usize,
        max: usize,
    },
    BucketNameInvalidStart,
    BucketNameInvalidEnd,
    BucketNameInvalidCharacter(char),
    BucketNameConsecutiveDots,
    BucketNameLooksLikeIpAddress,

    // ProjectId validation errors
    ProjectIdInvalidLength {
        actual: usize,
        min: usize,
        max: usize,
    },
    ProjectIdInvalidStart,
    ProjectIdInvalidEnd,
    ProjectIdInvalidCharacter(char),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ObjectKey errors
            ValidationError::EmptyObjectKey => write!(f, "Object key cannot be empty"),
            ValidationError::ObjectKeyTooLong { actual, max } => {
                write!(f, "Object key too long: {} bytes (max: {})", actual, max)
            }
            ValidationError::InvalidObjectKeyCharacter(c) => {
                write!(f, "Invalid character in object key: {:?}", c)
            }
            ValidationError::ObjectKeyStartsWithSlash => {
                write!(f, "Object key cannot start with '/'")
            }
            ValidationError::ObjectKeyContainsDoubleSlash => {
                write!(f, "Object key cannot contain '//'")
            }
            ValidationError::ObjectKeyEndsWithSlash => {
                write!(f, "Object key cannot end with '/'")
            }
            ValidationError::ObjectKeyRelativeSegment => {
                write!(f, "Object key cannot contain '.' or '..' segments")
            }
            ValidationError::UnsupportedObjectKey { key, reason } => {
                write!(f, "Object key '{}' not supported by backend: {}", key, reason)
            }

            // BucketName errors
            ValidationError::BucketNameTooShort { actual, min } => {
                write!(
                    f,
                    "Bucket name too short: {} characters (min: {})",
                    actual, min
                )
            }
            ValidationError::BucketNameTooLong { actual, max } => {
                write!(
                    f,
                    "Bucket name too long: {} characters (max: {})",
                    actual, max
                )
            }
            ValidationError::BucketNameInvalidStart => {
                write!(f, "Bucket name must start with lowercase letter or number")
            }
            ValidationError::BucketNameInvalidEnd => {
                write!(f, "Bucket name must end with lowercase letter or number")
            }
            ValidationError::BucketNameInvalidCharacter(c) => {
                write!(
                    f,
                    "Invalid character in bucket name: '{}'. Only lowercase letters, numbers, '-', '_' and '.' allowed",
                    c
                )
            }
            ValidationError::BucketNameConsecutiveDots => {
                write!(f, "Bucket name cannot contain consecutive dots")
            }
            ValidationError::BucketNameLooksLikeIpAddress => {
                write!(f, "Bucket name cannot be formatted as an IP address")
            }

            // ProjectId errors
            ValidationError::ProjectIdInvalidLength { actual, min, max } => {
                write!(
                    f,
                    "Project ID must be {}-{} characters, got {}",
                    min, max, actual
                )
            }
            ValidationError::ProjectIdInvalidStart => {
                write!(f, "Project ID must start with a lowercase letter")
            }
            ValidationError::ProjectIdInvalidEnd => {
                write!(f, "Project ID cannot end with a hyphen")
            }
            ValidationError::ProjectIdInvalidCharacter(c) => {
                write!(f, "Invalid character in project ID: '{}'", c)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

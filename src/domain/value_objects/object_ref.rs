use super::{BucketName, Locator, ObjectKey};

/// A (bucket, key) pair naming one remote object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    pub bucket: BucketName,
    pub key: ObjectKey,
}

impl ObjectRef {
    pub fn new(bucket: BucketName, key: ObjectKey) -> Self {
        Self { bucket, key }
    }

    pub fn locator(&self, scheme: &'static str) -> Locator {
        Locator::new(scheme, &self.bucket, &self.key)
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

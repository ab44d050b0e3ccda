use super::{BucketName, ObjectKey};

/// Human-readable `scheme://bucket/key` identifier of an object.
///
/// Locators are returned for display and logging; nothing in this crate
/// parses them back.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    scheme: &'static str,
    bucket: BucketName,
    key: ObjectKey,
}

impl Locator {
    pub fn new(scheme: &'static str, bucket: &BucketName, key: &ObjectKey) -> Self {
        Self {
            scheme,
            bucket: bucket.clone(),
            key: key.clone(),
        }
    }

    pub fn scheme(&self) -> &'static str {
        self.scheme
    }

    pub fn bucket(&self) -> &BucketName {
        &self.bucket
    }

    pub fn key(&self) -> &ObjectKey {
        &self.key
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}://{}/{}", self.scheme, self.bucket, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_format() {
        let bucket = BucketName::new("tungtran-bucket").unwrap();
        let key = ObjectKey::new("examples/hello.txt").unwrap();
        let locator = Locator::new("gs", &bucket, &key);

        assert_eq!(locator.to_string(), "gs://tungtran-bucket/examples/hello.txt");
        assert_eq!(locator.key(), &key);
    }
}

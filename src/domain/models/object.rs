use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Read-only snapshot of an object's metadata as reported by the backend.
///
/// `bucket`, `name` and `size` are always known; everything else is
/// whatever the backend chose to report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectMetadata {
    pub bucket: String,
    pub name: String,
    pub size: u64,
    pub content_type: Option<String>,
    pub updated: Option<DateTime<Utc>>,
    pub generation: Option<String>,
    pub etag: Option<String>,
    pub md5_hash: Option<String>,
    pub crc32c: Option<String>,
    pub storage_class: Option<String>,
    pub kms_key_name: Option<String>,
    pub custom_time: Option<DateTime<Utc>>,
    pub metadata: HashMap<String, String>,
}

impl ObjectMetadata {
    /// Metadata with only the identity fields filled in
    pub fn new(bucket: impl Into<String>, name: impl Into<String>, size: u64) -> Self {
        Self {
            bucket: bucket.into(),
            name: name.into(),
            size,
            content_type: None,
            updated: None,
            generation: None,
            etag: None,
            md5_hash: None,
            crc32c: None,
            storage_class: None,
            kms_key_name: None,
            custom_time: None,
            metadata: HashMap::new(),
        }
    }
}

/// Optional settings applied to an uploaded object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadOptions {
    pub content_type: Option<String>,
    pub metadata: HashMap<String, String>,
}

impl UploadOptions {
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Where upload content comes from
#[derive(Debug, Clone)]
pub enum UploadSource {
    Path(PathBuf),
    Bytes(Bytes),
}

impl UploadSource {
    /// Content type implied by the source's file extension, if any
    pub fn guess_content_type(&self) -> Option<&'static str> {
        match self {
            UploadSource::Path(path) => guess_content_type(path),
            UploadSource::Bytes(_) => None,
        }
    }
}

impl From<Vec<u8>> for UploadSource {
    fn from(data: Vec<u8>) -> Self {
        UploadSource::Bytes(Bytes::from(data))
    }
}

impl From<Bytes> for UploadSource {
    fn from(data: Bytes) -> Self {
        UploadSource::Bytes(data)
    }
}

impl From<&'static [u8]> for UploadSource {
    fn from(data: &'static [u8]) -> Self {
        UploadSource::Bytes(Bytes::from_static(data))
    }
}

impl From<PathBuf> for UploadSource {
    fn from(path: PathBuf) -> Self {
        UploadSource::Path(path)
    }
}

impl From<&Path> for UploadSource {
    fn from(path: &Path) -> Self {
        UploadSource::Path(path.to_path_buf())
    }
}

/// Result of a download: the object body or the file it was written to
#[derive(Debug, Clone, PartialEq)]
pub enum Download {
    Bytes(Bytes),
    File(PathBuf),
}

impl Download {
    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            Download::Bytes(data) => Some(data),
            Download::File(_) => None,
        }
    }

    pub fn into_path(self) -> Option<PathBuf> {
        match self {
            Download::File(path) => Some(path),
            Download::Bytes(_) => None,
        }
    }
}

fn guess_content_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "txt" | "log" => "text/plain",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "text/javascript",
        "md" => "text/markdown",
        "json" => "application/json",
        "xml" => "application/xml",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "tar" => "application/x-tar",
        "parquet" => "application/vnd.apache.parquet",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "mp3" => "audio/mpeg",
        _ => return None,
    };
    Some(mime)
}

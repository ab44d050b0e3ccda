mod bucket_name;
mod locator;
mod object_key;
mod object_ref;
mod project_id;

pub use bucket_name::BucketName;
pub use locator::Locator;
pub use object_key::ObjectKey;
pub use object_ref::ObjectRef;
pub use project_id::ProjectId;

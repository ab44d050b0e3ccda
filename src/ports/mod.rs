pub mod services;
pub mod storage;

// Re-export all port traits for convenience
pub use services::ObjectService;
pub use storage::{ByteStream, ObjectStore};

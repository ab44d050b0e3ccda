// Infrastructure error types
pub mod error;

// Client construction and the port implementation
pub mod apache_object_store_adapter;
pub mod client;

// Re-export key types
pub use apache_object_store_adapter::ApacheObjectStoreAdapter;
pub use client::{AmbientClientProvider, ClientProvider, InMemoryClientProvider};
pub use error::StoreError;

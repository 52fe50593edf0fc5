//! Storage provider implementations.

#[cfg(feature = "cloud")]
pub mod blob;
pub mod local;
#[cfg(any(test, feature = "memory"))]
pub mod memory;

#[cfg(feature = "cloud")]
pub use blob::BlobStorageProvider;
pub use local::LocalStorageProvider;
#[cfg(any(test, feature = "memory"))]
pub use memory::MemoryStorageProvider;

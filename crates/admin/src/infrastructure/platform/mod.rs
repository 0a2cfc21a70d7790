//! Platform-specific implementations of the storage port
//!
//! `FileStorageProvider` is what the admin binary runs with;
//! `MemoryStorageProvider` backs tests and throwaway sessions.

mod file;
mod memory;

pub use file::FileStorageProvider;
pub use memory::MemoryStorageProvider;

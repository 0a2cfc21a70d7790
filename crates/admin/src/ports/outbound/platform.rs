//! Platform abstraction ports
//!
//! These traits abstract platform-specific operations so that:
//! 1. Application code (draft store, wizard) remains platform-agnostic
//! 2. Platform-specific code is isolated in infrastructure
//! 3. Code becomes easily testable with mock implementations

/// Persistent key/value storage (file-based on desktop, in-memory in tests)
///
/// Implementations never fail loudly: I/O problems are logged and a failed
/// `load` is indistinguishable from a missing key.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait StorageProvider: Send + Sync {
    /// Save a string value with the given key
    fn save(&self, key: &str, value: &str);

    /// Load a string value by key, returns None if not found
    fn load(&self, key: &str) -> Option<String>;

    /// Remove a value by key
    fn remove(&self, key: &str);
}

/// Storage key constants
///
/// These are kept in the ports layer as they define the contract for
/// what keys are used across the application.
pub mod storage_keys {
    pub const DRAFT_PREFIX: &str = "backoffice_draft_";

    /// Key under which the draft for an entity type is persisted
    pub fn draft(entity_type: &str) -> String {
        format!("{}{}", DRAFT_PREFIX, entity_type)
    }
}

//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing application services to interact with external systems without
//! depending on concrete implementations.

pub mod entity_port;
pub mod media_port;
pub mod navigation_port;
pub mod platform;

pub use entity_port::{CreateError, CreatedEntity, EntityCreatePort};
pub use media_port::{MediaUploadPort, UploadError, UploadedMedia};
pub use navigation_port::NavigationPort;
pub use platform::{storage_keys, StorageProvider};

#[cfg(any(test, feature = "testing"))]
pub use entity_port::MockEntityCreatePort;
#[cfg(any(test, feature = "testing"))]
pub use media_port::MockMediaUploadPort;
#[cfg(any(test, feature = "testing"))]
pub use navigation_port::MockNavigationPort;
#[cfg(any(test, feature = "testing"))]
pub use platform::MockStorageProvider;

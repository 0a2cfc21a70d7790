//! Media Upload Port - single-file uploads to the back-office media library
//!
//! Note: uses `async_trait` instead of returning `Pin<Box<dyn Future>>` for
//! better mockall compatibility.

use async_trait::async_trait;
use backoffice_domain::{MediaId, UploadFile, UploadOptions};
use thiserror::Error;

/// Media stored by the upload collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMedia {
    pub id: MediaId,
    /// Public URL, when the backend returns one
    pub url: Option<String>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UploadError {
    /// The request never produced a response (connection, timeout, ...)
    #[error("Upload failed: {0}")]
    Transport(String),

    /// The backend refused the file
    #[error("Upload rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The response did not carry a usable media identifier
    #[error("Invalid upload response: {0}")]
    InvalidResponse(String),
}

/// Port for uploading one file at a time
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait MediaUploadPort: Send + Sync {
    /// Upload a single file
    ///
    /// # Arguments
    /// * `file` - The in-memory file chosen by the user
    /// * `options` - Entity type and slot the media is destined for
    async fn upload(
        &self,
        file: UploadFile,
        options: UploadOptions,
    ) -> Result<UploadedMedia, UploadError>;
}

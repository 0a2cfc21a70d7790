//! Media attached to wizard drafts.
//!
//! Images picked in the wizard are held as [`UploadFile`]s until the final
//! submit. They are not `Serialize`: only the identifiers
//! returned by the upload collaborator ever reach persistent storage.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Named image slot on an entity draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaSlot {
    Cover,
    Banner,
}

impl MediaSlot {
    /// Field name of the slot's resolved identifier in create payloads
    pub fn id_field(self) -> &'static str {
        match self {
            MediaSlot::Cover => "coverImageId",
            MediaSlot::Banner => "bannerImageId",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MediaSlot::Cover => "cover",
            MediaSlot::Banner => "banner",
        }
    }
}

impl fmt::Display for MediaSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An in-memory file chosen by the user and not yet uploaded
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Payloads can be megabytes; keep them out of logs and test failure output.
impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Extra information passed along with an upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOptions {
    /// Entity type the media will be attached to (e.g. "series")
    pub entity_type: &'static str,
    pub slot: MediaSlot,
}

//! The contract every entity draft fulfils to be driven by the wizard engine.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::DomainError;
use crate::ids::MediaId;
use crate::media::{MediaSlot, UploadFile};

/// A partially-filled entity under construction.
///
/// Serialization must skip transient upload files; everything else is
/// persisted by the draft store between sessions.
pub trait WizardDraft: Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Storage key and API resource name (e.g. "series")
    const ENTITY_TYPE: &'static str;

    /// Partial update produced by a single form edit
    type Patch;

    /// Shallow-merge a patch: every field present in the patch replaces the
    /// draft's value, absent fields are left alone.
    fn apply_patch(&mut self, patch: Self::Patch);

    /// Image slots this entity carries, in upload order
    fn media_slots() -> &'static [MediaSlot] {
        &[]
    }

    /// File picked for a slot and not yet uploaded
    fn pending_upload(&self, _slot: MediaSlot) -> Option<&UploadFile> {
        None
    }

    /// Identifier already resolved for a slot
    fn media_id(&self, _slot: MediaSlot) -> Option<&MediaId> {
        None
    }

    /// Replace a slot's transient file with the identifier returned by the
    /// upload collaborator.
    fn resolve_media(&mut self, _slot: MediaSlot, _id: MediaId) {}

    /// Drop every transient file
    fn clear_transient(&mut self) {}

    /// Build the body sent to the create collaborator. Fails if any slot still
    /// holds an unresolved file.
    fn create_payload(&self) -> Result<Value, DomainError>;
}

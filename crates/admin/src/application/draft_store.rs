//! Draft Store - keeps the in-progress wizard draft across reloads
//!
//! The draft is written through to the platform [`StorageProvider`] on every
//! change, wrapped in a small versioned envelope. Anything that cannot be
//! read back (unparsable JSON, another format version, another entity type)
//! is treated as "no draft": it is logged, removed, and replaced by defaults.

use std::sync::Arc;

use backoffice_domain::WizardDraft;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ports::outbound::{storage_keys, StorageProvider};

/// Bump when the persisted envelope or a draft's shape changes incompatibly
pub const DRAFT_FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DraftEnvelopeRef<'a, D> {
    version: u32,
    entity_type: &'a str,
    saved_at: DateTime<Utc>,
    draft: &'a D,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DraftEnvelope<D> {
    version: u32,
    entity_type: String,
    saved_at: DateTime<Utc>,
    draft: D,
}

/// Single-writer store for one entity type's draft
pub struct DraftStore<D: WizardDraft> {
    storage: Arc<dyn StorageProvider>,
    key: String,
    draft: D,
    saved_at: Option<DateTime<Utc>>,
}

impl<D: WizardDraft> DraftStore<D> {
    /// Open the store for `D::ENTITY_TYPE`, loading any persisted draft.
    pub fn open(storage: Arc<dyn StorageProvider>) -> Self {
        let mut store = Self {
            storage,
            key: storage_keys::draft(D::ENTITY_TYPE),
            draft: D::default(),
            saved_at: None,
        };
        store.load();
        store
    }

    /// Re-read the persisted draft, or fall back to defaults.
    ///
    /// Transient files held in memory are dropped, exactly as on a page reload.
    pub fn load(&mut self) -> &D {
        match self.read() {
            Some(envelope) => {
                self.draft = envelope.draft;
                self.saved_at = Some(envelope.saved_at);
            }
            None => {
                self.draft = D::default();
                self.saved_at = None;
            }
        }
        &self.draft
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    /// When the draft was last written, if it has ever been
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        self.saved_at
    }

    /// Shallow-merge a patch into the draft and persist immediately.
    pub fn patch(&mut self, patch: D::Patch) -> &D {
        self.draft.apply_patch(patch);
        self.persist();
        &self.draft
    }

    /// Mutate the draft in place and persist immediately.
    pub fn update(&mut self, change: impl FnOnce(&mut D)) -> &D {
        change(&mut self.draft);
        self.persist();
        &self.draft
    }

    /// Forget the draft, both in memory and in storage.
    pub fn clear(&mut self) {
        self.storage.remove(&self.key);
        self.draft = D::default();
        self.saved_at = None;
        tracing::debug!(entity_type = D::ENTITY_TYPE, "Draft cleared");
    }

    fn read(&self) -> Option<DraftEnvelope<D>> {
        let raw = self.storage.load(&self.key)?;

        let envelope = match serde_json::from_str::<DraftEnvelope<D>>(&raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(
                    entity_type = D::ENTITY_TYPE,
                    error = %e,
                    "Discarding unreadable draft"
                );
                self.storage.remove(&self.key);
                return None;
            }
        };

        if envelope.version != DRAFT_FORMAT_VERSION || envelope.entity_type != D::ENTITY_TYPE {
            tracing::warn!(
                entity_type = D::ENTITY_TYPE,
                stored_entity_type = %envelope.entity_type,
                stored_version = envelope.version,
                "Discarding stale draft"
            );
            self.storage.remove(&self.key);
            return None;
        }

        Some(envelope)
    }

    fn persist(&mut self) {
        let saved_at = Utc::now();
        let envelope = DraftEnvelopeRef {
            version: DRAFT_FORMAT_VERSION,
            entity_type: D::ENTITY_TYPE,
            saved_at,
            draft: &self.draft,
        };

        match serde_json::to_string(&envelope) {
            Ok(data) => {
                self.storage.save(&self.key, &data);
                self.saved_at = Some(saved_at);
            }
            Err(e) => {
                tracing::error!(
                    entity_type = D::ENTITY_TYPE,
                    error = %e,
                    "Failed to serialize draft"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::platform::MemoryStorageProvider;
    use crate::ports::outbound::MockStorageProvider;
    use backoffice_domain::{
        MediaId, SeriesDraft, SeriesDraftPatch, SeriesFormat, SeriesTitle, SeriesType,
        UploadFile,
    };

    fn memory() -> Arc<MemoryStorageProvider> {
        Arc::new(MemoryStorageProvider::new())
    }

    fn title_patch(romaji: &str) -> SeriesDraftPatch {
        SeriesDraftPatch {
            title: Some(SeriesTitle {
                romaji: romaji.to_string(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn missing_draft_loads_defaults() {
        let store = DraftStore::<SeriesDraft>::open(memory());
        assert_eq!(store.draft(), &SeriesDraft::default());
        assert!(store.saved_at().is_none());
    }

    #[test]
    fn patch_writes_through_and_survives_reopen() {
        let storage = memory();
        let mut store = DraftStore::<SeriesDraft>::open(storage.clone());

        store.patch(title_patch("Kino no Tabi"));
        store.patch(SeriesDraftPatch {
            series_type: Some(Some(SeriesType::Anime)),
            format: Some(Some(SeriesFormat::Tv)),
            banner_image_id: Some(Some(MediaId::new("existing-id").unwrap())),
            ..Default::default()
        });

        let reopened = DraftStore::<SeriesDraft>::open(storage);
        assert_eq!(reopened.draft(), store.draft());
        assert_eq!(reopened.draft().title.romaji, "Kino no Tabi");
        assert!(reopened.saved_at().is_some());
    }

    #[test]
    fn transient_files_never_come_back_from_storage() {
        let storage = memory();
        let mut store = DraftStore::<SeriesDraft>::open(storage.clone());
        store.patch(SeriesDraftPatch {
            cover_image_file: Some(Some(UploadFile::new("c.png", "image/png", vec![9; 16]))),
            ..Default::default()
        });
        assert!(store.draft().cover_image_file.is_some());

        let reloaded = store.load().clone();
        assert!(reloaded.cover_image_file.is_none());
        assert!(DraftStore::<SeriesDraft>::open(storage)
            .draft()
            .cover_image_file
            .is_none());
    }

    #[test]
    fn clear_removes_persisted_draft() {
        let storage = memory();
        let mut store = DraftStore::<SeriesDraft>::open(storage.clone());
        store.patch(title_patch("Haibane Renmei"));

        store.clear();

        assert_eq!(store.draft(), &SeriesDraft::default());
        assert!(storage.load(&storage_keys::draft("series")).is_none());
        assert_eq!(
            DraftStore::<SeriesDraft>::open(storage).draft(),
            &SeriesDraft::default()
        );
    }

    #[test]
    fn corrupt_draft_is_treated_as_absent_and_removed() {
        let mut storage = MockStorageProvider::new();
        storage
            .expect_load()
            .withf(|key| key == "backoffice_draft_series")
            .returning(|_| Some("{not json".to_string()));
        storage
            .expect_remove()
            .withf(|key| key == "backoffice_draft_series")
            .times(1)
            .return_const(());

        let store = DraftStore::<SeriesDraft>::open(Arc::new(storage));

        assert_eq!(store.draft(), &SeriesDraft::default());
    }

    #[test]
    fn stale_version_is_discarded() {
        let storage = memory();
        storage.save(
            &storage_keys::draft("series"),
            r#"{"version":0,"entityType":"series","savedAt":"2026-01-01T00:00:00Z","draft":{"title":{"romaji":"Old"}}}"#,
        );

        let store = DraftStore::<SeriesDraft>::open(storage.clone());

        assert_eq!(store.draft().title.romaji, "");
        assert!(storage.load(&storage_keys::draft("series")).is_none());
    }

    #[test]
    fn envelope_for_another_entity_type_is_discarded() {
        let storage = memory();
        storage.save(
            &storage_keys::draft("series"),
            r#"{"version":1,"entityType":"character","savedAt":"2026-01-01T00:00:00Z","draft":{"title":{"romaji":"Other"}}}"#,
        );

        let store = DraftStore::<SeriesDraft>::open(storage.clone());

        assert_eq!(store.draft(), &SeriesDraft::default());
        assert!(store.saved_at().is_none());
        assert!(storage.load(&storage_keys::draft("series")).is_none());
    }

    #[test]
    fn current_envelope_is_accepted() {
        let storage = memory();
        storage.save(
            &storage_keys::draft("series"),
            r#"{"version":1,"entityType":"series","savedAt":"2026-01-01T00:00:00Z","draft":{"title":{"romaji":"Aria"}}}"#,
        );

        let store = DraftStore::<SeriesDraft>::open(storage);

        assert_eq!(store.draft().title.romaji, "Aria");
    }

    #[test]
    fn every_patch_overwrites_storage() {
        let mut storage = MockStorageProvider::new();
        storage.expect_load().returning(|_| None);
        storage
            .expect_save()
            .withf(|key, value| key == "backoffice_draft_series" && value.contains("\"version\":1"))
            .times(2)
            .return_const(());

        let mut store = DraftStore::<SeriesDraft>::open(Arc::new(storage));
        store.patch(title_patch("Planetes"));
        store.update(|draft| draft.is_adult = false);
    }
}

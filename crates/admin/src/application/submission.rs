//! Submission Pipeline - validation, then uploads, then create
//!
//! The stages run strictly in sequence. Each resolved upload is written
//! into the draft store straight away, so if a later stage fails the media
//! already stored is not uploaded a second time on retry. Nothing is rolled
//! back on failure.

use std::marker::PhantomData;
use std::sync::Arc;

use backoffice_domain::{EntityId, UploadOptions, WizardDraft};

use super::draft_store::DraftStore;
use super::error::SubmissionError;
use super::wizard_controller::WizardController;
use crate::ports::outbound::{CreateError, EntityCreatePort, MediaUploadPort};

/// Use case: turn a finished draft into a created entity
pub struct SubmitEntity<D: WizardDraft> {
    uploads: Arc<dyn MediaUploadPort>,
    entities: Arc<dyn EntityCreatePort>,
    _draft: PhantomData<fn() -> D>,
}

impl<D: WizardDraft> SubmitEntity<D> {
    pub fn new(uploads: Arc<dyn MediaUploadPort>, entities: Arc<dyn EntityCreatePort>) -> Self {
        Self {
            uploads,
            entities,
            _draft: PhantomData,
        }
    }

    /// Run the pipeline against the store's current draft.
    ///
    /// On success the draft store is cleared and the new entity's id is
    /// returned. On failure the draft keeps every field the user entered plus
    /// any media identifiers resolved before the failing stage.
    pub async fn execute(
        &self,
        store: &mut DraftStore<D>,
        wizard: &mut WizardController<D>,
    ) -> Result<EntityId, SubmissionError> {
        self.validate(store.draft(), wizard)?;
        self.upload_pending(store).await?;

        let payload = store
            .draft()
            .create_payload()
            .map_err(|e| CreateError::InvalidPayload(e.to_string()))?;

        let created = self
            .entities
            .create(D::ENTITY_TYPE, payload)
            .await
            .map_err(|e| {
                tracing::warn!(entity_type = D::ENTITY_TYPE, error = %e, "Create failed");
                SubmissionError::from(e)
            })?;

        tracing::info!(
            entity_type = D::ENTITY_TYPE,
            entity_id = %created.id,
            "Entity created"
        );
        store.clear();
        Ok(created.id)
    }

    /// Check every required step by position, not by what the user visited.
    fn validate(&self, draft: &D, wizard: &mut WizardController<D>) -> Result<(), SubmissionError> {
        let failure = wizard
            .plan()
            .required_steps()
            .map(|step| (step, wizard.plan().validate(step, draft)))
            .find(|(_, result)| !result.valid);

        if let Some((step, result)) = failure {
            tracing::info!(
                entity_type = D::ENTITY_TYPE,
                step,
                invalid_fields = result.errors.len(),
                "Submission blocked by validation"
            );
            wizard.reveal_step(step, result.errors.clone());
            return Err(SubmissionError::Validation {
                step,
                errors: result.errors,
            });
        }
        Ok(())
    }

    /// Upload each slot holding a fresh file, one at a time.
    ///
    /// Each id is merged and persisted as soon as its upload succeeds. When a
    /// later slot fails, the draft is therefore not left exactly as it was:
    /// earlier slots already hold their ids, and only the failing slot and
    /// those after it keep their files. A retry uploads just those.
    async fn upload_pending(&self, store: &mut DraftStore<D>) -> Result<(), SubmissionError> {
        for &slot in D::media_slots() {
            let Some(file) = store.draft().pending_upload(slot).cloned() else {
                continue;
            };

            tracing::info!(
                entity_type = D::ENTITY_TYPE,
                slot = %slot,
                file_name = %file.file_name,
                bytes = file.len(),
                "Uploading media"
            );

            let options = UploadOptions {
                entity_type: D::ENTITY_TYPE,
                slot,
            };
            let uploaded = self.uploads.upload(file, options).await.map_err(|source| {
                tracing::warn!(entity_type = D::ENTITY_TYPE, slot = %slot, error = %source, "Upload failed");
                SubmissionError::Upload { slot, source }
            })?;

            store.update(|draft| draft.resolve_media(slot, uploaded.id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error::SubmissionStage;
    use crate::infrastructure::platform::MemoryStorageProvider;
    use crate::ports::outbound::{
        MockEntityCreatePort, MockMediaUploadPort, UploadError, UploadedMedia,
    };
    use backoffice_domain::series::{BASICS_STEP, DETAILS_STEP, REVIEW_STEP};
    use crate::infrastructure::testing::fixtures::{
        banner_file, complete_series, cover_file, created,
    };
    use backoffice_domain::{series_steps, MediaId, MediaSlot, SeriesDraft, SeriesDraftPatch};

    fn complete_patch() -> SeriesDraftPatch {
        complete_series().into()
    }

    fn media_id(id: &str) -> MediaId {
        MediaId::new(id).unwrap()
    }

    struct Harness {
        storage: Arc<MemoryStorageProvider>,
        store: DraftStore<SeriesDraft>,
        wizard: WizardController<SeriesDraft>,
    }

    impl Harness {
        fn new(patch: SeriesDraftPatch) -> Self {
            let storage = Arc::new(MemoryStorageProvider::new());
            let mut store = DraftStore::open(storage.clone());
            store.patch(patch);
            let mut wizard = WizardController::new(series_steps());
            while wizard.current_step() < REVIEW_STEP {
                wizard.request_next(store.draft());
            }
            Self {
                storage,
                store,
                wizard,
            }
        }

        fn persisted(&self) -> SeriesDraft {
            DraftStore::<SeriesDraft>::open(self.storage.clone())
                .draft()
                .clone()
        }
    }

    fn submitter(
        uploads: MockMediaUploadPort,
        entities: MockEntityCreatePort,
    ) -> SubmitEntity<SeriesDraft> {
        SubmitEntity::new(Arc::new(uploads), Arc::new(entities))
    }

    #[tokio::test]
    async fn uploads_only_fresh_files_and_keeps_existing_ids() {
        let mut harness = Harness::new(SeriesDraftPatch {
            cover_image_file: Some(Some(cover_file())),
            banner_image_id: Some(Some(media_id("existing-id"))),
            ..complete_patch()
        });

        let mut uploads = MockMediaUploadPort::new();
        uploads
            .expect_upload()
            .withf(|file, options| {
                file.file_name == "cover.png"
                    && options.slot == MediaSlot::Cover
                    && options.entity_type == "series"
            })
            .times(1)
            .returning(|_, _| {
                Ok(UploadedMedia {
                    id: MediaId::new("cover-1").unwrap(),
                    url: None,
                })
            });

        let mut entities = MockEntityCreatePort::new();
        entities
            .expect_create()
            .withf(|entity_type, payload| {
                entity_type == "series"
                    && payload["coverImageId"] == "cover-1"
                    && payload["bannerImageId"] == "existing-id"
            })
            .times(1)
            .returning(|_, _| Ok(created("series-9")));

        let id = submitter(uploads, entities)
            .execute(&mut harness.store, &mut harness.wizard)
            .await
            .unwrap();

        assert_eq!(id.as_str(), "series-9");
        assert_eq!(harness.store.draft(), &SeriesDraft::default());
        assert_eq!(harness.persisted(), SeriesDraft::default());
    }

    #[tokio::test]
    async fn create_failure_keeps_uploaded_ids_and_draft() {
        let mut harness = Harness::new(SeriesDraftPatch {
            cover_image_file: Some(Some(cover_file())),
            banner_image_file: Some(Some(banner_file())),
            ..complete_patch()
        });

        let mut uploads = MockMediaUploadPort::new();
        uploads
            .expect_upload()
            .times(2)
            .returning(|_, options| {
                Ok(UploadedMedia {
                    id: MediaId::new(format!("{}-1", options.slot)).unwrap(),
                    url: None,
                })
            });

        let mut entities = MockEntityCreatePort::new();
        entities
            .expect_create()
            .times(1)
            .returning(|_, _| Err(CreateError::Transport("network unreachable".to_string())));

        let error = submitter(uploads, entities)
            .execute(&mut harness.store, &mut harness.wizard)
            .await
            .unwrap_err();

        assert_eq!(error.stage(), SubmissionStage::Create);
        let draft = harness.store.draft();
        assert_eq!(draft.cover_image_id, Some(media_id("cover-1")));
        assert_eq!(draft.banner_image_id, Some(media_id("banner-1")));
        assert!(draft.cover_image_file.is_none());
        assert_eq!(draft.title.romaji, "Mushishi");
        assert_eq!(harness.persisted(), *draft);
    }

    #[tokio::test]
    async fn retry_after_create_failure_does_not_reupload_resolved_slot() {
        let mut harness = Harness::new(SeriesDraftPatch {
            cover_image_id: Some(Some(media_id("cover-0"))),
            banner_image_file: Some(Some(banner_file())),
            ..complete_patch()
        });

        let mut uploads = MockMediaUploadPort::new();
        uploads
            .expect_upload()
            .withf(|_, options| options.slot == MediaSlot::Banner)
            .times(1)
            .returning(|_, _| {
                Ok(UploadedMedia {
                    id: MediaId::new("banner-1").unwrap(),
                    url: Some("https://cdn.example/banner-1.jpg".to_string()),
                })
            });

        let mut entities = MockEntityCreatePort::new();
        let mut attempts = 0;
        entities.expect_create().times(2).returning(move |_, payload| {
            attempts += 1;
            assert_eq!(payload["coverImageId"], "cover-0");
            assert_eq!(payload["bannerImageId"], "banner-1");
            if attempts == 1 {
                Err(CreateError::Transport("timeout".to_string()))
            } else {
                Ok(created("series-2"))
            }
        });

        let submit = submitter(uploads, entities);
        let first = submit
            .execute(&mut harness.store, &mut harness.wizard)
            .await;
        assert_eq!(first.unwrap_err().stage(), SubmissionStage::Create);

        let second = submit
            .execute(&mut harness.store, &mut harness.wizard)
            .await
            .unwrap();
        assert_eq!(second.as_str(), "series-2");
    }

    #[tokio::test]
    async fn upload_failure_stops_before_create() {
        let mut harness = Harness::new(SeriesDraftPatch {
            cover_image_file: Some(Some(cover_file())),
            banner_image_file: Some(Some(banner_file())),
            ..complete_patch()
        });
        let state_before = harness.wizard.state().clone();

        let mut uploads = MockMediaUploadPort::new();
        uploads
            .expect_upload()
            .withf(|_, options| options.slot == MediaSlot::Cover)
            .times(1)
            .returning(|_, _| {
                Err(UploadError::Rejected {
                    status: 413,
                    message: "File too large".to_string(),
                })
            });

        let mut entities = MockEntityCreatePort::new();
        entities.expect_create().never();

        let error = submitter(uploads, entities)
            .execute(&mut harness.store, &mut harness.wizard)
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            SubmissionError::Upload {
                slot: MediaSlot::Cover,
                ..
            }
        ));
        assert_eq!(harness.wizard.state(), &state_before);
        let draft = harness.store.draft();
        assert_eq!(draft.cover_image_file, Some(cover_file()));
        assert_eq!(draft.banner_image_file, Some(banner_file()));
        assert!(draft.cover_image_id.is_none());
    }

    #[tokio::test]
    async fn later_upload_failure_keeps_earlier_ids_for_retry() {
        let mut harness = Harness::new(SeriesDraftPatch {
            cover_image_file: Some(Some(cover_file())),
            banner_image_file: Some(Some(banner_file())),
            ..complete_patch()
        });
        let state_before = harness.wizard.state().clone();

        let mut uploads = MockMediaUploadPort::new();
        uploads
            .expect_upload()
            .withf(|_, options| options.slot == MediaSlot::Cover)
            .times(1)
            .returning(|_, _| {
                Ok(UploadedMedia {
                    id: MediaId::new("cover-1").unwrap(),
                    url: None,
                })
            });
        let mut banner_attempts = 0;
        uploads
            .expect_upload()
            .withf(|_, options| options.slot == MediaSlot::Banner)
            .times(2)
            .returning(move |_, _| {
                banner_attempts += 1;
                if banner_attempts == 1 {
                    Err(UploadError::Transport("connection reset".to_string()))
                } else {
                    Ok(UploadedMedia {
                        id: MediaId::new("banner-1").unwrap(),
                        url: None,
                    })
                }
            });

        let mut entities = MockEntityCreatePort::new();
        entities
            .expect_create()
            .withf(|_, payload| {
                payload["coverImageId"] == "cover-1" && payload["bannerImageId"] == "banner-1"
            })
            .times(1)
            .returning(|_, _| Ok(created("series-5")));

        let submit = submitter(uploads, entities);
        let error = submit
            .execute(&mut harness.store, &mut harness.wizard)
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            SubmissionError::Upload {
                slot: MediaSlot::Banner,
                ..
            }
        ));
        assert_eq!(harness.wizard.state(), &state_before);

        let draft = harness.store.draft();
        assert_eq!(draft.cover_image_id, Some(media_id("cover-1")));
        assert!(draft.cover_image_file.is_none());
        assert!(draft.banner_image_id.is_none());
        assert_eq!(draft.banner_image_file, Some(banner_file()));

        let persisted = harness.persisted();
        assert_eq!(persisted.cover_image_id, Some(media_id("cover-1")));
        assert!(persisted.banner_image_id.is_none());
        assert_eq!(persisted.title.romaji, "Mushishi");

        let id = submit
            .execute(&mut harness.store, &mut harness.wizard)
            .await
            .unwrap();
        assert_eq!(id.as_str(), "series-5");
    }

    #[tokio::test]
    async fn invalid_required_step_is_revealed_and_nothing_is_called() {
        let mut harness = Harness::new(complete_patch());
        // Break step 2 after it was completed.
        harness.store.patch(SeriesDraftPatch {
            episodes: Some(Some(0)),
            ..Default::default()
        });

        let mut uploads = MockMediaUploadPort::new();
        uploads.expect_upload().never();
        let mut entities = MockEntityCreatePort::new();
        entities.expect_create().never();

        let error = submitter(uploads, entities)
            .execute(&mut harness.store, &mut harness.wizard)
            .await
            .unwrap_err();

        assert_eq!(error.stage(), SubmissionStage::Validation);
        assert_eq!(error.failing_step(), Some(DETAILS_STEP));
        assert_eq!(harness.wizard.current_step(), DETAILS_STEP);
        assert!(harness
            .wizard
            .state()
            .errors_for(DETAILS_STEP)
            .is_some_and(|errors| errors.contains("episodes")));
        assert_eq!(harness.store.draft().episodes, Some(0));
    }

    #[tokio::test]
    async fn first_failing_required_step_wins() {
        let storage = Arc::new(MemoryStorageProvider::new());
        let mut store = DraftStore::<SeriesDraft>::open(storage);
        // Never walked through: completion plays no part at submit time.
        let mut wizard = WizardController::new(series_steps());

        let mut uploads = MockMediaUploadPort::new();
        uploads.expect_upload().never();
        let mut entities = MockEntityCreatePort::new();
        entities.expect_create().never();

        let error = submitter(uploads, entities)
            .execute(&mut store, &mut wizard)
            .await
            .unwrap_err();

        assert_eq!(error.failing_step(), Some(BASICS_STEP));
        assert_eq!(wizard.current_step(), BASICS_STEP);
    }
}

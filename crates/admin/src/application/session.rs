//! Wizard Session - what the presentation layer talks to
//!
//! Ties one draft store, one controller and the submission use case together
//! for a single entity type, and hands off to navigation once the entity
//! exists.

use std::sync::Arc;

use backoffice_domain::{EntityId, StepPlan, WizardDraft, WizardState};

use super::draft_store::DraftStore;
use super::error::SubmissionError;
use super::submission::SubmitEntity;
use super::wizard_controller::{StepChange, WizardController};
use crate::ports::outbound::{EntityCreatePort, MediaUploadPort, NavigationPort, StorageProvider};

pub struct WizardSession<D: WizardDraft> {
    store: DraftStore<D>,
    wizard: WizardController<D>,
    submitter: SubmitEntity<D>,
    navigation: Arc<dyn NavigationPort>,
}

impl<D: WizardDraft> WizardSession<D> {
    pub fn new(
        plan: StepPlan<D>,
        storage: Arc<dyn StorageProvider>,
        uploads: Arc<dyn MediaUploadPort>,
        entities: Arc<dyn EntityCreatePort>,
        navigation: Arc<dyn NavigationPort>,
    ) -> Self {
        Self {
            store: DraftStore::open(storage),
            wizard: WizardController::new(plan),
            submitter: SubmitEntity::new(uploads, entities),
            navigation,
        }
    }

    pub fn draft(&self) -> &D {
        self.store.draft()
    }

    pub fn store(&self) -> &DraftStore<D> {
        &self.store
    }

    pub fn wizard(&self) -> &WizardController<D> {
        &self.wizard
    }

    pub fn state(&self) -> &WizardState {
        self.wizard.state()
    }

    /// A form edit: merge, persist, and refresh any errors on screen.
    pub fn edit(&mut self, patch: D::Patch) {
        self.store.patch(patch);
        self.wizard.revalidate_shown(self.store.draft());
    }

    pub fn next(&mut self) -> StepChange {
        self.wizard.request_next(self.store.draft())
    }

    pub fn previous(&mut self) -> StepChange {
        self.wizard.request_previous()
    }

    pub fn jump_to(&mut self, step: usize) -> StepChange {
        self.wizard.jump_to(step)
    }

    pub fn direct_entry(&mut self) -> StepChange {
        self.wizard.direct_entry()
    }

    /// Prefill the draft from an existing record picked on the entry step,
    /// then continue to the first form step.
    pub fn select_prefill(&mut self, patch: D::Patch) -> StepChange {
        if self.wizard.current_step() != 0 {
            return StepChange::Ignored;
        }
        self.store.patch(patch);
        self.wizard.direct_entry()
    }

    /// Discard the draft and start over.
    pub fn reset(&mut self) {
        self.store.clear();
        self.wizard.reset();
        tracing::info!(entity_type = D::ENTITY_TYPE, "Wizard reset");
    }

    /// Submit the draft. On success the wizard is reset and navigation moves
    /// to the created entity.
    pub async fn submit(&mut self) -> Result<EntityId, SubmissionError> {
        let id = self.submitter.execute(&mut self.store, &mut self.wizard).await?;
        self.wizard.reset();
        self.navigation.open_entity(D::ENTITY_TYPE, &id);
        Ok(id)
    }
}

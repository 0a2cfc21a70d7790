//! Wizard Controller - the step state machine
//!
//! Owns the [`WizardState`] and is the only thing that mutates it. Forward
//! moves are gated by the step validator; backward moves and jumps to steps
//! that already passed validation are free. Validation failure is an
//! ordinary outcome recorded in the state, never an error.

use backoffice_domain::{FieldErrors, StepDefinition, StepPlan, WizardDraft, WizardState};

/// What a navigation request did to the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepChange {
    /// Current step validated and the wizard moved forward
    Advanced { from: usize, to: usize },
    /// Last step validated; there is nowhere further to go
    Finished { step: usize },
    /// Current step failed validation; its errors are now recorded
    Blocked { step: usize },
    /// Moved backward or jumped to a completed step
    Moved { from: usize, to: usize },
    /// The request was not permitted and nothing changed
    Ignored,
}

pub struct WizardController<D: WizardDraft> {
    plan: StepPlan<D>,
    state: WizardState,
}

impl<D: WizardDraft> WizardController<D> {
    pub fn new(plan: StepPlan<D>) -> Self {
        Self {
            plan,
            state: WizardState::new(),
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn plan(&self) -> &StepPlan<D> {
        &self.plan
    }

    pub fn steps(&self) -> &[StepDefinition<D>] {
        self.plan.steps()
    }

    pub fn current_step(&self) -> usize {
        self.state.current_step()
    }

    pub fn current_errors(&self) -> Option<&FieldErrors> {
        self.state.errors_for(self.state.current_step())
    }

    pub fn is_last_step(&self) -> bool {
        self.state.current_step() == self.plan.last_index()
    }

    /// The entry step is one-directional, so "back" is only offered from step 2 on.
    pub fn can_go_back(&self) -> bool {
        self.state.current_step() > 1
    }

    pub fn can_go_next(&self) -> bool {
        !self.is_last_step()
    }

    /// Whether the step indicator may jump straight to `step`
    pub fn is_step_reachable(&self, step: usize) -> bool {
        self.state.is_completed(step)
    }

    /// Validate the current step and move forward if it passes.
    pub fn request_next(&mut self, draft: &D) -> StepChange {
        let current = self.state.current_step();

        if current == 0 {
            return self.leave_entry_step();
        }

        let validation = self.plan.validate(current, draft);
        if !validation.valid {
            tracing::debug!(
                entity_type = D::ENTITY_TYPE,
                step = current,
                invalid_fields = validation.errors.len(),
                "Step failed validation"
            );
            self.show_errors(current, validation.errors);
            return StepChange::Blocked { step: current };
        }

        self.state.mark_completed(current);
        self.state.clear_errors(current);

        if current < self.plan.last_index() {
            let next = current + 1;
            self.state.set_current_step(next);
            tracing::debug!(entity_type = D::ENTITY_TYPE, from = current, to = next, "Advanced");
            StepChange::Advanced {
                from: current,
                to: next,
            }
        } else {
            StepChange::Finished { step: current }
        }
    }

    /// Step back one screen. Never re-enters the entry step.
    pub fn request_previous(&mut self) -> StepChange {
        let current = self.state.current_step();
        if current <= 1 {
            return StepChange::Ignored;
        }
        let previous = current - 1;
        self.state.set_current_step(previous);
        tracing::debug!(entity_type = D::ENTITY_TYPE, from = current, to = previous, "Moved back");
        StepChange::Moved {
            from: current,
            to: previous,
        }
    }

    /// Jump to a step that has already passed validation; anything else is ignored.
    pub fn jump_to(&mut self, step: usize) -> StepChange {
        if !self.state.is_completed(step) || !self.plan.contains(step) {
            tracing::debug!(entity_type = D::ENTITY_TYPE, step, "Ignored jump to unvalidated step");
            return StepChange::Ignored;
        }
        let current = self.state.current_step();
        if step == current {
            return StepChange::Ignored;
        }
        self.state.set_current_step(step);
        StepChange::Moved {
            from: current,
            to: step,
        }
    }

    /// "Skip selection": leave the entry step without choosing anything.
    pub fn direct_entry(&mut self) -> StepChange {
        if self.state.current_step() != 0 {
            return StepChange::Ignored;
        }
        self.leave_entry_step()
    }

    /// Re-run validation on every step that is showing errors, so that fixed
    /// fields stop being flagged as soon as they are edited. A step is
    /// re-checked even when the edit happened elsewhere, since a schema may
    /// look at fields entered on an earlier screen. Never moves the wizard or
    /// touches completion.
    pub fn revalidate_shown(&mut self, draft: &D) {
        let flagged: Vec<usize> = self.state.step_errors().keys().copied().collect();
        for step in flagged {
            let validation = self.plan.validate(step, draft);
            if validation.valid {
                tracing::debug!(entity_type = D::ENTITY_TYPE, step, "Step errors resolved");
                self.state.clear_errors(step);
            } else {
                self.show_errors(step, validation.errors);
            }
        }
    }

    /// Move to a step the submission pipeline found invalid and show its
    /// errors, whether or not the user has visited it yet.
    pub fn reveal_step(&mut self, step: usize, errors: FieldErrors) {
        if !self.plan.contains(step) {
            return;
        }
        tracing::debug!(entity_type = D::ENTITY_TYPE, step, "Revealing invalid step");
        self.state.set_current_step(step);
        self.show_errors(step, errors);
    }

    /// Back to a fresh wizard at the entry step.
    pub fn reset(&mut self) {
        self.state = WizardState::new();
    }

    /// Record errors for an invalid step. An invalid step is never left
    /// without something to display.
    fn show_errors(&mut self, step: usize, mut errors: FieldErrors) {
        if errors.is_empty() {
            errors.insert("step", "This step is incomplete");
        }
        self.state.set_errors(step, errors);
    }

    fn leave_entry_step(&mut self) -> StepChange {
        self.state.mark_completed(0);
        if self.plan.last_index() == 0 {
            return StepChange::Finished { step: 0 };
        }
        self.state.set_current_step(1);
        tracing::debug!(entity_type = D::ENTITY_TYPE, "Left entry step");
        StepChange::Advanced { from: 0, to: 1 }
    }
}

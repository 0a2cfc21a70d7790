//! Navigation state of a running wizard. Never persisted: only the draft
//! survives a reload.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::wizard::validation::FieldErrors;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    current_step: usize,
    completed_steps: BTreeSet<usize>,
    step_errors: BTreeMap<usize, FieldErrors>,
}

impl WizardState {
    /// Fresh state at the entry step
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn completed_steps(&self) -> &BTreeSet<usize> {
        &self.completed_steps
    }

    pub fn is_completed(&self, step: usize) -> bool {
        self.completed_steps.contains(&step)
    }

    pub fn step_errors(&self) -> &BTreeMap<usize, FieldErrors> {
        &self.step_errors
    }

    /// Errors currently displayed for a step
    pub fn errors_for(&self, step: usize) -> Option<&FieldErrors> {
        self.step_errors.get(&step)
    }

    pub fn set_current_step(&mut self, step: usize) {
        self.current_step = step;
    }

    /// Completion is monotonic: there is no way to un-complete a step.
    pub fn mark_completed(&mut self, step: usize) {
        self.completed_steps.insert(step);
    }

    /// Replace a step's error map. An empty map removes the entry.
    pub fn set_errors(&mut self, step: usize, errors: FieldErrors) {
        if errors.is_empty() {
            self.step_errors.remove(&step);
        } else {
            self.step_errors.insert(step, errors);
        }
    }

    pub fn clear_errors(&mut self, step: usize) {
        self.step_errors.remove(&step);
    }
}

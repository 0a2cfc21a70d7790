//! Step definitions and the per-step validation lookup table.

use std::fmt;

use crate::error::DomainError;
use crate::wizard::validation::{FieldErrors, StepValidation};

/// Validates the subset of a draft that belongs to one step
pub type StepSchema<D> = fn(&D) -> StepValidation;

/// What a step demands before the wizard may move past it
pub enum StepRequirement<D> {
    /// Always valid (selection, optional and review steps)
    None,
    /// Validated against a step-specific schema
    Schema(StepSchema<D>),
}

impl<D> StepRequirement<D> {
    pub fn is_required(&self) -> bool {
        matches!(self, StepRequirement::Schema(_))
    }
}

impl<D> Clone for StepRequirement<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for StepRequirement<D> {}

impl<D> fmt::Debug for StepRequirement<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepRequirement::None => f.write_str("None"),
            StepRequirement::Schema(_) => f.write_str("Schema"),
        }
    }
}

/// One screen of the wizard
pub struct StepDefinition<D> {
    /// Stable identifier (used in logs and by the step indicator)
    pub key: &'static str,
    /// Human label shown in the step indicator
    pub label: &'static str,
    pub requirement: StepRequirement<D>,
}

impl<D> StepDefinition<D> {
    pub fn optional(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            requirement: StepRequirement::None,
        }
    }

    pub fn required(key: &'static str, label: &'static str, schema: StepSchema<D>) -> Self {
        Self {
            key,
            label,
            requirement: StepRequirement::Schema(schema),
        }
    }
}

impl<D> Clone for StepDefinition<D> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            label: self.label,
            requirement: self.requirement,
        }
    }
}

impl<D> fmt::Debug for StepDefinition<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDefinition")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("requirement", &self.requirement)
            .finish()
    }
}

/// The fixed, ordered sequence of steps for one wizard.
///
/// Invariants (checked by [`StepPlan::new`]): the plan is non-empty and
/// step 0 is a `None` entry/selection step.
pub struct StepPlan<D> {
    steps: Vec<StepDefinition<D>>,
}

impl<D> StepPlan<D> {
    pub fn new(steps: Vec<StepDefinition<D>>) -> Result<Self, DomainError> {
        let Some(entry) = steps.first() else {
            return Err(DomainError::invalid_step_plan("a wizard needs at least one step"));
        };
        if entry.requirement.is_required() {
            return Err(DomainError::invalid_step_plan(format!(
                "entry step '{}' cannot carry a schema",
                entry.key
            )));
        }
        Ok(Self { steps })
    }

    /// Build a plan whose entry step is an optional selection step, which
    /// satisfies the plan invariants by construction.
    pub fn with_entry(
        key: &'static str,
        label: &'static str,
        rest: Vec<StepDefinition<D>>,
    ) -> Self {
        let mut steps = Vec::with_capacity(rest.len() + 1);
        steps.push(StepDefinition::optional(key, label));
        steps.extend(rest);
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn contains(&self, step: usize) -> bool {
        step < self.steps.len()
    }

    pub fn get(&self, step: usize) -> Option<&StepDefinition<D>> {
        self.steps.get(step)
    }

    pub fn steps(&self) -> &[StepDefinition<D>] {
        &self.steps
    }

    pub fn is_required(&self, step: usize) -> bool {
        self.get(step)
            .is_some_and(|definition| definition.requirement.is_required())
    }

    /// Indices of every `required-schema` step, in order
    pub fn required_steps(&self) -> impl Iterator<Item = usize> + '_ {
        self.steps
            .iter()
            .enumerate()
            .filter(|(_, definition)| definition.requirement.is_required())
            .map(|(index, _)| index)
    }

    /// Validate one step against the current draft.
    ///
    /// Pure: no I/O, no mutation, same inputs give the same result.
    pub fn validate(&self, step: usize, draft: &D) -> StepValidation {
        match self.steps.get(step) {
            Some(definition) => match definition.requirement {
                StepRequirement::None => StepValidation::valid(),
                StepRequirement::Schema(schema) => schema(draft),
            },
            None => {
                let mut errors = FieldErrors::new();
                errors.insert("step", format!("Unknown wizard step {}", step));
                StepValidation::invalid(errors)
            }
        }
    }
}

impl<D> Clone for StepPlan<D> {
    fn clone(&self) -> Self {
        Self {
            steps: self.steps.clone(),
        }
    }
}

impl<D> fmt::Debug for StepPlan<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.steps).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Form {
        name: String,
    }

    fn name_schema(form: &Form) -> StepValidation {
        let mut errors = FieldErrors::new();
        if form.name.is_empty() {
            errors.insert("name", "Name is required");
        }
        if errors.is_empty() {
            StepValidation::valid()
        } else {
            StepValidation::invalid(errors)
        }
    }

    fn plan() -> StepPlan<Form> {
        StepPlan::new(vec![
            StepDefinition::optional("select", "Select"),
            StepDefinition::required("name", "Name", name_schema),
            StepDefinition::optional("review", "Review"),
        ])
        .unwrap()
    }

    #[test]
    fn empty_plan_is_rejected() {
        assert!(StepPlan::<Form>::new(Vec::new()).is_err());
    }

    #[test]
    fn entry_step_must_not_be_required() {
        let result = StepPlan::new(vec![StepDefinition::required("name", "Name", name_schema)]);
        assert!(matches!(result, Err(DomainError::InvalidStepPlan(_))));
    }

    #[test]
    fn optional_steps_always_validate() {
        let plan = plan();
        assert!(plan.validate(0, &Form::default()).valid);
        assert!(plan.validate(2, &Form::default()).valid);
    }

    #[test]
    fn required_step_dispatches_to_schema() {
        let plan = plan();
        let result = plan.validate(1, &Form::default());
        assert!(!result.valid);
        assert_eq!(result.errors.get("name"), Some("Name is required"));

        let filled = Form {
            name: "Mushishi".to_string(),
        };
        assert!(plan.validate(1, &filled).valid);
    }

    #[test]
    fn out_of_range_step_is_invalid_with_single_error() {
        let result = plan().validate(7, &Form::default());
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors.contains("step"));
    }

    #[test]
    fn required_steps_are_listed_by_position() {
        assert_eq!(plan().required_steps().collect::<Vec<_>>(), vec![1]);
    }
}

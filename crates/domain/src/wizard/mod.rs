//! Generic multi-step wizard model: drafts, step plans, validation results,
//! and navigation state.

pub mod draft;
pub mod state;
pub mod step;
pub mod validation;

pub use draft::WizardDraft;
pub use state::WizardState;
pub use step::{StepDefinition, StepPlan, StepRequirement, StepSchema};
pub use validation::{FieldErrors, StepValidation};

extern crate self as backoffice_domain;

pub mod error;
pub mod ids;
pub mod media;
pub mod series;
pub mod wizard;

pub use error::DomainError;

// Re-export ID types
pub use ids::{EntityId, MediaId};

pub use media::{MediaSlot, UploadFile, UploadOptions};

pub use series::{
    series_steps, FuzzyDate, SeriesDraft, SeriesDraftPatch, SeriesFormat, SeriesSeason,
    SeriesSource, SeriesStatus, SeriesTitle, SeriesType,
};

pub use wizard::{
    FieldErrors, StepDefinition, StepPlan, StepRequirement, StepSchema, StepValidation,
    WizardDraft, WizardState,
};

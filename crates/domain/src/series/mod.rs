//! Series: the entity behind the back-office's multi-step creation wizard.

pub mod draft;
pub mod steps;

pub use draft::{
    FuzzyDate, SeriesDraft, SeriesDraftPatch, SeriesFormat, SeriesSeason, SeriesSource,
    SeriesStatus, SeriesTitle, SeriesType,
};
pub use steps::{
    series_steps, BASICS_STEP, CLASSIFICATION_STEP, DETAILS_STEP, MEDIA_STEP, REVIEW_STEP,
    SELECTION_STEP,
};

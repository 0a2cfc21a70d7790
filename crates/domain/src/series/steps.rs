//! Series creation wizard steps and their schemas.
//!
//! Each required step validates only the fields shown on that screen. The
//! schemas are small `validator` structs projected out of the draft, plus a
//! few cross-field checks that a derive cannot express.

use validator::Validate;

use crate::series::draft::{FuzzyDate, SeriesDraft, SeriesFormat, SeriesStatus, SeriesType};
use crate::wizard::{FieldErrors, StepDefinition, StepPlan, StepValidation};

pub const SELECTION_STEP: usize = 0;
pub const BASICS_STEP: usize = 1;
pub const DETAILS_STEP: usize = 2;
pub const MEDIA_STEP: usize = 3;
pub const CLASSIFICATION_STEP: usize = 4;
pub const REVIEW_STEP: usize = 5;

/// The six-step series creation plan.
pub fn series_steps() -> StepPlan<SeriesDraft> {
    StepPlan::with_entry(
        "selection",
        "Start",
        vec![
            StepDefinition::required("basics", "Basic information", validate_basics),
            StepDefinition::required("details", "Release details", validate_details),
            StepDefinition::optional("media", "Images"),
            StepDefinition::optional("classification", "Genres & tags"),
            StepDefinition::optional("review", "Review"),
        ],
    )
}

// =============================================================================
// Basics
// =============================================================================

#[derive(Debug, Validate)]
struct TitleSchema {
    #[validate(length(min = 1, max = 255, message = "Romaji title is required"))]
    romaji: String,
    #[validate(length(max = 255))]
    english: Option<String>,
    #[validate(length(max = 255))]
    native: Option<String>,
}

#[derive(Debug, Validate)]
struct BasicsSchema {
    #[validate(nested)]
    title: TitleSchema,
    #[validate(required(message = "Choose anime or manga"))]
    series_type: Option<SeriesType>,
    #[validate(required(message = "Choose a format"))]
    format: Option<SeriesFormat>,
    #[validate(required(message = "Choose a release status"))]
    status: Option<SeriesStatus>,
}

fn validate_basics(draft: &SeriesDraft) -> StepValidation {
    let schema = BasicsSchema {
        title: TitleSchema {
            romaji: draft.title.romaji.trim().to_string(),
            english: draft.title.english.clone(),
            native: draft.title.native.clone(),
        },
        series_type: draft.series_type,
        format: draft.format,
        status: draft.status,
    };

    let mut errors = schema_errors(schema.validate());

    if let (Some(series_type), Some(format)) = (draft.series_type, draft.format) {
        if !format.applies_to(series_type) {
            errors.insert("format", "This format does not match the series type");
        }
    }

    finish(errors)
}

// =============================================================================
// Details
// =============================================================================

#[derive(Debug, Validate)]
struct DateSchema {
    #[validate(range(min = 1900, max = 2100))]
    year: Option<i32>,
    #[validate(range(min = 1, max = 12))]
    month: Option<u32>,
    #[validate(range(min = 1, max = 31))]
    day: Option<u32>,
}

impl From<FuzzyDate> for DateSchema {
    fn from(date: FuzzyDate) -> Self {
        Self {
            year: date.year,
            month: date.month,
            day: date.day,
        }
    }
}

#[derive(Debug, Validate)]
struct DetailsSchema {
    #[validate(length(max = 5000))]
    description: Option<String>,
    #[validate(nested)]
    start_date: DateSchema,
    #[validate(nested)]
    end_date: DateSchema,
    #[validate(range(min = 1900, max = 2100))]
    season_year: Option<i32>,
    #[validate(range(min = 1, max = 10000))]
    episodes: Option<u32>,
    #[validate(range(min = 1, max = 1000))]
    duration: Option<u32>,
    #[validate(range(min = 1, max = 10000))]
    chapters: Option<u32>,
    #[validate(range(min = 1, max = 1000))]
    volumes: Option<u32>,
}

fn validate_details(draft: &SeriesDraft) -> StepValidation {
    let schema = DetailsSchema {
        description: draft.description.clone(),
        start_date: draft.start_date.into(),
        end_date: draft.end_date.into(),
        season_year: draft.season_year,
        episodes: draft.episodes,
        duration: draft.duration,
        chapters: draft.chapters,
        volumes: draft.volumes,
    };

    let mut errors = schema_errors(schema.validate());

    // Anything already airing or finished has a known start year.
    if draft.status != Some(SeriesStatus::NotYetReleased) && draft.start_date.year.is_none() {
        errors.insert("start_date.year", "Start year is required once a series has aired");
    }

    if let (Some(start), Some(end)) = (draft.start_date.complete(), draft.end_date.complete()) {
        if end < start {
            errors.insert("end_date", "End date cannot be before the start date");
        }
    }

    finish(errors)
}

// =============================================================================
// Helpers
// =============================================================================

fn schema_errors(result: Result<(), validator::ValidationErrors>) -> FieldErrors {
    match result {
        Ok(()) => FieldErrors::new(),
        Err(errors) => FieldErrors::from(&errors),
    }
}

fn finish(errors: FieldErrors) -> StepValidation {
    if errors.is_empty() {
        StepValidation::valid()
    } else {
        StepValidation::invalid(errors)
    }
}

//! Series draft: the partially-filled series built by the creation wizard.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DomainError;
use crate::ids::MediaId;
use crate::media::{MediaSlot, UploadFile};
use crate::wizard::WizardDraft;

// =============================================================================
// Enumerations
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeriesType {
    Anime,
    Manga,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeriesFormat {
    Tv,
    TvShort,
    Movie,
    Special,
    Ova,
    Ona,
    Music,
    Manga,
    Novel,
    OneShot,
}

impl SeriesFormat {
    /// Whether this format can describe a series of the given type
    pub fn applies_to(self, series_type: SeriesType) -> bool {
        match self {
            SeriesFormat::Manga | SeriesFormat::Novel | SeriesFormat::OneShot => {
                series_type == SeriesType::Manga
            }
            _ => series_type == SeriesType::Anime,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeriesStatus {
    Finished,
    Releasing,
    NotYetReleased,
    Cancelled,
    Hiatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeriesSeason {
    Winter,
    Spring,
    Summer,
    Fall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeriesSource {
    Original,
    Manga,
    LightNovel,
    VisualNovel,
    VideoGame,
    Novel,
    Other,
}

// =============================================================================
// Value objects
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeriesTitle {
    pub romaji: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub english: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native: Option<String>,
}

/// A date where any component may still be unknown (e.g. "2026, month TBA")
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzyDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl FuzzyDate {
    pub fn new(year: Option<i32>, month: Option<u32>, day: Option<u32>) -> Self {
        Self { year, month, day }
    }

    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.month.is_none() && self.day.is_none()
    }

    /// Comparable key, only when every component is known
    pub fn complete(&self) -> Option<(i32, u32, u32)> {
        Some((self.year?, self.month?, self.day?))
    }
}

// =============================================================================
// Draft
// =============================================================================

/// Everything the series wizard collects.
///
/// `cover_image_file` / `banner_image_file` are transient: they live only in
/// memory and are skipped by serde, so a reloaded draft never carries them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeriesDraft {
    pub title: SeriesTitle,
    #[serde(rename = "type")]
    pub series_type: Option<SeriesType>,
    pub format: Option<SeriesFormat>,
    pub status: Option<SeriesStatus>,
    pub description: Option<String>,
    pub start_date: FuzzyDate,
    pub end_date: FuzzyDate,
    pub season: Option<SeriesSeason>,
    pub season_year: Option<i32>,
    pub episodes: Option<u32>,
    /// Minutes per episode
    pub duration: Option<u32>,
    pub chapters: Option<u32>,
    pub volumes: Option<u32>,
    pub source: Option<SeriesSource>,
    pub country_of_origin: Option<String>,
    pub is_adult: bool,
    pub genres: Vec<String>,
    pub synonyms: Vec<String>,
    pub tags: Vec<String>,
    pub cover_image_id: Option<MediaId>,
    pub banner_image_id: Option<MediaId>,
    #[serde(skip)]
    pub cover_image_file: Option<UploadFile>,
    #[serde(skip)]
    pub banner_image_file: Option<UploadFile>,
}

/// A single edit to a [`SeriesDraft`]. `Some` replaces the field, `None`
/// leaves it alone; optional fields are cleared with `Some(None)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesDraftPatch {
    pub title: Option<SeriesTitle>,
    pub series_type: Option<Option<SeriesType>>,
    pub format: Option<Option<SeriesFormat>>,
    pub status: Option<Option<SeriesStatus>>,
    pub description: Option<Option<String>>,
    pub start_date: Option<FuzzyDate>,
    pub end_date: Option<FuzzyDate>,
    pub season: Option<Option<SeriesSeason>>,
    pub season_year: Option<Option<i32>>,
    pub episodes: Option<Option<u32>>,
    pub duration: Option<Option<u32>>,
    pub chapters: Option<Option<u32>>,
    pub volumes: Option<Option<u32>>,
    pub source: Option<Option<SeriesSource>>,
    pub country_of_origin: Option<Option<String>>,
    pub is_adult: Option<bool>,
    pub genres: Option<Vec<String>>,
    pub synonyms: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub cover_image_id: Option<Option<MediaId>>,
    pub banner_image_id: Option<Option<MediaId>>,
    pub cover_image_file: Option<Option<UploadFile>>,
    pub banner_image_file: Option<Option<UploadFile>>,
}

/// A prefill picked on the selection step overwrites every persisted field.
/// Transient files already chosen are kept.
impl From<SeriesDraft> for SeriesDraftPatch {
    fn from(draft: SeriesDraft) -> Self {
        Self {
            title: Some(draft.title),
            series_type: Some(draft.series_type),
            format: Some(draft.format),
            status: Some(draft.status),
            description: Some(draft.description),
            start_date: Some(draft.start_date),
            end_date: Some(draft.end_date),
            season: Some(draft.season),
            season_year: Some(draft.season_year),
            episodes: Some(draft.episodes),
            duration: Some(draft.duration),
            chapters: Some(draft.chapters),
            volumes: Some(draft.volumes),
            source: Some(draft.source),
            country_of_origin: Some(draft.country_of_origin),
            is_adult: Some(draft.is_adult),
            genres: Some(draft.genres),
            synonyms: Some(draft.synonyms),
            tags: Some(draft.tags),
            cover_image_id: Some(draft.cover_image_id),
            banner_image_id: Some(draft.banner_image_id),
            cover_image_file: None,
            banner_image_file: None,
        }
    }
}

fn merge<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Title as sent on create: surrounding whitespace trimmed, blank
/// alternatives left out.
#[derive(Serialize)]
struct TitlePayload<'a> {
    romaji: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    english: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    native: Option<&'a str>,
}

impl<'a> From<&'a SeriesTitle> for TitlePayload<'a> {
    fn from(title: &'a SeriesTitle) -> Self {
        let trimmed = |value: &'a Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
        };
        Self {
            romaji: title.romaji.trim(),
            english: trimmed(&title.english),
            native: trimmed(&title.native),
        }
    }
}

/// Create request body. Borrowed from the draft so building it never clones
/// image payloads.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateSeriesPayload<'a> {
    title: TitlePayload<'a>,
    #[serde(rename = "type")]
    series_type: SeriesType,
    format: SeriesFormat,
    status: SeriesStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "FuzzyDate::is_empty")]
    start_date: FuzzyDate,
    #[serde(skip_serializing_if = "FuzzyDate::is_empty")]
    end_date: FuzzyDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    season: Option<SeriesSeason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    season_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    episodes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    chapters: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    volumes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<SeriesSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country_of_origin: Option<&'a str>,
    is_adult: bool,
    genres: &'a [String],
    synonyms: &'a [String],
    tags: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    cover_image_id: Option<&'a MediaId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    banner_image_id: Option<&'a MediaId>,
}

const SERIES_MEDIA_SLOTS: [MediaSlot; 2] = [MediaSlot::Cover, MediaSlot::Banner];

impl WizardDraft for SeriesDraft {
    const ENTITY_TYPE: &'static str = "series";

    type Patch = SeriesDraftPatch;

    fn apply_patch(&mut self, patch: SeriesDraftPatch) {
        merge(&mut self.title, patch.title);
        merge(&mut self.series_type, patch.series_type);
        merge(&mut self.format, patch.format);
        merge(&mut self.status, patch.status);
        merge(&mut self.description, patch.description);
        merge(&mut self.start_date, patch.start_date);
        merge(&mut self.end_date, patch.end_date);
        merge(&mut self.season, patch.season);
        merge(&mut self.season_year, patch.season_year);
        merge(&mut self.episodes, patch.episodes);
        merge(&mut self.duration, patch.duration);
        merge(&mut self.chapters, patch.chapters);
        merge(&mut self.volumes, patch.volumes);
        merge(&mut self.source, patch.source);
        merge(&mut self.country_of_origin, patch.country_of_origin);
        merge(&mut self.is_adult, patch.is_adult);
        merge(&mut self.genres, patch.genres);
        merge(&mut self.synonyms, patch.synonyms);
        merge(&mut self.tags, patch.tags);
        merge(&mut self.cover_image_id, patch.cover_image_id);
        merge(&mut self.banner_image_id, patch.banner_image_id);
        merge(&mut self.cover_image_file, patch.cover_image_file);
        merge(&mut self.banner_image_file, patch.banner_image_file);
    }

    fn media_slots() -> &'static [MediaSlot] {
        &SERIES_MEDIA_SLOTS
    }

    fn pending_upload(&self, slot: MediaSlot) -> Option<&UploadFile> {
        match slot {
            MediaSlot::Cover => self.cover_image_file.as_ref(),
            MediaSlot::Banner => self.banner_image_file.as_ref(),
        }
    }

    fn media_id(&self, slot: MediaSlot) -> Option<&MediaId> {
        match slot {
            MediaSlot::Cover => self.cover_image_id.as_ref(),
            MediaSlot::Banner => self.banner_image_id.as_ref(),
        }
    }

    fn resolve_media(&mut self, slot: MediaSlot, id: MediaId) {
        match slot {
            MediaSlot::Cover => {
                self.cover_image_id = Some(id);
                self.cover_image_file = None;
            }
            MediaSlot::Banner => {
                self.banner_image_id = Some(id);
                self.banner_image_file = None;
            }
        }
    }

    fn clear_transient(&mut self) {
        self.cover_image_file = None;
        self.banner_image_file = None;
    }

    fn create_payload(&self) -> Result<Value, DomainError> {
        for slot in Self::media_slots() {
            if self.pending_upload(*slot).is_some() {
                return Err(DomainError::UnresolvedMedia { slot: *slot });
            }
        }

        let series_type = self
            .series_type
            .ok_or_else(|| DomainError::validation("series type is required"))?;
        let format = self
            .format
            .ok_or_else(|| DomainError::validation("series format is required"))?;
        let status = self
            .status
            .ok_or_else(|| DomainError::validation("series status is required"))?;

        let payload = CreateSeriesPayload {
            title: TitlePayload::from(&self.title),
            series_type,
            format,
            status,
            description: self.description.as_deref(),
            start_date: self.start_date,
            end_date: self.end_date,
            season: self.season,
            season_year: self.season_year,
            episodes: self.episodes,
            duration: self.duration,
            chapters: self.chapters,
            volumes: self.volumes,
            source: self.source,
            country_of_origin: self.country_of_origin.as_deref(),
            is_adult: self.is_adult,
            genres: &self.genres,
            synonyms: &self.synonyms,
            tags: &self.tags,
            cover_image_id: self.cover_image_id.as_ref(),
            banner_image_id: self.banner_image_id.as_ref(),
        };

        Ok(serde_json::to_value(payload)?)
    }
}

//! Simple test fixtures used across unit tests.

use backoffice_domain::{
    EntityId, FuzzyDate, SeriesDraft, SeriesFormat, SeriesStatus, SeriesTitle, SeriesType,
    UploadFile,
};
use serde_json::json;

use crate::ports::outbound::CreatedEntity;

/// A series that passes every required step
pub fn complete_series() -> SeriesDraft {
    SeriesDraft {
        title: SeriesTitle {
            romaji: "Mushishi".to_string(),
            english: Some("Mushi-Shi".to_string()),
            ..Default::default()
        },
        series_type: Some(SeriesType::Anime),
        format: Some(SeriesFormat::Tv),
        status: Some(SeriesStatus::Finished),
        start_date: FuzzyDate::new(Some(2005), Some(10), Some(23)),
        episodes: Some(26),
        ..Default::default()
    }
}

pub fn cover_file() -> UploadFile {
    UploadFile::new("cover.png", "image/png", vec![1, 2, 3])
}

pub fn banner_file() -> UploadFile {
    UploadFile::new("banner.jpg", "image/jpeg", vec![4, 5, 6, 7])
}

pub fn created(id: &str) -> CreatedEntity {
    CreatedEntity {
        id: EntityId::new(id).unwrap(),
        body: json!({ "id": id }),
    }
}

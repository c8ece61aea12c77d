// src/domain/content.rs
//
// Content records: one row per movie or series in the catalog.

use serde::{Deserialize, Serialize};

/// Whether a content row is a standalone movie or an episodic series.
///
/// Stored in the `content.kind` column as `'movie'` / `'series'`
/// (the column carries a CHECK constraint for exactly these values).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Movie,
    Series,
}

impl ContentKind {
    /// Column value for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Movie => "movie",
            ContentKind::Series => "series",
        }
    }

    /// Parse a column value back into a kind.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "movie" => Some(ContentKind::Movie),
            "series" => Some(ContentKind::Series),
            _ => None,
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single catalog entry (movie or series).
///
/// `id` is a surrogate integer assigned by the store on insert and is
/// never supplied by callers. Every other field is free-form text the
/// way the catalog UI entered it; URL fields are opaque locators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Store-assigned surrogate id
    pub id: i64,

    pub title: String,

    /// Release year
    pub year: i64,

    /// Free-form genre label, e.g. "Action/Adventure"
    pub genre: String,

    /// Free-form rating, e.g. "8.6"
    pub rating: String,

    /// Opaque poster locator
    pub poster_url: String,

    /// Opaque banner locator
    pub banner_url: String,

    pub kind: ContentKind,

    /// Free-form duration, e.g. "3h 34m" or "24m per episode"
    pub duration: String,

    pub overview: String,

    /// Playback locator; movies only, empty for series
    pub streaming_url: String,
}

/// Input to `add_content`: every `ContentRecord` field except `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContent {
    pub title: String,
    pub year: i64,
    pub genre: String,
    pub rating: String,
    pub poster_url: String,
    pub banner_url: String,
    pub kind: ContentKind,
    pub duration: String,
    pub overview: String,
    pub streaming_url: String,
}

/// Input to `update_content`: only the supplied fields are written.
///
/// An all-`None` patch is a complete no-op (no SQL, no persistence).
/// `kind` is patchable; the store has never enforced kind
/// immutability, and the update surface keeps that contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentPatch {
    pub title: Option<String>,
    pub year: Option<i64>,
    pub genre: Option<String>,
    pub rating: Option<String>,
    pub poster_url: Option<String>,
    pub banner_url: Option<String>,
    pub kind: Option<ContentKind>,
    pub duration: Option<String>,
    pub overview: Option<String>,
    pub streaming_url: Option<String>,
}

impl ContentPatch {
    /// True when no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.year.is_none()
            && self.genre.is_none()
            && self.rating.is_none()
            && self.poster_url.is_none()
            && self.banner_url.is_none()
            && self.kind.is_none()
            && self.duration.is_none()
            && self.overview.is_none()
            && self.streaming_url.is_none()
    }
}

/// A content row joined with all of its dependent rows.
///
/// Episodes are ordered by `episode_number` ascending; cast and crew
/// keep insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDetails {
    pub content: ContentRecord,
    pub episodes: Vec<crate::domain::episode::EpisodeRecord>,
    pub cast: Vec<crate::domain::credits::CastMemberRecord>,
    pub crew: Vec<crate::domain::credits::CrewMemberRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_column_value() {
        assert_eq!(ContentKind::parse("movie"), Some(ContentKind::Movie));
        assert_eq!(ContentKind::parse("series"), Some(ContentKind::Series));
        assert_eq!(ContentKind::Movie.as_str(), "movie");
        assert_eq!(ContentKind::Series.to_string(), "series");
    }

    #[test]
    fn test_kind_rejects_unknown_column_value() {
        assert_eq!(ContentKind::parse("documentary"), None);
        assert_eq!(ContentKind::parse(""), None);
        assert_eq!(ContentKind::parse("Movie"), None);
    }

    #[test]
    fn test_default_patch_is_empty() {
        assert!(ContentPatch::default().is_empty());
    }

    #[test]
    fn test_patch_with_any_field_is_not_empty() {
        let patch = ContentPatch {
            title: Some("New".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());

        let patch = ContentPatch {
            kind: Some(ContentKind::Series),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}

// src/domain/episode.rs

use serde::{Deserialize, Serialize};

/// One episode of a series.
///
/// `episode_number` is the 1-based position within the series; the
/// store orders detail reads by it. `url` is the playback locator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Store-assigned surrogate id
    pub id: i64,

    /// Owning content row
    pub content_id: i64,

    pub episode_number: u32,

    pub title: String,

    /// Playback locator
    pub url: String,
}

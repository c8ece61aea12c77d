// src/domain/credits.rs
//
// Cast and crew credits attached to a content row. The two shapes are
// identical today but live in separate tables and separate types: the
// catalog treats acting credits and production credits as distinct
// lists, and the shapes are free to diverge (e.g. cast photos).

use serde::{Deserialize, Serialize};

/// An acting credit: `role` is the character played.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMemberRecord {
    /// Store-assigned surrogate id
    pub id: i64,

    /// Owning content row
    pub content_id: i64,

    pub name: String,

    /// Character name, e.g. "Major Iqbal"
    pub role: String,
}

/// A production credit: `role` is the job title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMemberRecord {
    /// Store-assigned surrogate id
    pub id: i64,

    /// Owning content row
    pub content_id: i64,

    pub name: String,

    /// Job title, e.g. "Director"
    pub role: String,
}

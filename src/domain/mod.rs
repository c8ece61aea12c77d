// src/domain/mod.rs
//
// Record shapes stored in the catalog. Pure data: no SQL, no IO.

pub mod content;
pub mod credits;
pub mod episode;

pub use content::{ContentDetails, ContentKind, ContentPatch, ContentRecord, NewContent};
pub use credits::{CastMemberRecord, CrewMemberRecord};
pub use episode::EpisodeRecord;

// src/lib.rs
// Pavi Catalog - Local-first streaming catalog store
//
// Architecture:
// - In-memory SQL: the whole catalog lives in one SQLite database
// - Serialize-on-write: every mutation snapshots the database into a
//   storage slot; reopening restores the image byte for byte
// - Explicit: No implicit behavior, no hidden refreshes
// - Local-first: User controls all data, including full export

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;
pub mod store;

// ============================================================================
// PUBLIC API - Domain Records
// ============================================================================

pub use domain::{
    CastMemberRecord,
    ContentDetails,
    ContentKind,
    ContentPatch,
    ContentRecord,
    CrewMemberRecord,
    EpisodeRecord,
    NewContent,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{CatalogError, CatalogResult};

// ============================================================================
// PUBLIC API - Store
// ============================================================================

pub use store::{CatalogStore, FileSlot, MemorySlot, StorageSlot, StoreStats, STORE_IMAGE_KEY};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{CatalogRepository, SqliteCatalogRepository};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::ContentProvider;

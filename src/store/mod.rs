// src/store/mod.rs
//
// Store module
//
// Provides:
// - Storage slots (file-backed and in-memory)
// - The database image codec
// - Schema initialization and seeding
// - The catalog store handle

pub mod codec;
pub mod handle;
pub mod schema;
pub mod seed;
pub mod slot;

pub use handle::{CatalogStore, STORE_IMAGE_KEY};
pub use schema::{collect_stats, create_tables, verify_integrity, StoreStats};
pub use slot::{FileSlot, MemorySlot, StorageSlot};

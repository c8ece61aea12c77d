// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - Explicit SQL only
// - Every mutation persists before returning

pub mod catalog_repository;

pub use catalog_repository::{CatalogRepository, SqliteCatalogRepository};

#[cfg(test)]
pub use catalog_repository::MockCatalogRepository;

// src/services/mod.rs
//
// Services Module - Consumer Surface

pub mod content_provider;

pub use content_provider::ContentProvider;

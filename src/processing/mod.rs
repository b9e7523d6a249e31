// src/processing/mod.rs
pub mod extractor;
pub mod indices;

// Re-export main components
pub use extractor::{IndexResult, VegetationIndexExtractor};

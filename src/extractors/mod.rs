// src/extractors/mod.rs
pub mod company;
pub mod index;
pub mod section;

// Re-export key extraction types for convenience
pub use index::{IndexResolver, SectionEntry, ANCHOR_SECTION};
pub use section::{ExtractionResult, SectionExtractor};

// src/pdf/mod.rs
pub mod document;

pub use document::{FilingDocument, PageSource};

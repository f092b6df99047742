// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum PdfError {
    #[error("Failed to open PDF document: {0}")]
    Load(String),
}

// "Not found" variants are data conditions, not faults: the entry point
// reports them as {error} objects instead of terminating the process.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Section '{0}' not found in the index.")]
    SectionNotFound(String),

    #[error("Section '{0}' not found on the expected pages.")]
    SectionNotFoundOnExpectedPage(String),

    #[error("Invalid filing date: '{0}'")]
    InvalidDate(String),

    #[error("Regular expression error: {0}")]
    Regex(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("PDF access failed: {0}")]
    Pdf(#[from] PdfError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

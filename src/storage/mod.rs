// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::extractors::company::CompanyInfo;
use crate::extractors::{ExtractionResult, SectionEntry};
use crate::utils::error::StorageError;

// Fixed output file names; each run overwrites the previous one.
const SECTION_DATA_FILE: &str = "section_data.json";
const SECTION_INDEX_FILE: &str = "section_index.json";
const COMPANY_INFO_FILE: &str = "company_info.json";

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::Io)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Saves the extraction result to `section_data.json`
    pub fn save_section_data(&self, result: &ExtractionResult) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(SECTION_DATA_FILE);

        let json = serde_json::to_string_pretty(result)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&file_path, json).map_err(StorageError::Io)?;

        tracing::info!("Saved section data to {}", file_path.display());
        Ok(file_path)
    }

    /// Writes an `{"error": ...}` object to `section_data.json` in place of
    /// a result, so a failed run never leaves partial section content.
    pub fn save_extraction_error(&self, message: &str) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(SECTION_DATA_FILE);

        let payload = serde_json::json!({ "error": message });
        let json = serde_json::to_string_pretty(&payload)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&file_path, json).map_err(StorageError::Io)?;

        tracing::info!("Saved extraction error to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves the resolved section list to `section_index.json` as an array
    /// of `{section_name, page}` objects
    pub fn save_section_index(&self, sections: &[SectionEntry]) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(SECTION_INDEX_FILE);

        let json = serde_json::to_string_pretty(sections)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&file_path, json).map_err(StorageError::Io)?;

        tracing::info!("Saved section index to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves company metadata to `company_info.json`
    pub fn save_company_info(&self, info: &CompanyInfo) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(COMPANY_INFO_FILE);

        let metadata = serde_json::json!({
            "company_name": info.company_name,
            "filing_date": info.filing_date,
            "fiscal_quarter": info.fiscal_quarter,
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let json = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&file_path, json).map_err(StorageError::Io)?;

        tracing::info!("Saved company info to {}", file_path.display());
        Ok(file_path)
    }
}

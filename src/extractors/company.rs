// src/extractors/company.rs

// --- Imports ---
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::pdf::PageSource;
use crate::utils::error::ExtractError;

// --- Constants ---
/// Sentinel recorded when a cover-page field cannot be matched.
const NOT_FOUND: &str = "Not Found";

// --- Regex Patterns (Lazy Static) ---
// Cover-page fields, per the standard 10-Q cover layout: the registrant
// name sits on the line above "(Exact name of registrant", the period-end
// date follows "For the quarterly period ended".
static COMPANY_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:\n|^)\s*(.*?)\n\(Exact name of registrant")
        .expect("Failed to compile COMPANY_NAME_RE")
});

static FILING_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"For the quarterly period ended\s+([A-Za-z]+ \d{1,2}, \d{4})")
        .expect("Failed to compile FILING_DATE_RE")
});

// --- Data Structures ---
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub company_name: String,
    /// Period-end date as printed on the cover, e.g. "January 27, 2024".
    pub filing_date: String,
    /// Calendar quarter of the period-end date; `None` when the date did
    /// not parse.
    pub fiscal_quarter: Option<String>,
}

// --- Extraction ---
/// Reads company name and filing date from the cover page (page 1).
/// Missing fields come back as "Not Found" sentinels; this never fails.
pub fn extract_company_info<D: PageSource>(doc: &D) -> CompanyInfo {
    let text = doc.page_text(0).unwrap_or_default();

    let company_name = COMPANY_NAME_RE
        .captures(&text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| NOT_FOUND.to_string());

    let filing_date = FILING_DATE_RE
        .captures(&text)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_else(|| NOT_FOUND.to_string());

    let fiscal_quarter = match fiscal_quarter(&filing_date) {
        Ok(q) => Some(q),
        Err(e) => {
            tracing::warn!("Could not derive fiscal quarter: {}", e);
            None
        }
    };

    tracing::info!(
        "Cover page: company '{}', period ended '{}'",
        company_name,
        filing_date
    );

    CompanyInfo {
        company_name,
        filing_date,
        fiscal_quarter,
    }
}

/// Maps a "Month D, YYYY" period-end date to its calendar quarter
/// ("Q1".."Q4"). A date that does not parse yields `InvalidDate`.
pub fn fiscal_quarter(date: &str) -> Result<String, ExtractError> {
    let parsed = NaiveDate::parse_from_str(date.trim(), "%B %d, %Y")
        .map_err(|_| ExtractError::InvalidDate(date.to_string()))?;

    let quarter = (parsed.month() - 1) / 3 + 1;
    Ok(format!("Q{}", quarter))
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::document::PageBuffer;

    #[test]
    fn reads_name_and_date_from_cover_page() {
        let cover = "\
            UNITED STATES SECURITIES AND EXCHANGE COMMISSION\n\
            FORM 10-Q\n\
            For the quarterly period ended January 27, 2024\n\
            CISCO SYSTEMS, INC.\n\
            (Exact name of registrant as specified in its charter)\n";
        let doc = PageBuffer::with_blank_prefix(0, &[cover]);

        let info = extract_company_info(&doc);

        assert_eq!(info.company_name, "CISCO SYSTEMS, INC.");
        assert_eq!(info.filing_date, "January 27, 2024");
        assert_eq!(info.fiscal_quarter.as_deref(), Some("Q1"));
    }

    #[test]
    fn missing_fields_fall_back_to_sentinels() {
        let doc = PageBuffer::with_blank_prefix(0, &["An unrelated first page."]);

        let info = extract_company_info(&doc);

        assert_eq!(info.company_name, "Not Found");
        assert_eq!(info.filing_date, "Not Found");
        assert_eq!(info.fiscal_quarter, None);
    }

    #[test]
    fn quarter_mapping_covers_all_months() {
        assert_eq!(fiscal_quarter("February 3, 2024").unwrap(), "Q1");
        assert_eq!(fiscal_quarter("April 30, 2024").unwrap(), "Q2");
        assert_eq!(fiscal_quarter("September 28, 2024").unwrap(), "Q3");
        assert_eq!(fiscal_quarter("December 31, 2024").unwrap(), "Q4");
    }

    #[test]
    fn malformed_date_yields_invalid_date() {
        let err = fiscal_quarter("sometime in 2024").unwrap_err();
        assert!(matches!(err, ExtractError::InvalidDate(_)));

        let err = fiscal_quarter("Not Found").unwrap_err();
        assert!(matches!(err, ExtractError::InvalidDate(_)));
    }
}

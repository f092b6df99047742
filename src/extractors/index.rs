// src/extractors/index.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::pdf::PageSource;

// --- Constants ---
/// 0-based page holding the section index. The 10-Q layout convention puts
/// it on the second page of the document.
const INDEX_PAGE: usize = 1;

/// Heading of the first section, which this filing format leaves out of the
/// index listing. See [`IndexResolver::locate_anchor_heading`].
pub const ANCHOR_SECTION: &str = "Item 1. Financial Statements";

// --- Regex Patterns (Lazy Static) ---
// One index line: "Item <N>. <title>" followed by a trailing page number.
// Match order on the index page is reading order.
static INDEX_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(Item\s+\d+\..*?)\s+(\d+)").expect("Failed to compile INDEX_LINE_RE")
});

// --- Data Structures ---
/// One section listed in the filing index. `page` is the 1-based page
/// number printed next to the label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionEntry {
    #[serde(rename = "section_name")]
    pub label: String,
    pub page: u32,
}

// --- Index Resolver ---
pub struct IndexResolver;

impl IndexResolver {
    pub fn new() -> Self {
        Self
    }

    /// Parses the index page into an ordered section list.
    ///
    /// The list reflects physical document order and is unique by label.
    /// An index page with no parseable lines yields an empty list; that is
    /// a data condition, not an error, and callers must tolerate it.
    pub fn resolve<D: PageSource>(&self, doc: &D) -> Vec<SectionEntry> {
        let mut sections = self.parse_index_page(doc);

        if !Self::lists_anchor(&sections) {
            match self.locate_anchor_heading(doc) {
                Some(page) => {
                    tracing::info!("'{}' located by page scan, starts on page {}", ANCHOR_SECTION, page);
                    sections.insert(
                        0,
                        SectionEntry {
                            label: ANCHOR_SECTION.to_string(),
                            page,
                        },
                    );
                }
                None => {
                    tracing::warn!(
                        "Heading '{}' not found on any body page; continuing without it",
                        ANCHOR_SECTION
                    );
                }
            }
        }

        sections
    }

    /// Generic index parse: every "Item N. <title> <page>" occurrence on
    /// the designated index page, first occurrence wins on duplicate labels.
    fn parse_index_page<D: PageSource>(&self, doc: &D) -> Vec<SectionEntry> {
        let Some(text) = doc.page_text(INDEX_PAGE) else {
            tracing::warn!("Index page {} yielded no text", INDEX_PAGE + 1);
            return Vec::new();
        };

        let mut sections: Vec<SectionEntry> = Vec::new();
        for caps in INDEX_LINE_RE.captures_iter(&text) {
            let label = caps[1].trim().to_string();
            let Ok(page) = caps[2].parse::<u32>() else {
                continue;
            };

            if sections.iter().any(|s| s.label.eq_ignore_ascii_case(&label)) {
                tracing::debug!("Skipping duplicate index entry '{}'", label);
                continue;
            }
            sections.push(SectionEntry { label, page });
        }

        if sections.is_empty() {
            tracing::warn!("No section entries parsed from the index page");
        } else {
            tracing::debug!("Parsed {} section entries from the index page", sections.len());
        }
        sections
    }

    fn lists_anchor(sections: &[SectionEntry]) -> bool {
        let anchor = ANCHOR_SECTION.to_lowercase();
        sections.iter().any(|s| s.label.to_lowercase().contains(&anchor))
    }

    /// Named fallback for the unlisted first section: scan body pages after
    /// the index until one contains the anchor heading literally. A miss is
    /// non-fatal; the resolver proceeds without the entry.
    fn locate_anchor_heading<D: PageSource>(&self, doc: &D) -> Option<u32> {
        let heading_re = Regex::new(&format!("(?i){}", regex::escape(ANCHOR_SECTION)))
            .expect("Failed to compile anchor heading pattern");

        for i in (INDEX_PAGE + 1)..doc.page_count() {
            let Some(text) = doc.page_text(i) else {
                continue;
            };
            if heading_re.is_match(&text) {
                return Some((i + 1) as u32);
            }
        }
        None
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::document::PageBuffer;

    const COVER: &str = "CISCO SYSTEMS, INC.\nFORM 10-Q";

    #[test]
    fn parses_index_lines_in_reading_order() {
        let index = "\
            INDEX\n\
            Item 1. Financial Statements 3\n\
            Item 2. Management's Discussion and Analysis of Financial Condition 45\n\
            Item 3. Quantitative and Qualitative Disclosures About Market Risk 52\n";
        let doc = PageBuffer::with_blank_prefix(0, &[COVER, index]);

        let sections = IndexResolver::new().resolve(&doc);

        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].label, "Item 1. Financial Statements");
        assert_eq!(sections[0].page, 3);
        assert_eq!(
            sections[1].label,
            "Item 2. Management's Discussion and Analysis of Financial Condition"
        );
        assert_eq!(sections[1].page, 45);
        assert_eq!(sections[2].page, 52);
    }

    #[test]
    fn unparseable_index_yields_empty_list() {
        let doc = PageBuffer::with_blank_prefix(0, &[COVER, "No table of contents here."]);

        // Body pages are scanned for the anchor heading too, so keep them
        // free of it; an empty list must come back without an error.
        let sections = IndexResolver::new().resolve(&doc);
        assert!(sections.is_empty());
    }

    #[test]
    fn patches_unlisted_anchor_section_from_body_scan() {
        let index = "\
            INDEX\n\
            Item 2. Management's Discussion and Analysis 45\n\
            Item 3. Quantitative and Qualitative Disclosures 52\n";
        let body = "PART I\nItem 1. Financial Statements\nCondensed balance sheets follow.";
        // Pages: cover, index, filler, heading on 0-based page 3 (page 4).
        let doc = PageBuffer::with_blank_prefix(0, &[COVER, index, "forward-looking statements", body]);

        let sections = IndexResolver::new().resolve(&doc);

        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].label, ANCHOR_SECTION);
        assert_eq!(sections[0].page, 4);
        assert_eq!(sections[1].page, 45);
    }

    #[test]
    fn anchor_miss_is_non_fatal() {
        let index = "INDEX\nItem 2. Management's Discussion and Analysis 45\n";
        let doc = PageBuffer::with_blank_prefix(0, &[COVER, index, "no headings here", "none here either"]);

        let sections = IndexResolver::new().resolve(&doc);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].label, "Item 2. Management's Discussion and Analysis");
    }

    #[test]
    fn anchor_listed_in_index_skips_body_scan() {
        let index = "\
            INDEX\n\
            Item 1. Financial Statements 3\n\
            Item 2. Management's Discussion and Analysis 45\n";
        // The heading also appears on a body page; no duplicate entry may
        // be patched in.
        let body = "Item 1. Financial Statements\n...";
        let doc = PageBuffer::with_blank_prefix(0, &[COVER, index, body]);

        let sections = IndexResolver::new().resolve(&doc);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].page, 3);
    }

    #[test]
    fn duplicate_labels_keep_first_occurrence() {
        let index = "\
            Item 2. Management's Discussion and Analysis 45\n\
            Item 2. Management's Discussion and Analysis 99\n";
        let doc = PageBuffer::with_blank_prefix(0, &[COVER, index, "Item 1. Financial Statements"]);

        let sections = IndexResolver::new().resolve(&doc);

        let mda: Vec<_> = sections.iter().filter(|s| s.page == 45 || s.page == 99).collect();
        assert_eq!(mda.len(), 1);
        assert_eq!(mda[0].page, 45);
    }
}

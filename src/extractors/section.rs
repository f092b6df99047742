// src/extractors/section.rs

// --- Imports ---
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::extractors::index::SectionEntry;
use crate::pdf::PageSource;
use crate::utils::error::ExtractError;

// --- Data Structures ---
/// Verbatim text of one section, spanning from its heading's first
/// occurrence up to (but excluding) the next section's heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub section_name: String,
    /// 1-based page the section starts on, per the filing index.
    pub start_page: u32,
    /// 1-based page of the following section; `None` when the target is
    /// the last section in the document.
    pub end_page: Option<u32>,
    pub content: String,
}

// --- Section Extractor ---
pub struct SectionExtractor;

impl SectionExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Finds `target_label` in the resolved section list and returns the
    /// matching entry together with its successor (the section whose
    /// heading terminates the extraction window).
    ///
    /// Matching is case-insensitive substring containment, so "item 3"
    /// finds "Item 3. Quantitative and Qualitative Disclosures...".
    pub fn lookup<'a>(
        sections: &'a [SectionEntry],
        target_label: &str,
    ) -> Option<(&'a SectionEntry, Option<&'a SectionEntry>)> {
        let needle = target_label.to_lowercase();
        sections
            .iter()
            .position(|s| s.label.to_lowercase().contains(&needle))
            .map(|i| (&sections[i], sections.get(i + 1)))
    }

    /// Extracts the target section's text from its heading's first
    /// occurrence up to the next section's heading, or to the end of the
    /// document when the target is the last section.
    pub fn extract<D: PageSource>(
        &self,
        doc: &D,
        sections: &[SectionEntry],
        target_label: &str,
    ) -> Result<ExtractionResult, ExtractError> {
        let (entry, next) = Self::lookup(sections, target_label)
            .ok_or_else(|| ExtractError::SectionNotFound(target_label.to_string()))?;

        let start_page = entry.page;
        let next_page = next.map(|n| n.page);

        tracing::info!("Section '{}' starts on page {}", entry.label, start_page);
        if let Some(n) = next {
            tracing::info!("Next section '{}' starts on page {}", n.label, n.page);
        }

        let target_re = label_pattern(target_label)?;
        let next_re = next.map(|n| label_pattern(&n.label)).transpose()?;

        let mut fragments: Vec<String> = Vec::new();
        let mut found_section = false;

        // The heading is taken to sit on its recorded start page, so the
        // scan begins there (index pages are 1-based, page access 0-based).
        let start_index = (start_page as usize).saturating_sub(1);

        'scan: for i in start_index..doc.page_count() {
            let Some(text) = doc.page_text(i) else {
                continue;
            };

            if found_section {
                // Next section opens on this page: keep only what precedes
                // its heading.
                if let Some(m) = next_re.as_ref().and_then(|re| re.find(&text)) {
                    fragments.push(text[..m.start()].to_string());
                    break 'scan;
                }

                fragments.push(text);

                // Page-number fallback for headings the text scan cannot
                // see (split across pages, rendered as an image): stop at
                // the last page before the next section's recorded page.
                if let Some(np) = next_page {
                    if i + 2 == np as usize {
                        tracing::debug!("Stopping at page {} via next-section page number", i + 1);
                        break 'scan;
                    }
                }
            } else if let Some(m) = target_re.find(&text) {
                found_section = true;
                let fragment = &text[m.start()..];

                // Same-page case: both headings on one physical page.
                if let Some(nm) = next_re.as_ref().and_then(|re| re.find(fragment)) {
                    fragments.push(fragment[..nm.start()].to_string());
                    break 'scan;
                }

                fragments.push(fragment.to_string());
            }
        }

        if !found_section {
            return Err(ExtractError::SectionNotFoundOnExpectedPage(
                target_label.to_string(),
            ));
        }

        let content = fragments.join("\n");
        tracing::info!(
            "Extracted '{}': {} characters from page {}",
            target_label,
            content.len(),
            start_page
        );

        Ok(ExtractionResult {
            section_name: target_label.to_string(),
            start_page,
            end_page: next_page,
            content,
        })
    }
}

/// Compiles a section label into a case-insensitive literal matcher.
/// Labels are free text and may contain regex metacharacters, so the label
/// is escaped before compilation.
fn label_pattern(label: &str) -> Result<Regex, ExtractError> {
    Regex::new(&format!("(?i){}", regex::escape(label)))
        .map_err(|e| ExtractError::Regex(e.to_string()))
}

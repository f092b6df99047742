// src/pdf/document.rs
use std::path::Path;

use lopdf::Document;

use crate::utils::error::PdfError;

/// Read access to the extracted plain text of a document's pages.
///
/// Page indices are 0-based. `page_text` returns `None` for out-of-range
/// pages and for pages whose text cannot be extracted (image-only or damaged
/// content streams); callers skip such pages instead of failing the scan.
pub trait PageSource {
    fn page_count(&self) -> usize;
    fn page_text(&self, page_index: usize) -> Option<String>;
}

/// A quarterly filing opened from disk, backed by lopdf.
///
/// Each extraction run opens its own document; the handle is released when
/// this value is dropped.
pub struct FilingDocument {
    doc: Document,
    page_count: usize,
}

impl FilingDocument {
    /// Opens the PDF at `path`. An unopenable document is a fatal error,
    /// unlike per-page extraction failures.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PdfError> {
        let path = path.as_ref();
        let doc = Document::load(path).map_err(|e| PdfError::Load(e.to_string()))?;
        let page_count = doc.get_pages().len();

        tracing::debug!("Opened {} ({} pages)", path.display(), page_count);
        Ok(Self { doc, page_count })
    }
}

impl PageSource for FilingDocument {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_text(&self, page_index: usize) -> Option<String> {
        if page_index >= self.page_count {
            return None;
        }

        // lopdf numbers pages from 1.
        let page_no = (page_index + 1) as u32;
        match self.doc.extract_text(&[page_no]) {
            Ok(text) if !text.trim().is_empty() => Some(text),
            Ok(_) => {
                tracing::debug!("Page {} has no extractable text", page_no);
                None
            }
            Err(e) => {
                tracing::warn!("Text extraction failed for page {}: {}", page_no, e);
                None
            }
        }
    }
}

/// In-memory page source for extractor tests: one entry per page, `None`
/// standing in for an unparseable page.
#[cfg(test)]
pub struct PageBuffer(pub Vec<Option<String>>);

#[cfg(test)]
impl PageBuffer {
    /// Builds a buffer whose first `blank_prefix` pages are empty, followed
    /// by the given page texts. Keeps tests with high page numbers short.
    pub fn with_blank_prefix(blank_prefix: usize, pages: &[&str]) -> Self {
        let mut all: Vec<Option<String>> = vec![Some(String::new()); blank_prefix];
        all.extend(pages.iter().map(|p| Some((*p).to_string())));
        Self(all)
    }
}

#[cfg(test)]
impl PageSource for PageBuffer {
    fn page_count(&self) -> usize {
        self.0.len()
    }

    fn page_text(&self, page_index: usize) -> Option<String> {
        self.0
            .get(page_index)?
            .as_ref()
            .filter(|t| !t.trim().is_empty())
            .cloned()
    }
}

// src/utils/text_debug.rs
use std::fs;
use std::path::Path;

use crate::pdf::PageSource;
use crate::utils::error::AppError;

/// Dumps every page's extracted text to `<debug_dir>/page_NNN.txt`.
///
/// When a heading fails to match, the dump shows exactly what the extractor
/// saw for each page, which is usually enough to spot a mangled index line
/// or an image-only page.
pub fn dump_page_text<D: PageSource>(doc: &D, debug_dir: &Path) -> Result<(), AppError> {
    fs::create_dir_all(debug_dir)?;

    for i in 0..doc.page_count() {
        let path = debug_dir.join(format!("page_{:03}.txt", i + 1));
        let text = doc.page_text(i).unwrap_or_default();
        fs::write(&path, text)?;
    }

    tracing::info!(
        "Dumped extracted text for {} pages to {}",
        doc.page_count(),
        debug_dir.display()
    );
    Ok(())
}

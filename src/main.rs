// src/main.rs
mod extractors;
mod pdf;
mod storage;
mod utils;

use std::io::{self, Write};
use std::path::Path;

use clap::Parser;

use extractors::company;
use extractors::{ExtractionResult, IndexResolver, SectionEntry, SectionExtractor, ANCHOR_SECTION};
use pdf::{FilingDocument, PageSource};
use storage::StorageManager;
use utils::error::ExtractError;
use utils::AppError;

/// Command Line Interface for the 10-Q section extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the 10-Q PDF document (prompted for when omitted)
    #[arg(short, long)]
    pdf: Option<String>,

    /// Section label to extract, e.g. "Item 2. Management's Discussion"
    /// (prompted for when omitted)
    #[arg(short, long)]
    section: Option<String>,

    /// Output directory for the extracted JSON files
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Debug mode - dump each page's extracted text for inspection
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI arguments, prompting for anything not supplied
    let args = Args::parse();
    tracing::info!("Starting extraction for args: {:?}", args);

    let pdf_path = match args.pdf {
        Some(path) => path,
        None => prompt("Path to 10-Q PDF: ")?,
    };
    let section_label = match args.section {
        Some(label) => label,
        None => prompt("Section to extract: ")?,
    };
    if pdf_path.is_empty() {
        return Err(AppError::Config("No PDF path given".to_string()));
    }
    if section_label.is_empty() {
        return Err(AppError::Config("No section label given".to_string()));
    }

    // 3. Initialize storage
    let storage = StorageManager::new(&args.output_dir)?;

    // 4. Open the document; an unopenable file is fatal
    let document = FilingDocument::open(&pdf_path)?;
    tracing::info!("Opened {} ({} pages)", pdf_path, document.page_count());

    if args.debug {
        let debug_dir = Path::new(&args.output_dir).join("debug");
        utils::text_debug::dump_page_text(&document, &debug_dir)?;
    }

    // 5. Company metadata from the cover page
    let info = company::extract_company_info(&document);
    match &info.fiscal_quarter {
        Some(quarter) => println!(
            "Company: {} | Period ended: {} ({})",
            info.company_name, info.filing_date, quarter
        ),
        None => println!(
            "Company: {} | Period ended: {}",
            info.company_name, info.filing_date
        ),
    }
    storage.save_company_info(&info)?;

    // 6. Resolve the section index
    let resolver = IndexResolver::new();
    let sections = resolver.resolve(&document);
    tracing::info!("Resolved {} section entries", sections.len());
    storage.save_section_index(&sections)?;

    // 7. Dispatch extraction. "Item 1. Financial Statements" takes its own
    //    path: the index never lists it, so the lookup goes through the
    //    anchor entry the resolver patched in.
    let extractor = SectionExtractor::new();
    let result = if section_label.trim().eq_ignore_ascii_case(ANCHOR_SECTION) {
        extract_financial_statements(&extractor, &document, &sections)
    } else {
        extractor.extract(&document, &sections, &section_label)
    };

    // 8. Persist and report. "Not found" is a data condition: the error
    //    object is saved and the run still exits cleanly.
    match result {
        Ok(section) => {
            print_section(&section);
            storage.save_section_data(&section)?;
        }
        Err(e) => {
            eprintln!("{}", e);
            storage.save_extraction_error(&e.to_string())?;
        }
    }

    Ok(())
}

/// Specialized path for the financial-statements section: extraction always
/// targets the canonical anchor heading, whatever casing the user typed.
fn extract_financial_statements<D: PageSource>(
    extractor: &SectionExtractor,
    document: &D,
    sections: &[SectionEntry],
) -> Result<ExtractionResult, ExtractError> {
    tracing::info!("Using financial-statements path for '{}'", ANCHOR_SECTION);
    extractor.extract(document, sections, ANCHOR_SECTION)
}

fn print_section(section: &ExtractionResult) {
    match section.end_page {
        Some(end) => println!(
            "\nExtracted '{}' (pages {}-{}, {} characters):\n",
            section.section_name,
            section.start_page,
            end,
            section.content.len()
        ),
        None => println!(
            "\nExtracted '{}' (page {} to end of document, {} characters):\n",
            section.section_name,
            section.start_page,
            section.content.len()
        ),
    }
    println!("{}", section.content);
}

fn prompt(message: &str) -> Result<String, AppError> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

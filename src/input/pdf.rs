use super::{split_words, ExtractedText, LoadError};
use crate::segment::PagedText;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Load a PDF page by page using the pdf-extract crate.
///
/// Every word is tagged with the 1-based number of the page it was found on.
/// The page count includes pages that yield no text (scans, blank pages).
pub fn load(path: &Path) -> Result<ExtractedText, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }

    let mut file = File::open(path).map_err(|e| LoadError::PdfParse(e.to_string()))?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)
        .map_err(|e| LoadError::PdfParse(e.to_string()))?;

    let page_texts = pdf_extract::extract_text_from_mem_by_pages(&buffer)
        .map_err(|e| LoadError::PdfParse(e.to_string()))?;

    Ok(words_from_pages(
        &page_texts,
        format!("pdf:{}", path.display()),
    ))
}

/// Flattens per-page text into one paged word stream.
fn words_from_pages(page_texts: &[String], source: String) -> ExtractedText {
    let mut words = Vec::new();
    let mut pages = Vec::new();

    for (idx, page_text) in page_texts.iter().enumerate() {
        let page_num = u32::try_from(idx + 1).unwrap_or(u32::MAX);
        let page_words = split_words(page_text);
        pages.extend(std::iter::repeat(page_num).take(page_words.len()));
        words.extend(page_words);
    }

    ExtractedText {
        words: PagedText::new(words, pages),
        page_count: u32::try_from(page_texts.len()).unwrap_or(u32::MAX),
        source,
    }
}

use crate::config::ExtractionConfig;
use crate::segment::PagedText;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("PDF parse error: {0}")]
    PdfParse(String),

    #[error("EPUB parse error: {0}")]
    EpubParse(String),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File is empty: {0}")]
    EmptyFile(PathBuf),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Words extracted from one document, each tagged with its 1-based page.
#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub words: PagedText,
    /// Page count of the source document (real or synthesized)
    pub page_count: u32,
    /// Origin label such as `pdf:/path/to/file.pdf`
    pub source: String,
}

/// Splits extracted text the way every loader does: line breaks become
/// spaces, then the text is cut on single spaces and empty pieces dropped.
pub fn split_words(text: &str) -> Vec<String> {
    text.replace("\r\n", " ")
        .replace('\n', " ")
        .split(' ')
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Assigns synthetic pages of `words_per_page` words each.
pub fn paginate(words: Vec<String>, words_per_page: usize, source: String) -> ExtractedText {
    let per_page = words_per_page.max(1);
    let pages: Vec<u32> = (0..words.len())
        .map(|i| u32::try_from(i / per_page + 1).unwrap_or(u32::MAX))
        .collect();
    let page_count = u32::try_from(words.len().div_ceil(per_page)).unwrap_or(u32::MAX);

    ExtractedText {
        words: PagedText::new(words, pages),
        page_count,
        source,
    }
}

fn read_to_string(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a document and extracts its paged word stream.
///
/// The format is chosen from the file extension: `pdf`, `epub`,
/// `md`/`markdown` or `txt`/`text`.
pub fn load_document(path: &Path, config: &ExtractionConfig) -> Result<ExtractedText, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let extracted = match extension.as_str() {
        "pdf" => pdf::load(path)?,
        "epub" => epub::load(path, config)?,
        "md" | "markdown" => markdown::load(path, config)?,
        "txt" | "text" => text::load(path, config)?,
        other => {
            return Err(LoadError::UnsupportedFormat(if other.is_empty() {
                path.display().to_string()
            } else {
                other.to_string()
            }))
        }
    };

    info!(
        source = %extracted.source,
        words = extracted.words.len(),
        pages = extracted.page_count,
        "extracted document"
    );

    Ok(extracted)
}

pub mod epub;
pub mod markdown;
pub mod pdf;
pub mod text;

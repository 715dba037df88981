use super::{paginate, read_to_string, split_words, ExtractedText, LoadError};
use crate::config::ExtractionConfig;
use std::path::Path;

/// Load a plain UTF-8 text file and paginate it synthetically.
///
/// A file containing only whitespace is rejected as `EmptyFile`.
pub fn load(path: &Path, config: &ExtractionConfig) -> Result<ExtractedText, LoadError> {
    let content = read_to_string(path)?;

    if content.trim().is_empty() {
        return Err(LoadError::EmptyFile(path.to_path_buf()));
    }

    Ok(paginate(
        split_words(&content),
        config.words_per_page,
        format!("text:{}", path.display()),
    ))
}

use super::{paginate, read_to_string, split_words, ExtractedText, LoadError};
use crate::config::ExtractionConfig;
use pulldown_cmark::{Event, Options, Parser, TagEnd};
use std::path::Path;

/// Load a Markdown file, render it to plain text and paginate synthetically.
pub fn load(path: &Path, config: &ExtractionConfig) -> Result<ExtractedText, LoadError> {
    let content = read_to_string(path)?;

    if content.trim().is_empty() {
        return Err(LoadError::EmptyFile(path.to_path_buf()));
    }

    Ok(paginate(
        split_words(&markdown_to_text(&content)),
        config.words_per_page,
        format!("markdown:{}", path.display()),
    ))
}

/// Renders Markdown to the text a reader would see.
///
/// Markup is dropped; text, inline code and code blocks are kept, and every
/// block end becomes a line break.
pub fn markdown_to_text(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut text = String::new();
    for event in Parser::new_ext(markdown, options) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push('\n'),
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading { .. }
                | TagEnd::Item
                | TagEnd::CodeBlock
                | TagEnd::BlockQuote { .. }
                | TagEnd::TableCell
                | TagEnd::TableRow
                | TagEnd::TableHead,
            ) => text.push('\n'),
            _ => {}
        }
    }
    text
}

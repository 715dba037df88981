use super::{paginate, split_words, ExtractedText, LoadError};
use crate::config::ExtractionConfig;
use std::path::Path;
use tracing::debug;

/// Load text from an EPUB file using the epub crate.
///
/// Chapters are concatenated in spine order with their markup stripped.
/// EPUB has no fixed pages, so pages are synthesized from the word count.
pub fn load(path: &Path, config: &ExtractionConfig) -> Result<ExtractedText, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }

    let mut doc = epub::doc::EpubDoc::new(path).map_err(|e| LoadError::EpubParse(e.to_string()))?;

    let num_chapters = doc.get_num_chapters();

    if num_chapters == 0 {
        return Err(LoadError::EpubParse(
            "No chapters found in EPUB".to_string(),
        ));
    }

    let mut words = Vec::new();

    for chapter_idx in 0..num_chapters {
        if !doc.set_current_chapter(chapter_idx) {
            continue;
        }

        if let Some((chapter_content, _mime)) = doc.get_current_str() {
            let chapter_words = split_words(&extract_plain_text(&chapter_content));
            debug!(chapter = chapter_idx, words = chapter_words.len(), "read EPUB chapter");
            words.extend(chapter_words);
        }
    }

    Ok(paginate(
        words,
        config.words_per_page,
        format!("epub:{}", path.display()),
    ))
}

/// Tags whose boundaries separate words.
fn is_block_tag(name: &str) -> bool {
    matches!(
        name,
        "p" | "div"
            | "br"
            | "hr"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "li"
            | "ul"
            | "ol"
            | "tr"
            | "td"
            | "th"
            | "table"
            | "blockquote"
            | "section"
            | "article"
            | "header"
            | "footer"
            | "body"
            | "title"
            | "pre"
            | "dt"
            | "dd"
            | "figcaption"
    )
}

/// Extract plain text from chapter HTML by removing tags.
///
/// Text inside `<script>`/`<style>` and the document `<head>` is dropped, and
/// the common character entities are decoded.
fn extract_plain_text(html: &str) -> String {
    let mut result = String::new();
    let mut tag = String::new();
    let mut in_tag = false;
    let mut skip_depth = 0usize;

    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                tag.clear();
            }
            '>' if in_tag => {
                in_tag = false;
                let name: String = tag
                    .trim_start_matches('/')
                    .chars()
                    .take_while(|c| c.is_ascii_alphanumeric())
                    .collect::<String>()
                    .to_ascii_lowercase();
                if matches!(name.as_str(), "script" | "style" | "head") {
                    if tag.starts_with('/') {
                        skip_depth = skip_depth.saturating_sub(1);
                    } else if !tag.ends_with('/') {
                        skip_depth += 1;
                    }
                }
                // Inline tags (em, b, span, a, sup) must not split words
                if is_block_tag(&name) {
                    result.push('\n');
                }
            }
            _ if in_tag => tag.push(c),
            _ if skip_depth > 0 => {}
            _ => result.push(c),
        }
    }

    let decoded = result
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    decoded
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

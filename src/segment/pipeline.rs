use super::assembler::assemble_tokens;
use super::grouping::group_monosyllables;
use super::hyphen::repair_hyphens;
use super::stream::{PagedText, TokenStream, TokenizedDocument};
use crate::input::ExtractedText;
use tracing::debug;

/// Turns extracted words into weighted reading tokens.
///
/// Hyphen repair, monosyllable grouping and the rule-based assembler run in
/// that fixed order. The assembler regroups the already grouped output, so a
/// monosyllable can end up glued to a pair ("eu" + "de café").
pub fn build_reading_tokens(words: &PagedText) -> TokenStream {
    let repaired = repair_hyphens(words);
    let grouped = group_monosyllables(&repaired);
    let stream = assemble_tokens(&grouped);

    debug!(
        words = words.len(),
        repaired = repaired.len(),
        grouped = grouped.len(),
        tokens = stream.len(),
        "segmented word stream"
    );

    stream
}

pub fn process_document(extracted: ExtractedText) -> TokenizedDocument {
    let stream = build_reading_tokens(&extracted.words);
    TokenizedDocument::new(stream, extracted.page_count)
}

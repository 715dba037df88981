use super::classify::{
    count_words, has_trailing_punctuation, is_alphabetic_word, is_monosyllabic,
    strip_edge_punctuation,
};
use super::grouping::can_group_with_next;
use super::stream::{PagedText, TokenStream};

fn word_weight(token: &str) -> u32 {
    u32::try_from(count_words(token)).unwrap_or(u32::MAX).max(1)
}

/// Tokens waiting for a punctuation boundary.
///
/// Every token flushed from a segment is attributed to the page of the
/// segment's first token, not to its own page.
#[derive(Debug, Default)]
struct Segment {
    tokens: Vec<String>,
    first_page: Option<u32>,
}

impl Segment {
    fn push(&mut self, token: String, page: u32) {
        self.first_page.get_or_insert(page);
        self.tokens.push(token);
    }

    fn is_open(&self) -> bool {
        self.first_page.is_some()
    }

    /// Emits each pending token weighted by its word count and resets to empty.
    fn flush_into(&mut self, out: &mut TokenStream, fallback_page: u32) {
        let page = self.first_page.take().unwrap_or(fallback_page);
        for token in self.tokens.drain(..) {
            let weight = word_weight(&token);
            out.push(token, page, weight);
        }
    }
}

/// Builds the final weighted token stream.
///
/// Runs over already-grouped tokens and applies three rules in order:
/// 1. a monosyllabic alphabetic word with trailing punctuation closes the
///    pending segment and is emitted alone with weight 1 on its own page;
/// 2. any other monosyllable is paired with the next token and added to the
///    segment, flushing it if the pair ends in punctuation;
/// 3. everything else joins the segment, flushing it on trailing punctuation.
///
/// Whatever is still pending at the end is flushed as well.
pub fn assemble_tokens(input: &PagedText) -> TokenStream {
    let items = input.items();
    let pages = input.pages();
    let n = items.len();

    let mut out = TokenStream::new();
    let mut segment = Segment::default();

    let mut i = 0;
    while i < n {
        let current = items[i].as_str();
        let page = pages[i];
        let stripped = strip_edge_punctuation(current);

        if is_monosyllabic(stripped)
            && has_trailing_punctuation(current)
            && is_alphabetic_word(stripped)
        {
            if segment.is_open() {
                segment.flush_into(&mut out, page);
            }
            out.push(current.to_string(), page, 1);
            i += 1;
            continue;
        }

        if can_group_with_next(items, i) {
            let combined = format!("{} {}", current, items[i + 1]);
            let closes = has_trailing_punctuation(&combined);
            segment.push(combined, page);
            i += 2;
            if closes {
                segment.flush_into(&mut out, page);
            }
            continue;
        }

        segment.push(current.to_string(), page);
        i += 1;
        if has_trailing_punctuation(current) {
            segment.flush_into(&mut out, page);
        }
    }

    if let Some(&last_page) = pages.last() {
        segment.flush_into(&mut out, last_page);
    }

    out
}

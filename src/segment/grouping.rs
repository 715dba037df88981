use super::classify::{has_trailing_period, is_monosyllabic};
use super::stream::PagedText;

/// Whether the item at `i` may be glued to its right neighbour.
///
/// A monosyllable never bleeds across a sentence boundary: it must not end
/// with a period itself, and the raw item before it must not either.
pub(crate) fn can_group_with_next(items: &[String], i: usize) -> bool {
    let current = &items[i];
    let has_next = i + 1 < items.len();
    let after_period = i > 0 && has_trailing_period(&items[i - 1]);

    is_monosyllabic(current) && has_next && !has_trailing_period(current) && !after_period
}

/// Merges each monosyllabic word with the word after it.
///
/// `["eu", "gosto", "de", "café"]` becomes `["eu gosto", "de café"]`. A merged
/// pair keeps the page of its first word. Output is never longer than input.
pub fn group_monosyllables(input: &PagedText) -> PagedText {
    let items = input.items();
    let pages = input.pages();
    let mut output = PagedText::with_capacity(items.len());

    let mut i = 0;
    while i < items.len() {
        if can_group_with_next(items, i) {
            output.push(format!("{} {}", items[i], items[i + 1]), pages[i]);
            i += 2;
        } else {
            output.push(items[i].clone(), pages[i]);
            i += 1;
        }
    }

    output
}

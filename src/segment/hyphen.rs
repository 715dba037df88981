use super::classify::is_alphabetic_word;
use super::stream::PagedText;

/// Repairs hyphenation left behind by page-based text extraction.
///
/// Two patterns are merged, and the merged word keeps the page of its first part:
/// - spaced compounds: `"e" "-" "mail"` becomes `"e-mail"`
/// - line-wrap breaks: `"desenvolvi-" "mento"` becomes `"desenvolvimento"`
///
/// The continuation must be purely alphabetic, so numbers and punctuated
/// tokens are never glued on. The spaced form is checked first.
pub fn repair_hyphens(input: &PagedText) -> PagedText {
    let words = input.items();
    let pages = input.pages();
    let n = words.len();
    let mut output = PagedText::with_capacity(n);

    let mut i = 0;
    while i < n {
        let current = words[i].as_str();
        let page = pages[i];
        let next = words.get(i + 1).map(String::as_str);

        if current != "-" && next == Some("-") {
            if let Some(tail) = words.get(i + 2).filter(|w| is_alphabetic_word(w)) {
                output.push(format!("{current}-{tail}"), page);
                i += 3;
                continue;
            }
        }

        if let (Some(stem), Some(tail)) = (current.strip_suffix('-'), next) {
            if is_alphabetic_word(tail) {
                output.push(format!("{stem}{tail}"), page);
                i += 2;
                continue;
            }
        }

        output.push(current.to_string(), page);
        i += 1;
    }

    output
}

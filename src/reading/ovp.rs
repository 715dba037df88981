use crate::segment::classify::strip_edge_punctuation;

/// Anchor offset inside a single word, by letter count:
/// 1 → 0, 2–5 → 1, 6–9 → 2, 10+ → 3.
fn anchor_for_length(len: usize) -> usize {
    match len {
        0..=1 => 0,
        2..=5 => 1,
        6..=9 => 2,
        _ => 3,
    }
}

/// OVP (Optimal Viewing Position) anchor for a reading token.
///
/// Returns the 0-based char index of the letter to highlight. Grouped tokens
/// ("de café") anchor inside their last word, since the leading monosyllable
/// is read at a glance. Edge punctuation does not count towards word length.
pub fn anchor_position(token: &str) -> usize {
    let trimmed = token.trim_end();
    let word_start = trimmed.rfind(' ').map_or(0, |i| i + 1);
    let last_word = &trimmed[word_start..];
    let prefix_chars = trimmed[..word_start].chars().count();

    let core_len = strip_edge_punctuation(last_word).chars().count();
    if core_len == 0 {
        return prefix_chars;
    }

    let leading = last_word
        .chars()
        .take_while(|c| !c.is_alphanumeric())
        .count();

    prefix_chars + leading + anchor_for_length(core_len)
}

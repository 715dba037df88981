// Word classification predicates shared by every segmentation pass

/// Characters that close a clause or sentence when they end a token.
pub const TRAILING_PUNCTUATION: [char; 7] = [',', '.', ';', ':', '?', '!', '…'];

/// Vowel set for the syllable-nucleus heuristic (matched after lowercasing).
pub const VOWELS: [char; 18] = [
    'a', 'e', 'i', 'o', 'u', 'á', 'é', 'í', 'ó', 'ú', 'â', 'ê', 'ô', 'ã', 'õ', 'à', 'ü', 'y',
];

/// Removes leading and trailing characters that are neither letters nor digits.
///
/// Interior punctuation is kept: `"e-mail,"` becomes `"e-mail"`.
pub fn strip_edge_punctuation(raw: &str) -> &str {
    raw.trim_matches(|c: char| !c.is_alphanumeric())
}

fn is_vowel(c: char) -> bool {
    VOWELS.contains(&c)
}

/// Counts maximal runs of consecutive vowels.
fn count_vowel_groups(word: &str) -> usize {
    let mut groups = 0;
    let mut in_group = false;
    for c in word.chars() {
        let vowel = is_vowel(c);
        if vowel && !in_group {
            groups += 1;
        }
        in_group = vowel;
    }
    groups
}

/// Decides whether a word counts as monosyllabic for grouping.
///
/// Edge punctuation is stripped and the word lowercased first. Words of one or
/// two code points are always monosyllabic; longer words are monosyllabic when
/// they contain at most one run of vowels ("sou", "que", "mar").
pub fn is_monosyllabic(raw: &str) -> bool {
    let word = strip_edge_punctuation(raw).to_lowercase();
    if word.is_empty() {
        return false;
    }
    if word.chars().count() <= 2 {
        return true;
    }
    count_vowel_groups(&word) <= 1
}

fn is_latin_letter(c: char) -> bool {
    if !c.is_alphabetic() {
        return false;
    }
    matches!(c as u32,
        0x0041..=0x005A
        | 0x0061..=0x007A
        | 0x00C0..=0x00D6
        | 0x00D8..=0x00F6
        | 0x00F8..=0x024F
        | 0x1E00..=0x1EFF)
}

/// True when the token is non-empty and made only of Latin letters,
/// accented ones included. Digits, hyphens and spaces all disqualify it.
pub fn is_alphabetic_word(token: &str) -> bool {
    !token.is_empty() && token.chars().all(is_latin_letter)
}

pub fn has_trailing_punctuation(token: &str) -> bool {
    token
        .trim()
        .chars()
        .next_back()
        .map_or(false, |c| TRAILING_PUNCTUATION.contains(&c))
}

pub fn has_trailing_period(token: &str) -> bool {
    token.trim().ends_with('.')
}

/// Number of whitespace-separated words in a (possibly grouped) token.
pub fn count_words(token: &str) -> usize {
    token.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_monosyllabic_short_words() {
        assert!(is_monosyllabic("no"));
        assert!(is_monosyllabic("a"));
        assert!(is_monosyllabic("é"));
    }

    #[test]
    fn test_is_monosyllabic_multi_vowel_groups() {
        assert!(!is_monosyllabic("olá"));
        assert!(!is_monosyllabic("gosto"));
        assert!(!is_monosyllabic("café"));
    }

    #[test]
    fn test_is_monosyllabic_single_vowel_run() {
        // "ou" and "ue" are one nucleus each
        assert!(is_monosyllabic("sou"));
        assert!(is_monosyllabic("que"));
        assert!(is_monosyllabic("mar"));
    }

    #[test]
    fn test_is_monosyllabic_strips_punctuation() {
        assert!(is_monosyllabic("a,"));
        assert!(is_monosyllabic("(sim)."));
        assert!(!is_monosyllabic("«depois»"));
    }

    #[test]
    fn test_is_monosyllabic_case_insensitive() {
        assert!(is_monosyllabic("QUE"));
        assert!(!is_monosyllabic("ÁGUA"));
    }

    #[test]
    fn test_is_monosyllabic_punctuation_only() {
        assert!(!is_monosyllabic(""));
        assert!(!is_monosyllabic("-"));
        assert!(!is_monosyllabic("..."));
    }

    #[test]
    fn test_is_monosyllabic_consonant_cluster() {
        // No vowel run at all still counts as at most one
        assert!(is_monosyllabic("psst"));
    }

    #[test]
    fn test_strip_edge_punctuation_keeps_interior() {
        assert_eq!(strip_edge_punctuation("e-mail,"), "e-mail");
        assert_eq!(strip_edge_punctuation("\"olá!\""), "olá");
        assert_eq!(strip_edge_punctuation("?!"), "");
    }

    #[test]
    fn test_is_alphabetic_word() {
        assert!(is_alphabetic_word("mento"));
        assert!(is_alphabetic_word("ação"));
        assert!(is_alphabetic_word("ÉPOCA"));
        assert!(!is_alphabetic_word(""));
        assert!(!is_alphabetic_word("1950"));
        assert!(!is_alphabetic_word("e-mail"));
        assert!(!is_alphabetic_word("boa,"));
        assert!(!is_alphabetic_word("a vida"));
    }

    #[test]
    fn test_is_alphabetic_word_rejects_non_latin() {
        assert!(!is_alphabetic_word("привет"));
        assert!(!is_alphabetic_word("日本"));
    }

    #[test]
    fn test_has_trailing_punctuation() {
        for token in ["boa,", "fim.", "pois;", "assim:", "certo?", "viva!", "então…"] {
            assert!(has_trailing_punctuation(token), "{token} should close");
        }
        assert!(has_trailing_punctuation("fim.  "));
        assert!(!has_trailing_punctuation("palavra"));
        assert!(!has_trailing_punctuation("(nota)"));
        assert!(!has_trailing_punctuation(""));
    }

    #[test]
    fn test_has_trailing_period() {
        assert!(has_trailing_period("fim."));
        assert!(has_trailing_period(" fim. "));
        assert!(!has_trailing_period("fim,"));
        assert!(!has_trailing_period("certo?"));
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words("palavra"), 1);
        assert_eq!(count_words("de café"), 2);
        assert_eq!(count_words("  a  vida é "), 3);
        assert_eq!(count_words(""), 0);
    }
}

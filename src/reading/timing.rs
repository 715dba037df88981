use crate::config::TimingConfig;

/// Base delay for one word at the given speed, rounded to the nearest millisecond.
pub fn wpm_to_milliseconds(wpm: u32) -> u64 {
    (60_000.0 / wpm.max(1) as f64).round() as u64
}

fn base_word_delay(wpm: u32, config: &TimingConfig) -> u64 {
    wpm_to_milliseconds(wpm).max(config.min_word_ms)
}

/// Pause after a token, chosen by how it ends.
pub fn end_punctuation_multiplier(token: &str, config: &TimingConfig) -> f64 {
    let t = token.trim();
    if t.ends_with("...") || t.ends_with('…') {
        config.ellipsis_multiplier
    } else if t.ends_with(['.', '!', '?']) {
        config.sentence_end_multiplier
    } else if t.ends_with([';', ':']) {
        config.clause_pause_multiplier
    } else if t.ends_with(',') {
        config.comma_multiplier
    } else {
        1.0
    }
}

/// Longer tokens stay on screen longer; punctuation and spaces are not counted.
pub fn complexity_multiplier(token: &str) -> f64 {
    let length = token.chars().filter(|c| c.is_alphanumeric()).count();
    match length {
        0..=3 => 0.9,
        4..=6 => 1.0,
        7..=10 => 1.2,
        _ => 1.5,
    }
}

/// Display time for one token: a weight-2 pair gets twice a word's base time
/// before the punctuation and complexity factors are applied.
pub fn token_duration_ms(token: &str, weight: u32, wpm: u32, config: &TimingConfig) -> u64 {
    let base = base_word_delay(wpm, config) as f64;
    let weight = f64::from(weight.max(1));
    let delay_ms =
        base * weight * end_punctuation_multiplier(token, config) * complexity_multiplier(token);
    delay_ms.round() as u64
}

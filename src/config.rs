// Configuration for extraction and the reading client
// Segmentation constants are fixed in segment::classify and are not configurable

use std::ops::RangeInclusive;
use std::path::PathBuf;

/// Display timing for the reader.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingConfig {
    /// Words per minute reading speed (default 300)
    pub wpm: u32,

    /// Minimum and maximum allowed WPM
    pub wpm_range: RangeInclusive<u32>,

    /// WPM change per +/- keypress
    pub wpm_step: i32,

    /// Floor for the per-word base delay in milliseconds
    pub min_word_ms: u64,

    pub ellipsis_multiplier: f64,      // default 2.5x
    pub sentence_end_multiplier: f64,  // default 2.0x
    pub clause_pause_multiplier: f64,  // default 1.75x, for ; and :
    pub comma_multiplier: f64,         // default 1.5x
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            wpm: 300,
            wpm_range: 50..=1000,
            wpm_step: 25,
            min_word_ms: 50,
            ellipsis_multiplier: 2.5,
            sentence_end_multiplier: 2.0,
            clause_pause_multiplier: 1.75,
            comma_multiplier: 1.5,
        }
    }
}

/// How documents without a native page concept are paginated.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionConfig {
    /// Words per synthesized page for EPUB, Markdown and plain text
    pub words_per_page: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            words_per_page: 300,
        }
    }
}

/// What the reader shows per screen.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    /// Tokens shown together (1 to `max_group_size`); a window always ends
    /// at a sentence-closing period
    pub group_size: usize,
    pub max_group_size: usize,

    /// Show the upcoming window under the current one
    pub show_next_preview: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            group_size: 1,
            max_group_size: 3,
            show_next_preview: true,
        }
    }
}

/// Master configuration combining all settings
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub timing: TimingConfig,
    pub extraction: ExtractionConfig,
    pub display: DisplayConfig,
    /// Token cache directory; caching is disabled when unset
    pub cache_dir: Option<PathBuf>,
}

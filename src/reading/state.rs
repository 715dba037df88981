use crate::config::{DisplayConfig, TimingConfig};
use crate::reading::timing::token_duration_ms;
use crate::segment::{ReadingToken, TokenizedDocument};

/// A sentence-closing period. Ellipses do not close a window.
fn is_terminal_period(token: &str) -> bool {
    let trimmed = token.trim();
    trimmed.ends_with('.') && !trimmed.ends_with("...")
}

/// Playback position over a segmented document.
///
/// The reader shows a window of up to `group_size` tokens starting at
/// `current_index`. A window never runs past a token ending a sentence.
pub struct ReadingState {
    pub document: TokenizedDocument,
    pub current_index: usize,
    pub wpm: u32,
    config: TimingConfig,
    display: DisplayConfig,
}

impl ReadingState {
    pub fn new(document: TokenizedDocument, wpm: u32, config: TimingConfig) -> Self {
        let wpm = wpm.clamp(*config.wpm_range.start(), *config.wpm_range.end());
        Self {
            document,
            current_index: 0,
            wpm,
            config,
            display: DisplayConfig::default(),
        }
    }

    pub fn with_display(mut self, display: DisplayConfig) -> Self {
        let group_size = display.group_size;
        self.display = display;
        self.set_group_size(group_size);
        self
    }

    pub fn new_with_default_config(document: TokenizedDocument, wpm: u32) -> Self {
        Self::new(document, wpm, TimingConfig::default())
    }

    pub fn config(&self) -> &TimingConfig {
        &self.config
    }

    pub fn group_size(&self) -> usize {
        self.display.group_size
    }

    pub fn set_group_size(&mut self, size: usize) {
        self.display.group_size = size.clamp(1, self.display.max_group_size.max(1));
    }

    /// Steps the group size 1, 2, ... up to the maximum, then back to 1.
    pub fn cycle_group_size(&mut self) {
        let next = if self.group_size() >= self.display.max_group_size {
            1
        } else {
            self.group_size() + 1
        };
        self.set_group_size(next);
    }

    pub fn shows_next_preview(&self) -> bool {
        self.display.show_next_preview
    }

    pub fn toggle_next_preview(&mut self) {
        self.display.show_next_preview = !self.display.show_next_preview;
    }

    pub fn current_token(&self) -> Option<ReadingToken<'_>> {
        self.document.stream.get(self.current_index)
    }

    /// Page of the current token, or 1 for an empty document.
    pub fn current_page(&self) -> u32 {
        self.current_token().map_or(1, |token| token.page)
    }

    pub fn page_count(&self) -> u32 {
        self.document.page_count
    }

    fn window_size_at(&self, start: usize) -> usize {
        let len = self.document.len();
        if start >= len {
            return 0;
        }
        let max_window = self.group_size().min(len - start);
        self.document.stream.tokens[start..start + max_window]
            .iter()
            .position(|token| is_terminal_period(token))
            .map_or(max_window, |offset| offset + 1)
    }

    fn window_text_at(&self, start: usize) -> Option<String> {
        let size = self.window_size_at(start);
        if size == 0 {
            return None;
        }
        Some(self.document.stream.tokens[start..start + size].join(" "))
    }

    /// Number of tokens on screen, 0 for an empty document.
    pub fn window_size(&self) -> usize {
        self.window_size_at(self.current_index)
    }

    /// Tokens on screen joined by spaces.
    pub fn window_text(&self) -> Option<String> {
        self.window_text_at(self.current_index)
    }

    /// The window that follows the current one, if any.
    pub fn next_window_text(&self) -> Option<String> {
        self.window_text_at(self.current_index + self.window_size())
    }

    /// Display time of the current window: the weighted durations of its
    /// tokens added together.
    pub fn window_duration(&self) -> u64 {
        (self.current_index..self.current_index + self.window_size())
            .filter_map(|index| self.document.stream.get(index))
            .map(|token| token_duration_ms(token.text, token.weight, self.wpm, &self.config))
            .sum()
    }

    pub fn adjust_wpm(&mut self, delta: i32) {
        let new_wpm = i64::from(self.wpm) + i64::from(delta);
        self.wpm = new_wpm.clamp(
            i64::from(*self.config.wpm_range.start()),
            i64::from(*self.config.wpm_range.end()),
        ) as u32;
    }

    /// Moves to the next window; returns false (and stays put) when the
    /// current window is the last one.
    pub fn advance(&mut self) -> bool {
        let next = self.current_index + self.window_size();
        if next > self.current_index && next < self.document.len() {
            self.current_index = next;
            true
        } else {
            false
        }
    }

    /// Moves back to where the previous window starts: up to `group_size`
    /// tokens back, stopping after a sentence-closing token.
    pub fn previous_window(&mut self) -> bool {
        if self.current_index == 0 {
            return false;
        }
        let mut back = 0;
        for token in self.document.stream.tokens[..self.current_index].iter().rev() {
            if back >= self.group_size() {
                break;
            }
            back += 1;
            if is_terminal_period(token) {
                break;
            }
        }
        self.current_index -= back;
        true
    }

    pub fn is_at_end(&self) -> bool {
        self.current_index + self.window_size() >= self.document.len()
    }

    fn first_index_at_or_after(&self, page: u32) -> Option<usize> {
        self.document.stream.pages.iter().position(|&p| p >= page)
    }

    /// Jumps to the first token on `page` or, if that page has no tokens,
    /// on the nearest page after it.
    pub fn jump_to_page(&mut self, page: u32) -> bool {
        match self.first_index_at_or_after(page) {
            Some(index) => {
                self.current_index = index;
                true
            }
            None => false,
        }
    }

    pub fn next_page(&mut self) -> bool {
        let next = self.current_page().saturating_add(1);
        self.jump_to_page(next)
    }

    /// Jumps to the start of the page before the current one.
    pub fn previous_page(&mut self) -> bool {
        let start_of_current = self
            .first_index_at_or_after(self.current_page())
            .unwrap_or(0);
        if start_of_current == 0 {
            return false;
        }
        let previous = self.document.stream.pages[start_of_current - 1];
        self.jump_to_page(previous)
    }

    /// `(current_index, token_count)` for progress display.
    pub fn progress(&self) -> (usize, usize) {
        (self.current_index, self.document.len())
    }

    /// Source words covered by the tokens before the current one.
    pub fn words_read(&self) -> u64 {
        self.document
            .stream
            .weights
            .iter()
            .take(self.current_index)
            .map(|&w| u64::from(w))
            .sum()
    }
}

use crate::reading::{anchor_position, ReadingState};
use crate::ui::view::{
    preview_text, render_help_line, render_preview_line, render_progress_bar, render_status_line,
    render_word_display,
};
use crate::ui::{handle_key, ReaderMode};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use std::io::{self, Stdout};
use std::sync::Once;
use std::time::{Duration, Instant};
use tracing::debug;

static PANIC_HOOK_SET: Once = Once::new();

/// Poll interval while paused
const IDLE_POLL: Duration = Duration::from_millis(250);

/// When the current window is due to be replaced.
///
/// Keys that leave the position alone (speed, group size, preview) do not
/// restart the countdown, so holding `+` never stalls playback.
#[derive(Debug, Clone, Copy)]
pub struct PlaybackClock {
    deadline: Instant,
}

impl PlaybackClock {
    pub fn start(now: Instant, state: &ReadingState) -> Self {
        Self {
            deadline: now + Duration::from_millis(state.window_duration().max(1)),
        }
    }

    pub fn restart(&mut self, now: Instant, state: &ReadingState) {
        *self = Self::start(now, state);
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }

    /// Restarts the countdown if a keypress moved the reader or resumed
    /// playback.
    pub fn after_key(
        &mut self,
        now: Instant,
        before: (usize, ReaderMode),
        state: &ReadingState,
        mode: ReaderMode,
    ) {
        let (index, previous_mode) = before;
        let resumed = mode == ReaderMode::Reading && previous_mode != ReaderMode::Reading;
        if state.current_index != index || resumed {
            self.restart(now, state);
        }
    }
}

pub struct TuiManager {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TuiManager {
    pub fn new() -> Result<Self, io::Error> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        set_panic_hook();

        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(TuiManager { terminal })
    }

    /// Plays the document until the user quits.
    ///
    /// Each window stays up for the summed weighted duration of its tokens;
    /// reaching the last window pauses playback instead of exiting.
    pub fn run_event_loop(&mut self, state: &mut ReadingState) -> io::Result<()> {
        let mut mode = ReaderMode::Reading;
        let mut clock = PlaybackClock::start(Instant::now(), state);

        loop {
            self.render_frame(state, mode)?;

            let timeout = match mode {
                ReaderMode::Quit => return Ok(()),
                ReaderMode::Reading => clock.remaining(Instant::now()),
                ReaderMode::Paused => IDLE_POLL,
            };

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        let before = (state.current_index, mode);
                        mode = handle_key(key.code, mode, state);
                        clock.after_key(Instant::now(), before, state, mode);
                    }
                }
            } else if mode == ReaderMode::Reading {
                if state.advance() {
                    clock.restart(Instant::now(), state);
                } else {
                    debug!(index = state.current_index, "reached end of document");
                    mode = ReaderMode::Paused;
                }
            }
        }
    }

    pub fn render_frame(&mut self, state: &ReadingState, mode: ReaderMode) -> io::Result<()> {
        self.terminal.draw(|frame| {
            let area = frame.area();

            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Percentage(45),
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Min(0),
                    Constraint::Length(1),
                    Constraint::Length(1),
                ])
                .split(area);

            if let Some(text) = state.window_text() {
                let anchor = anchor_position(&text);
                frame.render_widget(render_word_display(&text, anchor, rows[1].width), rows[1]);
            }
            if let Some(preview) = preview_text(state) {
                frame.render_widget(render_preview_line(preview), rows[2]);
            }

            frame.render_widget(render_progress_bar(state.progress()), rows[3]);
            frame.render_widget(render_status_line(state, mode), rows[5]);
            frame.render_widget(render_help_line(), rows[6]);
        })?;

        Ok(())
    }
}

impl Drop for TuiManager {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

fn set_panic_hook() {
    PANIC_HOOK_SET.call_once(|| {
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            default_hook(panic_info);
        }));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{TokenStream, TokenizedDocument};

    fn state() -> ReadingState {
        let mut stream = TokenStream::new();
        // 200ms * weight 2 * complexity 1.0 = 400ms each
        stream.push("A vida".to_string(), 1, 2);
        stream.push("é boa".to_string(), 1, 2);
        ReadingState::new_with_default_config(TokenizedDocument::new(stream, 1), 300)
    }

    #[test]
    fn test_clock_counts_down_window_duration() {
        let state = state();
        let start = Instant::now();
        let clock = PlaybackClock::start(start, &state);
        assert_eq!(clock.remaining(start), Duration::from_millis(400));
        assert_eq!(clock.remaining(start + Duration::from_millis(150)), Duration::from_millis(250));
        assert_eq!(clock.remaining(start + Duration::from_secs(1)), Duration::ZERO);
    }

    #[test]
    fn test_speed_key_keeps_deadline() {
        let mut state = state();
        let start = Instant::now();
        let mut clock = PlaybackClock::start(start, &state);

        let pressed = start + Duration::from_millis(300);
        for _ in 0..5 {
            let before = (state.current_index, ReaderMode::Reading);
            let mode = handle_key(crossterm::event::KeyCode::Char('+'), ReaderMode::Reading, &mut state);
            clock.after_key(pressed, before, &state, mode);
        }
        assert_eq!(clock.remaining(pressed), Duration::from_millis(100));
    }

    #[test]
    fn test_moving_or_resuming_restarts_deadline() {
        let mut state = state();
        let start = Instant::now();
        let mut clock = PlaybackClock::start(start, &state);
        let later = start + Duration::from_millis(300);

        let before = (state.current_index, ReaderMode::Reading);
        state.advance();
        clock.after_key(later, before, &state, ReaderMode::Reading);
        assert_eq!(clock.remaining(later), Duration::from_millis(400));

        let resumed_at = later + Duration::from_millis(350);
        clock.after_key(resumed_at, (state.current_index, ReaderMode::Paused), &state, ReaderMode::Reading);
        assert_eq!(clock.remaining(resumed_at), Duration::from_millis(400));
    }
}

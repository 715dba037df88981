pub mod terminal;
pub mod view;

use crate::reading::ReadingState;
use crossterm::event::KeyCode;

pub use terminal::TuiManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderMode {
    Reading,
    Paused,
    Quit,
}

/// Applies one keypress and returns the resulting mode.
pub fn handle_key(code: KeyCode, mode: ReaderMode, state: &mut ReadingState) -> ReaderMode {
    let step = state.config().wpm_step;
    match code {
        KeyCode::Char('q') | KeyCode::Esc => ReaderMode::Quit,
        KeyCode::Char(' ') => match mode {
            ReaderMode::Reading => ReaderMode::Paused,
            ReaderMode::Paused => ReaderMode::Reading,
            ReaderMode::Quit => ReaderMode::Quit,
        },
        KeyCode::Char('+') | KeyCode::Char('=') => {
            state.adjust_wpm(step);
            mode
        }
        KeyCode::Char('-') => {
            state.adjust_wpm(-step);
            mode
        }
        KeyCode::Char('n') => {
            state.next_page();
            mode
        }
        KeyCode::Char('p') => {
            state.previous_page();
            mode
        }
        KeyCode::Left => {
            state.previous_window();
            mode
        }
        KeyCode::Right => {
            state.advance();
            mode
        }
        KeyCode::Char('g') => {
            state.cycle_group_size();
            mode
        }
        KeyCode::Char('v') => {
            state.toggle_next_preview();
            mode
        }
        _ => mode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{TokenStream, TokenizedDocument};

    fn state() -> ReadingState {
        let mut stream = TokenStream::new();
        stream.push("Olá".to_string(), 1, 1);
        stream.push("mundo.".to_string(), 2, 1);
        ReadingState::new_with_default_config(TokenizedDocument::new(stream, 2), 300)
    }

    #[test]
    fn test_space_toggles_pause() {
        let mut state = state();
        let mode = handle_key(KeyCode::Char(' '), ReaderMode::Reading, &mut state);
        assert_eq!(mode, ReaderMode::Paused);
        let mode = handle_key(KeyCode::Char(' '), mode, &mut state);
        assert_eq!(mode, ReaderMode::Reading);
    }

    #[test]
    fn test_quit_keys() {
        let mut state = state();
        assert_eq!(
            handle_key(KeyCode::Char('q'), ReaderMode::Paused, &mut state),
            ReaderMode::Quit
        );
        assert_eq!(
            handle_key(KeyCode::Esc, ReaderMode::Reading, &mut state),
            ReaderMode::Quit
        );
    }

    #[test]
    fn test_speed_keys_use_configured_step() {
        let mut state = state();
        handle_key(KeyCode::Char('+'), ReaderMode::Reading, &mut state);
        assert_eq!(state.wpm, 325);
        handle_key(KeyCode::Char('-'), ReaderMode::Reading, &mut state);
        handle_key(KeyCode::Char('-'), ReaderMode::Reading, &mut state);
        assert_eq!(state.wpm, 275);
    }

    #[test]
    fn test_page_keys() {
        let mut state = state();
        handle_key(KeyCode::Char('n'), ReaderMode::Paused, &mut state);
        assert_eq!(state.current_page(), 2);
        handle_key(KeyCode::Char('p'), ReaderMode::Paused, &mut state);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_arrow_keys_move_by_window() {
        let mut state = state();
        handle_key(KeyCode::Right, ReaderMode::Paused, &mut state);
        assert_eq!(state.current_index, 1);
        handle_key(KeyCode::Left, ReaderMode::Paused, &mut state);
        assert_eq!(state.current_index, 0);
    }

    #[test]
    fn test_group_and_preview_keys() {
        let mut state = state();
        let mode = handle_key(KeyCode::Char('g'), ReaderMode::Reading, &mut state);
        assert_eq!(mode, ReaderMode::Reading);
        assert_eq!(state.group_size(), 2);

        assert!(state.shows_next_preview());
        handle_key(KeyCode::Char('v'), ReaderMode::Reading, &mut state);
        assert!(!state.shows_next_preview());
    }

    #[test]
    fn test_unknown_key_keeps_mode() {
        let mut state = state();
        assert_eq!(
            handle_key(KeyCode::Char('x'), ReaderMode::Paused, &mut state),
            ReaderMode::Paused
        );
    }
}

use crate::reading::ReadingState;
use crate::ui::ReaderMode;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthChar;

// Midnight palette
const BACKGROUND: Color = Color::Rgb(26, 27, 38); // #1A1B26
const TEXT: Color = Color::Rgb(169, 177, 214); // #A9B1D6
const ANCHOR: Color = Color::Rgb(247, 118, 142); // #F7768E
const DIMMED: Color = Color::Rgb(100, 110, 150); // #646E96

const PROGRESS_WIDTH: usize = 20;

/// Renders a token so that its anchor letter lands on the centre column of
/// an area `width` cells wide.
pub fn render_word_display(token: &str, anchor_pos: usize, width: u16) -> Paragraph<'static> {
    let chars: Vec<char> = token.chars().collect();
    let before_anchor: usize = chars
        .iter()
        .take(anchor_pos)
        .map(|c| c.width().unwrap_or(0))
        .sum();
    let left_padding = (usize::from(width) / 2).saturating_sub(before_anchor);

    let mut spans = vec![Span::styled(
        " ".repeat(left_padding),
        Style::default().fg(TEXT),
    )];

    for (i, ch) in chars.iter().enumerate() {
        let style = if i == anchor_pos {
            Style::default().fg(ANCHOR).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT)
        };
        spans.push(Span::styled(ch.to_string(), style));
    }

    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Left)
        .style(Style::default().bg(BACKGROUND))
}

pub fn render_progress_bar(progress: (usize, usize)) -> Line<'static> {
    let (current, total) = progress;
    let filled_len = if total == 0 {
        0
    } else {
        ((current + 1) * PROGRESS_WIDTH / total).min(PROGRESS_WIDTH)
    };
    let empty_len = PROGRESS_WIDTH - filled_len;

    Line::from(vec![
        Span::styled("─".repeat(filled_len), Style::default().fg(TEXT)),
        Span::styled("─".repeat(empty_len), Style::default().fg(DIMMED)),
    ])
    .alignment(Alignment::Center)
}

pub fn status_text(state: &ReadingState, mode: ReaderMode) -> String {
    let page_count = if state.page_count() == 0 {
        "?".to_string()
    } else {
        state.page_count().to_string()
    };
    let mode_label = match mode {
        ReaderMode::Reading => "READING",
        ReaderMode::Paused => "PAUSED",
        ReaderMode::Quit => "QUIT",
    };
    format!(
        "page {} / {} · {} WPM · {} words read · {}",
        state.current_page(),
        page_count,
        state.wpm,
        state.words_read(),
        mode_label
    )
}

pub fn render_status_line(state: &ReadingState, mode: ReaderMode) -> Paragraph<'static> {
    Paragraph::new(status_text(state, mode))
        .alignment(Alignment::Center)
        .style(Style::default().fg(DIMMED).bg(BACKGROUND))
}

/// `next: ...` under the current window, or `None` when the preview is off.
pub fn preview_text(state: &ReadingState) -> Option<String> {
    if !state.shows_next_preview() {
        return None;
    }
    let next = state.next_window_text().unwrap_or_else(|| "—".to_string());
    Some(format!("next: {next}"))
}

pub fn render_preview_line(text: String) -> Paragraph<'static> {
    Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(DIMMED).bg(BACKGROUND))
}

pub fn render_help_line() -> Paragraph<'static> {
    Paragraph::new("space pause · +/- speed · ←/→ window · g group · v preview · n/p page · q quit")
        .alignment(Alignment::Center)
        .style(Style::default().fg(DIMMED).bg(BACKGROUND))
}

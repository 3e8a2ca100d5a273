use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::Paragraph,
};

/// Shuttle frames drawn while a request is in flight.
///
pub const FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

/// Current spinner frame.
///
pub fn frame(state: &State) -> &'static str {
    FRAMES[*state.get_spinner_index() % FRAMES.len()]
}

/// Return a centered spinner paragraph with the given label, padded to sit
/// in the middle of an area `height` rows tall.
///
pub fn widget<'a>(state: &State, label: &'a str, height: u16) -> Paragraph<'a> {
    let theme = state.get_theme();
    let mut lines: Vec<Line> = (0..height.saturating_sub(2) / 2)
        .map(|_| Line::from(""))
        .collect();
    lines.push(Line::from(vec![
        Span::styled(frame(state), styling::active_block_title_style()),
        Span::raw(" "),
        Span::styled(label, styling::muted_text_style(theme)),
    ]));
    Paragraph::new(lines).alignment(Alignment::Center)
}

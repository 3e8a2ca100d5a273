use super::Frame;
use crate::state::{State, Status};
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the status line with the outcome of the last action.
///
pub fn status(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let line = match state.get_status() {
        Some(Status::Error(message)) => Line::from(vec![
            Span::styled(" ✗ ", styling::error_text_style(theme)),
            Span::styled(message.clone(), styling::error_text_style(theme)),
        ]),
        Some(Status::Info(message)) => Line::from(vec![
            Span::styled(" ✓ ", Style::default().fg(theme.success.to_color())),
            Span::styled(message.clone(), styling::normal_text_style(theme)),
        ]),
        None => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line), size);
}

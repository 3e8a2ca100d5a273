use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders},
};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

/// Render log widget according to state, newest entries at the bottom.
///
pub fn log(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let block = Block::default()
        .title("Log (l: hide)")
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme));

    let widget = TuiLoggerWidget::default()
        .block(block)
        .style(styling::normal_text_style(theme))
        .style_error(styling::error_text_style(theme))
        .style_warn(Style::default().fg(theme.warning.to_color()))
        .style_info(styling::normal_text_style(theme))
        .style_debug(styling::muted_text_style(theme))
        .style_trace(styling::muted_text_style(theme))
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false);
    frame.render_widget(widget, size);
}

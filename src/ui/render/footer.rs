use super::Frame;
use crate::state::{State, View};
use crate::store::TimerPhase;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Key hints for the current view.
///
fn controls_for_view(view: View) -> &'static str {
    match view {
        View::Projects => {
            " s: start, p: pause, r: resume, x: stop, ]/[: stage, n: new, e: edit, d: delete, l: log, q: quit"
        }
        View::Materials => " +/-: stock ±10, n: new, e: edit, d: delete, l: log, q: quit",
        View::Items => " n: new, e: edit, d: delete, l: log, q: quit",
        View::Trends => " m: match trends, w: scrape, ←/→: switch panel, l: log, q: quit",
    }
}

/// Render footer widget.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let (mode, mode_color, controls) = if state.is_form_open() {
        (
            "EDIT:",
            theme.footer_edit,
            " Type to edit, Tab/↓: next field, ↑: previous, Enter: save, Esc: cancel",
        )
    } else if state.has_delete_confirmation() {
        ("DELETE:", theme.footer_delete, " y: confirm delete, n/Esc: cancel")
    } else if state.timer_phase() == TimerPhase::Running {
        (
            "TIMER:",
            theme.footer_timer,
            controls_for_view(*state.current_view()),
        )
    } else {
        (
            "NORMAL:",
            theme.footer_normal,
            controls_for_view(*state.current_view()),
        )
    };

    let controls_content = Line::from(vec![
        Span::styled(
            mode,
            Style::default()
                .fg(theme.text.to_color())
                .bg(mode_color.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(controls, Style::default().fg(theme.warning.to_color())),
    ]);
    let controls_widget = Paragraph::new(controls_content).alignment(Alignment::Left);

    // Low stock count, otherwise the version
    let low_count = state
        .app_state()
        .low_stock(state.low_stock_threshold())
        .len();
    let right_content = if low_count > 0 {
        Line::from(vec![Span::styled(
            format!(" {} low on stock ", low_count),
            Style::default()
                .fg(theme.text.to_color())
                .bg(theme.footer_delete.to_color())
                .add_modifier(Modifier::BOLD),
        )])
    } else {
        Line::from(vec![Span::styled(
            format!(" {}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(theme.secondary.to_color()),
        )])
    };

    let right_content_width = right_content.width();
    let right_widget = Paragraph::new(right_content).alignment(Alignment::Right);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(right_content_width.try_into().unwrap_or(0)),
        ])
        .split(size);

    frame.render_widget(controls_widget, columns[0]);
    frame.render_widget(right_widget, columns[1]);
}

use super::Frame;
use crate::state::{State, View};
use crate::store::TimerPhase;
use crate::ui::widgets::styling;
use crate::utils::format::format_hms;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
};

/// Render the view tabs and the compact timer readout.
///
pub fn header(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(30)])
        .split(size);

    let titles: Vec<Line> = View::ALL
        .iter()
        .map(|view| Line::from(format!("{} {}", view.index() + 1, view.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styling::normal_block_border_style(theme))
                .title(Span::styled(" Looma ", styling::active_block_title_style())),
        )
        .style(styling::muted_text_style(theme))
        .highlight_style(
            Style::default()
                .fg(theme.secondary.to_color())
                .add_modifier(Modifier::BOLD),
        )
        .select(state.current_view().index());
    frame.render_widget(tabs, columns[0]);

    let app_state = state.app_state();
    let phase = app_state.timer_phase();
    let project = app_state
        .current_project()
        .map(|p| p.name.as_str())
        .unwrap_or("no project");
    let phase_color = match phase {
        TimerPhase::Running => theme.success.to_color(),
        TimerPhase::Paused => theme.warning.to_color(),
        TimerPhase::Idle => theme.text_muted.to_color(),
    };
    let readout = Paragraph::new(Line::from(vec![
        Span::styled(
            format_hms(app_state.active_timer().display_seconds()),
            Style::default().fg(phase_color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(project.to_string(), styling::muted_text_style(theme)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(styling::normal_block_border_style(theme))
            .title(format!(" Timer: {} ", phase)),
    );
    frame.render_widget(readout, columns[1]);
}

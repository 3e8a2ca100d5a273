use super::Frame;
use crate::state::State;
use crate::store::{Project, TimeSession, TimerPhase};
use crate::ui::theme::Theme;
use crate::ui::widgets::styling;
use crate::utils::format::{format_hms, format_logged, format_quantity};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};

const BLOCK_TITLE: &str = "Projects";
const WEAVE_WIDTH: usize = 10;
const RECENT_SESSIONS: usize = 5;

/// Render the projects list, the timer panel and the selected project.
///
pub fn projects(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(size);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(&theme))
        .title(Span::styled(BLOCK_TITLE, styling::active_block_title_style()));

    let current_id = state.app_state().current_project_id().map(str::to_owned);
    let items: Vec<ListItem> = if state.app_state().projects().is_empty() {
        vec![ListItem::new(Span::styled(
            "No projects yet. Press n to start one.",
            styling::muted_text_style(&theme),
        ))]
    } else {
        state
            .app_state()
            .projects()
            .iter()
            .map(|p| project_row(p, current_id.as_deref() == Some(p.id.as_str()), &theme))
            .collect()
    };

    let list = List::new(items)
        .style(styling::normal_text_style(&theme))
        .highlight_style(styling::active_list_item_style(&theme))
        .block(block);
    frame.render_stateful_widget(list, columns[0], state.get_projects_list_state());

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(3)])
        .split(columns[1]);
    timer_panel(frame, side[0], state, &theme);
    detail(frame, side[1], state, &theme);
}

/// A woven bar, filled threads for completed stages.
///
fn weave(percent: u16) -> String {
    let filled = (percent as usize * WEAVE_WIDTH + 50) / 100;
    format!(
        "{}{}",
        "▓".repeat(filled),
        "░".repeat(WEAVE_WIDTH.saturating_sub(filled))
    )
}

fn project_row(project: &Project, is_current: bool, theme: &Theme) -> ListItem<'static> {
    let marker = if project.is_active || is_current {
        Span::styled("● ", Style::default().fg(theme.success.to_color()))
    } else {
        Span::raw("  ")
    };
    ListItem::new(Line::from(vec![
        marker,
        Span::styled(
            format!("{:<28}", project.name),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {:<12}", project.current_stage.as_str()),
            Style::default().fg(theme.secondary.to_color()),
        ),
        Span::styled(
            weave(project.progress_percent()),
            Style::default().fg(theme.gauge_filled.to_color()),
        ),
        Span::raw(format!(" {:>3}%", project.progress_percent())),
        Span::styled(
            format!("  {:>9}", format_logged(project.total_time_logged)),
            styling::muted_text_style(theme),
        ),
        Span::styled(
            format!("  due {}", project.deadline),
            styling::muted_text_style(theme),
        ),
    ]))
}

fn timer_panel(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let app_state = state.app_state();
    let timer = app_state.active_timer();
    let phase = app_state.timer_phase();
    let (label, color, border) = match phase {
        TimerPhase::Running => ("Running", theme.success, theme.footer_timer),
        TimerPhase::Paused => ("Paused", theme.warning, theme.border_active),
        TimerPhase::Idle => ("Idle", theme.text_muted, theme.border_normal),
    };
    let project = app_state
        .current_project()
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "Select a project and press s".to_string());
    let hint = match phase {
        TimerPhase::Running => "p pause  x stop",
        TimerPhase::Paused => "r resume  x stop",
        TimerPhase::Idle => "s start",
    };

    let text = vec![
        Line::from(Span::styled(
            format_hms(timer.display_seconds()),
            Style::default()
                .fg(color.to_color())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(project, styling::normal_text_style(theme))),
        Line::from(Span::styled(label, Style::default().fg(color.to_color()))),
        Line::from(Span::styled(hint, styling::muted_text_style(theme))),
    ];
    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border.to_color()))
            .title("Timer"),
    );
    frame.render_widget(paragraph, size);
}

fn detail(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme))
        .title("Details");
    let project = match state.selected_project() {
        Some(project) => project,
        None => {
            frame.render_widget(block, size);
            return;
        }
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(size);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styling::normal_block_border_style(theme))
                .title(format!("Stage: {}", project.current_stage)),
        )
        .gauge_style(
            Style::default()
                .fg(theme.gauge_filled.to_color())
                .bg(theme.gauge_empty.to_color()),
        )
        .percent(project.progress_percent())
        .label(format!("{}%", project.progress_percent()));
    frame.render_widget(gauge, rows[0]);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Type: ", styling::muted_text_style(theme)),
            Span::raw(project.kind.clone()),
        ]),
        Line::from(vec![
            Span::styled("Started: ", styling::muted_text_style(theme)),
            Span::raw(project.start_date.to_string()),
            Span::styled("  Deadline: ", styling::muted_text_style(theme)),
            Span::raw(project.deadline.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Logged: ", styling::muted_text_style(theme)),
            Span::raw(format_logged(project.total_time_logged)),
        ]),
        Line::from(vec![
            Span::styled("Last worked: ", styling::muted_text_style(theme)),
            Span::raw(
                project
                    .last_worked_on
                    .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "never".to_string()),
            ),
        ]),
    ];
    if !project.remarks.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            project.remarks.clone(),
            styling::normal_text_style(theme),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Materials",
        styling::active_block_title_style(),
    )));
    if project.raw_materials.is_empty() {
        lines.push(Line::from(Span::styled(
            "none",
            styling::muted_text_style(theme),
        )));
    }
    for material in &project.raw_materials {
        lines.push(Line::from(format!(
            "  {} ({})",
            material.name,
            format_quantity(material.quantity, material.unit)
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Sessions ({})", project.time_sessions.len()),
        styling::active_block_title_style(),
    )));
    if project.time_sessions.is_empty() {
        lines.push(Line::from(Span::styled(
            "none",
            styling::muted_text_style(theme),
        )));
    }
    for session in project.time_sessions.iter().rev().take(RECENT_SESSIONS) {
        lines.push(Line::from(session_line(session)));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styling::normal_block_border_style(theme))
                .title(project.name.clone()),
        );
    frame.render_widget(paragraph, rows[1]);
}

/// One history row: when the run started and ended, its length and stage.
///
fn session_line(session: &TimeSession) -> String {
    format!(
        "  {} - {}  {}  {}",
        session.start_time.format("%m-%d %H:%M"),
        session.end_time.format("%H:%M"),
        format_hms(session.duration),
        session.stage.as_str(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ProjectStage;
    use chrono::{TimeZone, Utc};

    #[test]
    fn session_line_shows_span_length_and_stage() {
        let session = TimeSession {
            start_time: Utc.with_ymd_and_hms(2024, 3, 2, 9, 15, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2024, 3, 2, 10, 45, 30).unwrap(),
            duration: 5430,
            stage: ProjectStage::Weaving,
        };
        assert_eq!(session_line(&session), "  03-02 09:15 - 10:45  01:30:30  Weaving");
    }

    #[test]
    fn weave_fills_by_stage() {
        assert_eq!(weave(0), "░░░░░░░░░░");
        assert_eq!(weave(60), "▓▓▓▓▓▓░░░░");
        assert_eq!(weave(100), "▓▓▓▓▓▓▓▓▓▓");
    }
}

use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Render the open form as a popup over the current view.
///
pub fn form(frame: &mut Frame, size: Rect, state: &State) {
    let form = match state.get_form() {
        Some(form) => form,
        None => return,
    };
    let theme = state.get_theme();
    let popup_area = centered_rect(60, 60, size);
    frame.render_widget(Clear, popup_area);

    let mut text = vec![Line::from("")];
    for (i, field) in form.fields.iter().enumerate() {
        let active = i == form.active;
        let label_style = if active {
            Style::default()
                .fg(theme.secondary.to_color())
                .add_modifier(Modifier::BOLD)
        } else {
            styling::muted_text_style(theme)
        };
        let cursor = if active { "▏" } else { "" };
        text.push(Line::from(Span::styled(field.label, label_style)));
        text.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(field.value.clone(), styling::normal_text_style(theme)),
            Span::styled(cursor, Style::default().fg(theme.secondary.to_color())),
        ]));
    }
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        "Tab/↓ next  ↑ previous  Enter save  Esc cancel",
        styling::muted_text_style(theme),
    )));

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styling::active_block_border_style(theme))
                .title(Span::styled(
                    format!(" {} ", form.kind.title()),
                    styling::active_block_title_style(),
                ))
                .style(Style::default().bg(theme.highlight_bg.to_color())),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup_area);
}

/// Render the delete confirmation dialog.
///
pub fn delete_confirmation(frame: &mut Frame, size: Rect, state: &State) {
    let pending = match state.get_delete_confirmation() {
        Some(pending) => pending,
        None => return,
    };
    let theme = state.get_theme();
    let popup_area = centered_rect(50, 25, size);
    frame.render_widget(Clear, popup_area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Delete {}?", pending.label),
            Style::default()
                .fg(theme.text.to_color())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "This action cannot be undone.",
            Style::default()
                .fg(theme.warning.to_color())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "y: confirm, n/Esc: cancel",
            styling::muted_text_style(theme),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.error.to_color()))
                .title(Span::styled(" Confirm delete ", styling::active_block_title_style())),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

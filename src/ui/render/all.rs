use super::{footer, header, items, log, materials, modal, projects, status, trends, Frame};
use crate::state::{State, View};
use ratatui::layout::{Constraint, Direction, Layout};

const LOG_PANEL_HEIGHT: u16 = 8;

/// Render all widgets according to state.
///
pub fn all(frame: &mut Frame, state: &mut State) {
    let area = frame.size();
    let mut constraints = vec![Constraint::Length(3), Constraint::Min(5)];
    if state.is_log_visible() {
        constraints.push(Constraint::Length(LOG_PANEL_HEIGHT));
    }
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Length(1));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    header(frame, rows[0], state);
    match *state.current_view() {
        View::Projects => projects::projects(frame, rows[1], state),
        View::Materials => materials::materials(frame, rows[1], state),
        View::Items => items::items(frame, rows[1], state),
        View::Trends => trends::trends(frame, rows[1], state),
    }
    let mut next = 2;
    if state.is_log_visible() {
        log(frame, rows[next], state);
        next += 1;
    }
    status(frame, rows[next], state);
    footer(frame, rows[next + 1], state);

    if state.is_form_open() {
        modal::form(frame, area, state);
    } else if state.has_delete_confirmation() {
        modal::delete_confirmation(frame, area, state);
    }
}

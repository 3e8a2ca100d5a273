use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use crate::utils::format::format_cost;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

/// Render the finished items list.
///
pub fn items(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let total: f64 = state.app_state().items().iter().map(|i| i.total_cost).sum();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(&theme))
        .title(Span::styled(
            format!("Items (total cost {})", format_cost(total)),
            styling::active_block_title_style(),
        ));

    let rows: Vec<ListItem> = if state.app_state().items().is_empty() {
        vec![ListItem::new(Span::styled(
            "No items yet. Press n to add one.",
            styling::muted_text_style(&theme),
        ))]
    } else {
        state
            .app_state()
            .items()
            .iter()
            .map(|item| {
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{:<28}", item.name)),
                    Span::styled(
                        format!("{:<18}", item.material),
                        styling::muted_text_style(&theme),
                    ),
                    Span::styled(
                        format!("{:<12}", item.color),
                        Style::default().fg(theme.secondary.to_color()),
                    ),
                    Span::raw(format!("x{:<5}", item.quantity)),
                    Span::raw(format!("{:>12}", format_cost(item.total_cost))),
                ]))
            })
            .collect()
    };

    let list = List::new(rows)
        .style(styling::normal_text_style(&theme))
        .highlight_style(styling::active_list_item_style(&theme))
        .block(block);
    frame.render_stateful_widget(list, size, state.get_items_list_state());
}

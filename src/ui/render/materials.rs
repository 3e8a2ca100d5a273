use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use crate::utils::format::format_quantity;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

/// Render the raw material inventory. Low-stock and surplus rows are
/// highlighted against the configured thresholds.
///
pub fn materials(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let low = state.low_stock_threshold();
    let surplus = state.surplus_threshold();
    let low_count = state.app_state().low_stock(low).len();

    let title = if low_count > 0 {
        format!("Raw materials ({} low on stock)", low_count)
    } else {
        "Raw materials".to_string()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(&theme))
        .title(Span::styled(title, styling::active_block_title_style()));

    let items: Vec<ListItem> = if state.app_state().raw_materials().is_empty() {
        vec![ListItem::new(Span::styled(
            "Inventory is empty. Press n to add a material.",
            styling::muted_text_style(&theme),
        ))]
    } else {
        state
            .app_state()
            .raw_materials()
            .iter()
            .map(|m| {
                let (tag, style) = if m.quantity < low {
                    ("low stock", styling::low_stock_style(&theme))
                } else if m.quantity > surplus {
                    ("surplus", styling::surplus_style(&theme))
                } else {
                    ("", styling::normal_text_style(&theme))
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<30}", m.name), style),
                    Span::styled(
                        format!("{:>14}", format_quantity(m.quantity, m.unit)),
                        style,
                    ),
                    Span::styled(format!("  {}", tag), style),
                ]))
            })
            .collect()
    };

    let list = List::new(items)
        .style(styling::normal_text_style(&theme))
        .highlight_style(styling::active_list_item_style(&theme))
        .block(block);
    frame.render_stateful_widget(list, size, state.get_materials_list_state());
}

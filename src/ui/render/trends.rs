use super::Frame;
use crate::state::{State, TrendsPanel};
use crate::store::Weaver;
use crate::trends::{ScrapedProduct, TrendMatch};
use crate::ui::theme::Theme;
use crate::ui::widgets::{spinner, styling};
use crate::utils::color::parse_hex;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

/// Render the weaver profile over trend matches and the scraped
/// marketplace products.
///
pub fn trends(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(5)])
        .split(size);
    profile(frame, rows[0], state.weaver(), &theme);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    let active = state.trends_panel();
    let matches_block = panel_block(
        format!("Trend matches for {} (m)", state.weaver().id),
        active == TrendsPanel::Matches,
        &theme,
    );
    let scraped_block = panel_block(
        "Scraped products (w)".to_string(),
        active == TrendsPanel::Scraped,
        &theme,
    );

    if state.is_matching() {
        let widget = spinner::widget(state, "Matching trends...", columns[0].height);
        frame.render_widget(widget.block(matches_block), columns[0]);
    } else {
        let items = if state.get_trend_matches().is_empty() {
            vec![placeholder("Press m to match trends.", &theme)]
        } else {
            state
                .get_trend_matches()
                .iter()
                .map(|m| match_row(m, &theme))
                .collect()
        };
        let error = state.get_trend_error().map(str::to_owned);
        let area = with_error(frame, columns[0], error, &theme);
        let list = List::new(items)
            .highlight_style(styling::active_list_item_style(&theme))
            .block(matches_block);
        frame.render_stateful_widget(list, area, state.get_matches_list_state());
    }

    if state.is_scraping() {
        let widget = spinner::widget(state, "Scraping marketplaces...", columns[1].height);
        frame.render_widget(widget.block(scraped_block), columns[1]);
    } else {
        let items = if state.get_scraped_products().is_empty() {
            vec![placeholder("Press w to run the scraper.", &theme)]
        } else {
            state
                .get_scraped_products()
                .iter()
                .map(|p| product_row(p, &theme))
                .collect()
        };
        let error = state.get_scrape_error().map(str::to_owned);
        let area = with_error(frame, columns[1], error, &theme);
        let list = List::new(items)
            .highlight_style(styling::active_list_item_style(&theme))
            .block(scraped_block);
        frame.render_stateful_widget(list, area, state.get_scraped_list_state());
    }
}

fn profile(frame: &mut Frame, size: Rect, weaver: &Weaver, theme: &Theme) {
    let skills = if weaver.skills.is_empty() {
        "no skills listed".to_string()
    } else {
        weaver.skill_summary()
    };
    let mut details = vec![Span::styled(
        weaver.region.to_string(),
        styling::muted_text_style(theme),
    )];
    if !weaver.preferred_materials.is_empty() {
        details.push(Span::styled(
            format!("  prefers {}", weaver.preferred_materials.join(", ")),
            styling::muted_text_style(theme),
        ));
    }
    let text = vec![
        Line::from(vec![
            Span::styled(
                weaver.name.clone(),
                Style::default().fg(theme.secondary.to_color()),
            ),
            Span::raw("  "),
            Span::raw(skills),
        ]),
        Line::from(details),
    ];
    let paragraph = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(styling::normal_block_border_style(theme))
            .title("Weaver"),
    );
    frame.render_widget(paragraph, size);
}

fn panel_block(title: String, active: bool, theme: &Theme) -> Block<'static> {
    let block = Block::default().borders(Borders::ALL);
    if active {
        block
            .border_style(styling::active_block_border_style(theme))
            .title(Span::styled(title, styling::active_block_title_style()))
    } else {
        block
            .border_style(styling::normal_block_border_style(theme))
            .title(title)
    }
}

/// Draw the error above the panel and return the area left for the list.
///
fn with_error(frame: &mut Frame, size: Rect, error: Option<String>, theme: &Theme) -> Rect {
    let message = match error {
        Some(message) => message,
        None => return size,
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(3)])
        .split(size);
    let paragraph = Paragraph::new(Span::styled(message, styling::error_text_style(theme)))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, rows[0]);
    rows[1]
}

fn placeholder(text: &'static str, theme: &Theme) -> ListItem<'static> {
    ListItem::new(Span::styled(text, styling::muted_text_style(theme)))
}

fn match_row(trend: &TrendMatch, theme: &Theme) -> ListItem<'static> {
    let mut spans = vec![
        Span::styled(
            format!("#{:<3}", trend.rank),
            Style::default().fg(theme.secondary.to_color()),
        ),
        Span::raw(format!("{:<24}", trend.trend_name)),
        Span::styled(
            format!("{:<14}", trend.category),
            styling::muted_text_style(theme),
        ),
        Span::styled(
            format!("{:>4}% ", trend.match_percent()),
            Style::default().fg(theme.success.to_color()),
        ),
    ];
    spans.extend(
        trend
            .colors
            .iter()
            .filter_map(|code| parse_hex(code))
            .map(|color| Span::styled("██", Style::default().fg(color))),
    );
    ListItem::new(Line::from(spans))
}

fn product_row(product: &ScrapedProduct, theme: &Theme) -> ListItem<'static> {
    let mut lines = vec![Line::from(vec![
        Span::raw(product.name.clone()),
        Span::styled(
            format!("  {}", product.price),
            Style::default().fg(theme.secondary.to_color()),
        ),
    ])];
    if let Some(url) = &product.product_url {
        lines.push(Line::from(Span::styled(
            format!("  {}", url),
            styling::muted_text_style(theme),
        )));
    }
    ListItem::new(lines)
}

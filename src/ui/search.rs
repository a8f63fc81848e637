//! Search box and recent-search shortcuts

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Focus};

fn focus_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Renders the search text field
pub fn render_search_bar(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Search;

    let mut spans = vec![Span::raw(app.input.clone())];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }
    if app.input.is_empty() && !focused {
        spans = vec![Span::styled(
            "Search for a city...",
            Style::default().fg(Color::DarkGray),
        )];
    }

    let block = Block::default()
        .title(" Search city ")
        .borders(Borders::ALL)
        .border_style(focus_border(focused));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Renders the recent-search shortcuts
pub fn render_recent(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Recent;

    let block = Block::default()
        .title(" Recent searches ")
        .borders(Borders::ALL)
        .border_style(focus_border(focused));

    if app.recent.is_empty() {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "No recent searches",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let lines: Vec<Line> = app
        .recent
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let style = if focused && i == app.recent_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!("{}. {}", i + 1, name), style))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Renders the one-line key hint bar
pub fn render_help_bar(frame: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Yellow);
    let text = Style::default().fg(Color::DarkGray);

    let line = Line::from(vec![
        Span::styled(" Enter", key),
        Span::styled(" search  ", text),
        Span::styled("Tab", key),
        Span::styled(" recent  ", text),
        Span::styled("Ctrl+L", key),
        Span::styled(" my location  ", text),
        Span::styled("F1", key),
        Span::styled(" help  ", text),
        Span::styled("Esc", key),
        Span::styled(" quit", text),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

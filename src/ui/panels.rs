//! Weather panels
//!
//! Renders the current conditions, hourly strip, daily cards, air quality,
//! and map panels from their view models. Each render overwrites whatever the
//! panel showed before.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::widgets::TemperatureSparkline;
use crate::data::ConditionKind;
use crate::view::{round_half_up, AirQualityView, CurrentView, DailyItem, HourlyItem, MapView};

/// Weather condition to icon mapping
pub fn condition_glyph(kind: ConditionKind) -> &'static str {
    match kind {
        ConditionKind::Clear => "\u{2600}",         // ☀
        ConditionKind::FewClouds => "\u{26C5}",     // ⛅
        ConditionKind::Cloudy => "\u{2601}",        // ☁
        ConditionKind::Rain => "\u{1F327}",         // 🌧
        ConditionKind::Showers => "\u{1F326}",      // 🌦
        ConditionKind::Thunderstorm => "\u{26C8}",  // ⛈
        ConditionKind::Snow => "\u{2744}",          // ❄
        ConditionKind::Mist => "\u{1F32B}",         // 🌫
    }
}

/// Color for temperature (warmer = more red, cooler = more blue)
pub fn temperature_color(temp: i64) -> Color {
    if temp >= 30 {
        Color::Red
    } else if temp >= 25 {
        Color::LightRed
    } else if temp >= 20 {
        Color::Yellow
    } else if temp >= 15 {
        Color::Green
    } else if temp >= 10 {
        Color::Cyan
    } else {
        Color::Blue
    }
}

/// Parses a `#rrggbb` color, falling back to gray
pub fn hex_color(hex: &str) -> Color {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 {
        return Color::Gray;
    }
    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|part| u8::from_str_radix(part, 16).ok())
    };
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::Gray,
    }
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}

fn placeholder(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::DarkGray),
    ))
}

fn detail_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<12}", label), Style::default().fg(Color::Gray)),
        Span::raw(value.to_string()),
    ])
}

/// Renders the current-conditions panel
pub fn render_current(frame: &mut Frame, area: Rect, view: Option<&CurrentView>) {
    let block = panel(" Now ");

    let Some(view) = view else {
        let paragraph = Paragraph::new(placeholder("Waiting for weather data...")).block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let lines = vec![
        Line::from(Span::styled(
            view.place.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            view.date.clone(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw(format!("{} ", condition_glyph(view.condition.kind()))),
            Span::styled(
                format!("{}°C", view.temperature),
                Style::default()
                    .fg(temperature_color(view.temperature))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  {}", view.condition.description)),
        ]),
        Line::from(""),
        detail_line("Feels like", &view.feels_like),
        detail_line("Humidity", &view.humidity),
        detail_line("Wind", &view.wind),
        detail_line("Pressure", &view.pressure),
        detail_line("Sunrise", &view.sunrise),
        detail_line("Sunset", &view.sunset),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Renders the hourly strip with a temperature sparkline underneath
pub fn render_hourly(frame: &mut Frame, area: Rect, items: &[HourlyItem]) {
    let block = panel(" Next 24 hours ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if items.is_empty() {
        frame.render_widget(Paragraph::new(placeholder("No forecast yet")), inner);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(inner);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, items.len() as u32); items.len()])
        .split(rows[0]);

    for (item, column) in items.iter().zip(columns.iter()) {
        let lines = vec![
            Line::from(Span::styled(
                item.hour.clone(),
                Style::default().fg(Color::Gray),
            )),
            Line::from(condition_glyph(item.condition.kind())),
            Line::from(Span::styled(
                format!("{}°", item.temperature),
                Style::default().fg(temperature_color(item.temperature)),
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            *column,
        );
    }

    let temperatures: Vec<i64> = items.iter().map(|item| item.temperature).collect();
    frame.render_widget(TemperatureSparkline::new(&temperatures), rows[1]);
}

/// Renders one line per day card
pub fn render_daily(frame: &mut Frame, area: Rect, items: &[DailyItem]) {
    let block = panel(" 5-day forecast ");

    if items.is_empty() {
        frame.render_widget(Paragraph::new(placeholder("No forecast yet")).block(block), area);
        return;
    }

    let lines: Vec<Line> = items
        .iter()
        .map(|day| {
            let max = round_half_up(day.temp_max);
            let min = round_half_up(day.temp_min);
            Line::from(vec![
                Span::styled(
                    format!("{:<5}", day.day),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("{} ", condition_glyph(day.condition.kind()))),
                Span::styled(
                    format!("{:>4}°", max),
                    Style::default().fg(temperature_color(max)),
                ),
                Span::styled(format!("{:>4}°", min), Style::default().fg(Color::Gray)),
                Span::raw(format!("  {}", day.condition.description)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Renders the air-quality panel
pub fn render_air_quality(frame: &mut Frame, area: Rect, view: Option<&AirQualityView>) {
    let block = panel(" Air quality ");

    let Some(view) = view else {
        frame.render_widget(Paragraph::new(placeholder("No data yet")).block(block), area);
        return;
    };

    let color = hex_color(view.color);
    let lines = vec![
        Line::from(vec![
            Span::raw("AQI  "),
            Span::styled(
                view.aqi.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", view.label), Style::default().fg(color)),
        ]),
        Line::from(""),
        detail_line("PM2.5", &view.pm2_5),
        detail_line("PM10", &view.pm10),
        detail_line("O₃", &view.o3),
        detail_line("NO₂", &view.no2),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Renders the map panel, or its loading placeholder
pub fn render_map(frame: &mut Frame, area: Rect, view: Option<&MapView>) {
    let block = panel(" Temperature map ");

    let Some(view) = view else {
        let paragraph = Paragraph::new(placeholder("Map loading..."))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let lines = vec![
        Line::from(format!(
            "Centered on {:.4}, {:.4} at zoom {}",
            view.coordinates.latitude, view.coordinates.longitude, view.zoom
        )),
        Line::from(""),
        Line::from(Span::styled(
            view.url.clone(),
            Style::default().fg(Color::Blue),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

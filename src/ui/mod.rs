//! UI rendering module for Skycast
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod overlay;
pub mod panels;
pub mod search;
pub mod widgets;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::App;

/// Renders the whole dashboard, with any overlays on top
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search box
            Constraint::Min(0),    // panels
            Constraint::Length(1), // key hints
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(13),
            Constraint::Length(7),
            Constraint::Min(8),
        ])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(7),
            Constraint::Min(4),
        ])
        .split(columns[1]);

    search::render_search_bar(frame, rows[0], app);
    panels::render_current(frame, left[0], app.current.as_ref());
    search::render_recent(frame, left[1], app);
    panels::render_air_quality(frame, left[2], app.air_quality.as_ref());
    panels::render_hourly(frame, right[0], &app.hourly);
    panels::render_daily(frame, right[1], &app.daily);
    panels::render_map(frame, right[2], app.map.as_ref());
    search::render_help_bar(frame, rows[2]);

    if app.loading {
        overlay::render_loading(frame);
    }
    if app.show_help {
        overlay::render_help(frame);
    }
    if let Some(message) = &app.alert {
        overlay::render_alert(frame, message);
    }
}

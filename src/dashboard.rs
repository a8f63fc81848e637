//! Rendering port
//!
//! The controller only talks to the screen through the `Dashboard` trait.
//! `TuiDashboard` implements it on top of a ratatui terminal; tests substitute
//! a recording fake.

use std::io;

use ratatui::{backend::Backend, Terminal};
use tracing::warn;

use crate::app::App;
use crate::ui;
use crate::view::{AirQualityView, CurrentView, DailyItem, HourlyItem, MapView};

/// Everything the controller can show
pub trait Dashboard {
    fn render_current(&mut self, view: CurrentView);
    fn render_hourly(&mut self, items: Vec<HourlyItem>);
    fn render_daily(&mut self, items: Vec<DailyItem>);
    fn render_air_quality(&mut self, view: AirQualityView);
    fn render_map(&mut self, view: MapView);
    /// Rebuilds the recent-search shortcuts
    fn render_recent(&mut self, names: &[String]);
    /// Enters or leaves loading mode
    fn set_loading(&mut self, loading: bool);
    /// Shows a blocking message
    fn alert(&mut self, message: &str);
}

/// Dashboard drawn on a terminal
///
/// Every port call updates the screen state and redraws immediately, so the
/// loading overlay is visible while the event loop awaits a fetch cycle.
pub struct TuiDashboard<B: Backend> {
    terminal: Terminal<B>,
    app: App,
}

impl<B: Backend> TuiDashboard<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            app: App::new(),
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    /// Draws the current screen state
    pub fn draw(&mut self) -> io::Result<()> {
        let app = &self.app;
        self.terminal.draw(|frame| ui::render(frame, app))?;
        Ok(())
    }

    fn redraw(&mut self) {
        if let Err(e) = self.draw() {
            warn!(error = %e, "failed to draw dashboard");
        }
    }
}

impl<B: Backend> Dashboard for TuiDashboard<B> {
    fn render_current(&mut self, view: CurrentView) {
        self.app.current = Some(view);
        self.redraw();
    }

    fn render_hourly(&mut self, items: Vec<HourlyItem>) {
        self.app.hourly = items;
        self.redraw();
    }

    fn render_daily(&mut self, items: Vec<DailyItem>) {
        self.app.daily = items;
        self.redraw();
    }

    fn render_air_quality(&mut self, view: AirQualityView) {
        self.app.air_quality = Some(view);
        self.redraw();
    }

    fn render_map(&mut self, view: MapView) {
        self.app.map = Some(view);
        self.redraw();
    }

    fn render_recent(&mut self, names: &[String]) {
        self.app.set_recent(names);
        self.redraw();
    }

    fn set_loading(&mut self, loading: bool) {
        self.app.loading = loading;
        self.redraw();
    }

    fn alert(&mut self, message: &str) {
        self.app.alert = Some(message.to_string());
        self.redraw();
    }
}

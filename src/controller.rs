//! Fetch-cycle orchestration
//!
//! The controller owns the application state (the place on screen and the
//! recent-search list) and runs every fetch cycle: resolve a location, fetch
//! the report, hand view models to the dashboard. Errors never escape a cycle;
//! they are logged and shown as a single alert.

use chrono::Local;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::dashboard::Dashboard;
use crate::data::{fetch_report, Coordinates, Place, WeatherApi, WeatherError, WeatherReport};
use crate::location::{resolve_place, Geolocator, LocationError, ResolveError};
use crate::recent::{RecentSearches, RecentStore};
use crate::view;

/// Alert shown when a weather cycle fails
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching weather data. Please try again.";

/// Alert shown when the device position could not be obtained
pub const LOCATION_ERROR_MESSAGE: &str =
    "Unable to access your location. Please check your network connection or pass --city.";

/// Alert shown when no geolocation method exists
pub const LOCATION_UNSUPPORTED_MESSAGE: &str = "Geolocation is not supported on this platform.";

/// Anything that can fail during one fetch cycle
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error(transparent)]
    Location(#[from] LocationError),
}

impl CycleError {
    /// Text of the alert shown to the user
    pub fn alert_message(&self) -> &'static str {
        match self {
            CycleError::Location(LocationError::Unsupported) => LOCATION_UNSUPPORTED_MESSAGE,
            CycleError::Location(_) => LOCATION_ERROR_MESSAGE,
            CycleError::Resolve(_) | CycleError::Weather(_) => FETCH_ERROR_MESSAGE,
        }
    }
}

/// Settings the controller needs from the command line
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Key appended to map tile URLs
    pub api_key: String,
    /// Place shown when the device position is unavailable at startup
    pub default_city: String,
}

/// State shared across cycles
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Place currently on screen
    pub current_place: Option<Place>,
    /// Recent named searches, newest first
    pub recent: RecentSearches,
}

/// Drives fetch cycles against a weather provider and a dashboard
pub struct Controller<W: WeatherApi, D: Dashboard> {
    api: W,
    geolocator: Box<dyn Geolocator>,
    dashboard: D,
    store: Option<RecentStore>,
    config: ControllerConfig,
    state: AppState,
}

impl<W: WeatherApi, D: Dashboard> Controller<W, D> {
    /// Creates a controller, loading and rendering the persisted recent list
    pub fn new(
        api: W,
        geolocator: Box<dyn Geolocator>,
        mut dashboard: D,
        store: Option<RecentStore>,
        config: ControllerConfig,
    ) -> Self {
        let recent = store.as_ref().map(RecentStore::load).unwrap_or_default();
        dashboard.render_recent(recent.names());

        Self {
            api,
            geolocator,
            dashboard,
            store,
            config,
            state: AppState {
                current_place: None,
                recent,
            },
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dashboard(&self) -> &D {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut D {
        &mut self.dashboard
    }

    /// Shows the initial place
    ///
    /// A city given on the command line is searched directly. Otherwise the
    /// device position is tried first, and any location failure falls back to
    /// the default city without an alert.
    pub async fn startup(&mut self, initial_city: Option<String>) {
        if let Some(city) = initial_city.as_deref().map(str::trim) {
            if !city.is_empty() {
                self.search(city).await;
                return;
            }
        }

        self.dashboard.set_loading(true);

        let located = self.geolocator.locate().await;
        let result = match located {
            Ok(at) => self.show_coordinates(at).await,
            Err(e) => {
                warn!(error = %e, city = %self.config.default_city, "location unavailable, using default city");
                let city = self.config.default_city.clone();
                self.show_named(&city).await
            }
        };

        self.dashboard.set_loading(false);
        self.report_failure(result);
    }

    /// Runs a named-city search
    pub async fn search(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }

        self.dashboard.set_loading(true);
        let result = self.show_named(name).await;
        self.dashboard.set_loading(false);
        self.report_failure(result);
    }

    /// Shows the weather at the device position
    pub async fn request_location(&mut self) {
        self.dashboard.set_loading(true);

        let located = self.geolocator.locate().await;
        let result = match located {
            Ok(at) => self.show_coordinates(at).await,
            Err(e) => Err(CycleError::from(e)),
        };

        self.dashboard.set_loading(false);
        self.report_failure(result);
    }

    async fn show_named(&mut self, name: &str) -> Result<(), CycleError> {
        info!(query = name, "searching for place");

        let place = resolve_place(&self.api, name).await?;
        let report = fetch_report(&self.api, place.coordinates).await?;

        self.render_report(&place.label(), place.coordinates, &report);
        self.record(&place.name);
        self.state.current_place = Some(place);
        Ok(())
    }

    async fn show_coordinates(&mut self, at: Coordinates) -> Result<(), CycleError> {
        let report = fetch_report(&self.api, at).await?;

        let place = Place {
            name: report.current.name.clone(),
            country: report.current.country.clone(),
            coordinates: at,
        };
        self.render_report(&place.label(), at, &report);
        self.state.current_place = Some(place);
        Ok(())
    }

    fn render_report(&mut self, label: &str, at: Coordinates, report: &WeatherReport) {
        let today = Local::now().date_naive();

        self.dashboard
            .render_current(view::current_view(label, &report.current, today));
        self.dashboard
            .render_hourly(view::hourly_view(&report.forecast));
        self.dashboard
            .render_daily(view::daily_view(&report.forecast));
        self.dashboard
            .render_air_quality(view::air_quality_view(&report.air_quality));
        self.dashboard
            .render_map(view::map_view(at, &self.config.api_key));
    }

    /// Adds a name to the recent list, persists it, and re-renders the shortcuts
    fn record(&mut self, name: &str) {
        self.state.recent.record(name);

        if let Some(store) = &self.store {
            if let Err(e) = store.save(&self.state.recent) {
                warn!(error = %e, path = %store.path().display(), "failed to save recent searches");
            }
        }

        self.dashboard.render_recent(self.state.recent.names());
    }

    fn report_failure(&mut self, result: Result<(), CycleError>) {
        if let Err(e) = result {
            error!(error = %e, "weather update failed");
            self.dashboard.alert(e.alert_message());
        }
    }
}

//! Skycast - Weather dashboard for the terminal
//!
//! A terminal UI application that displays current conditions, forecasts,
//! air quality, and a temperature map for any city or your current location.

use std::io;
use std::panic;
use std::process;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use skycast::app::Action;
use skycast::cli::{Cli, StartupConfig};
use skycast::controller::{Controller, ControllerConfig};
use skycast::dashboard::TuiDashboard;
use skycast::data::OpenWeatherClient;
use skycast::location::{DisabledGeolocator, Geolocator, IpGeolocator};
use skycast::logging;
use skycast::recent::{default_data_dir, RecentStore};

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    let data_dir = config.data_dir.clone().or_else(default_data_dir);
    if let Some(path) = logging::log_path(config.log_file.as_deref(), data_dir.as_deref()) {
        if let Err(e) = logging::init(&path) {
            eprintln!("Warning: could not open log file {}: {}", path.display(), e);
        }
    }
    info!(locate = config.locate, "starting skycast");

    let api = OpenWeatherClient::new(config.api_key.clone())?;
    let geolocator: Box<dyn Geolocator> = if config.locate {
        Box::new(IpGeolocator::new())
    } else {
        Box::new(DisabledGeolocator)
    };
    let store = data_dir.map(RecentStore::with_dir);
    if store.is_none() {
        warn!("no data directory available, recent searches will not be saved");
    }

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    let mut controller = Controller::new(
        api,
        geolocator,
        TuiDashboard::new(terminal),
        store,
        ControllerConfig {
            api_key: config.api_key.clone(),
            default_city: config.default_city.clone(),
        },
    );

    let result = run(&mut controller, config.initial_city).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        controller.dashboard_mut().terminal_mut().backend_mut(),
        LeaveAlternateScreen
    )?;

    result
}

/// Main event loop
async fn run(
    controller: &mut Controller<OpenWeatherClient, TuiDashboard<CrosstermBackend<io::Stdout>>>,
    initial_city: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    controller.startup(initial_city).await;

    loop {
        // Render UI
        controller.dashboard_mut().draw()?;

        // Poll for keyboard events with 100ms timeout
        let mut action = None;
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    action = controller.dashboard_mut().app_mut().handle_key(key);
                }
            }
        }

        match action {
            Some(Action::Search(name)) => controller.search(&name).await,
            Some(Action::Locate) => controller.request_location().await,
            None => {}
        }

        // Check if we should quit
        if controller.dashboard().app().should_quit {
            break;
        }
    }

    info!("skycast exiting");
    Ok(())
}

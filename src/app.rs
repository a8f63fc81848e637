//! Application screen state for Skycast
//!
//! This module holds everything the terminal shows (the rendered panels, the
//! search box, recent shortcuts, and overlays) and turns keyboard input into
//! actions for the controller.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::view::{AirQualityView, CurrentView, DailyItem, HourlyItem, MapView};

/// Which control receives typed keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The search text field
    #[default]
    Search,
    /// The recent-searches shortcut list
    Recent,
}

/// Requests the controller should act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Run a named-city search
    Search(String),
    /// Ask for the device location
    Locate,
}

/// Screen state
#[derive(Debug, Default)]
pub struct App {
    /// Current-conditions panel, once rendered
    pub current: Option<CurrentView>,
    /// Hourly strip
    pub hourly: Vec<HourlyItem>,
    /// Daily cards
    pub daily: Vec<DailyItem>,
    /// Air-quality panel, once rendered
    pub air_quality: Option<AirQualityView>,
    /// Map panel, once rendered
    pub map: Option<MapView>,
    /// Recent-search shortcuts, newest first
    pub recent: Vec<String>,
    /// Whether a fetch cycle is in flight
    pub loading: bool,
    /// Blocking message shown until a key is pressed
    pub alert: Option<String>,
    /// Contents of the search field
    pub input: String,
    /// Control that receives typed keys
    pub focus: Focus,
    /// Highlighted shortcut in the recent list
    pub recent_index: usize,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the recent shortcuts, keeping the highlight in range
    pub fn set_recent(&mut self, names: &[String]) {
        self.recent = names.to_vec();
        if self.recent_index >= self.recent.len() {
            self.recent_index = 0;
        }
        if self.recent.is_empty() && self.focus == Focus::Recent {
            self.focus = Focus::Search;
        }
    }

    /// Handles keyboard input and returns an action for the controller
    ///
    /// # Key Bindings
    /// - `Ctrl+C`: Quit the application
    /// - any key (while an alert is shown): Dismiss the alert
    /// - `Esc`: Quit (or close help)
    /// - `F1`: Toggle help
    /// - `Ctrl+L`: Use my location
    /// - `Tab`: Switch focus between the search box and recent searches
    /// - `Enter` (search box): Search for the typed place
    /// - `Up`/`k`, `Down`/`j` (recent list): Move highlight
    /// - `Enter` (recent list): Search for the highlighted place
    pub fn handle_key(&mut self, key_event: KeyEvent) -> Option<Action> {
        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key_event.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        // Alerts intercept every key
        if self.alert.is_some() {
            self.alert = None;
            return None;
        }

        if self.show_help {
            if matches!(key_event.code, KeyCode::Esc | KeyCode::F(1)) {
                self.show_help = false;
            }
            return None;
        }

        match key_event.code {
            KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::F(1) => {
                self.show_help = true;
                None
            }
            KeyCode::Char('l') if ctrl => Some(Action::Locate),
            KeyCode::Tab | KeyCode::BackTab => {
                self.toggle_focus();
                None
            }
            _ => match self.focus {
                Focus::Search => self.handle_search_key(key_event, ctrl),
                Focus::Recent => self.handle_recent_key(key_event),
            },
        }
    }

    fn handle_search_key(&mut self, key_event: KeyEvent, ctrl: bool) -> Option<Action> {
        match key_event.code {
            KeyCode::Enter => {
                let query = self.input.trim();
                if query.is_empty() {
                    None
                } else {
                    Some(Action::Search(query.to_string()))
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Char(c) if !ctrl => {
                self.input.push(c);
                None
            }
            _ => None,
        }
    }

    fn handle_recent_key(&mut self, key_event: KeyEvent) -> Option<Action> {
        match key_event.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection_up();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection_down();
                None
            }
            KeyCode::Enter => {
                let name = self.recent.get(self.recent_index)?.clone();
                self.input = name.clone();
                Some(Action::Search(name))
            }
            _ => None,
        }
    }

    /// Switches focus, skipping the recent list while it is empty
    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Search if !self.recent.is_empty() => Focus::Recent,
            _ => Focus::Search,
        };
    }

    /// Moves the highlight up, wrapping to bottom if at top
    fn move_selection_up(&mut self) {
        let count = self.recent.len();
        if count == 0 {
            return;
        }
        if self.recent_index == 0 {
            self.recent_index = count - 1;
        } else {
            self.recent_index -= 1;
        }
    }

    /// Moves the highlight down, wrapping to top if at bottom
    fn move_selection_down(&mut self) {
        let count = self.recent.len();
        if count == 0 {
            return;
        }
        self.recent_index = (self.recent_index + 1) % count;
    }
}

//! Command-line interface parsing for Skycast
//!
//! This module handles parsing of CLI arguments using clap and turns them
//! into the settings the application starts with.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

/// Place shown when the device position cannot be determined
pub const DEFAULT_CITY: &str = "London";

/// Error types for CLI argument validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    /// No API key on the command line or in the environment
    #[error("An OpenWeatherMap API key is required: pass --api-key or set OPENWEATHER_API_KEY")]
    MissingApiKey,

    /// The fallback city is blank
    #[error("The default city must not be empty")]
    EmptyDefaultCity,
}

/// Skycast - Current weather, forecast, and air quality in the terminal
#[derive(Parser, Debug)]
#[command(name = "skycast")]
#[command(about = "Current weather, forecast, and air quality in the terminal")]
#[command(version)]
pub struct Cli {
    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Search for this city on startup instead of using your location
    ///
    /// Examples:
    ///   skycast --city Paris
    ///   skycast --city "New York"
    #[arg(long, value_name = "NAME")]
    pub city: Option<String>,

    /// City shown when your location is unavailable
    #[arg(long, value_name = "NAME", default_value = DEFAULT_CITY)]
    pub default_city: String,

    /// Never look up your location
    #[arg(long)]
    pub no_locate: bool,

    /// Directory for recent searches and the log file
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Write logs to this file instead of the data directory
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    /// Key sent with every OpenWeatherMap request
    pub api_key: String,
    /// City searched on startup, if any
    pub initial_city: Option<String>,
    /// Fallback city when location is unavailable
    pub default_city: String,
    /// Whether location lookups are allowed
    pub locate: bool,
    /// Explicit data directory
    pub data_dir: Option<PathBuf>,
    /// Explicit log file
    pub log_file: Option<PathBuf>,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// Blank values are treated as absent.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if the API key is missing or the default city is blank
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let api_key = cli
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(CliError::MissingApiKey)?;

        let default_city = cli.default_city.trim();
        if default_city.is_empty() {
            return Err(CliError::EmptyDefaultCity);
        }

        let initial_city = cli
            .city
            .as_deref()
            .map(str::trim)
            .filter(|city| !city.is_empty())
            .map(str::to_string);

        Ok(StartupConfig {
            api_key: api_key.to_string(),
            initial_city,
            default_city: default_city.to_string(),
            locate: !cli.no_locate,
            data_dir: cli.data_dir.clone(),
            log_file: cli.log_file.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli() -> Cli {
        Cli {
            api_key: Some("abc123".to_string()),
            city: None,
            default_city: DEFAULT_CITY.to_string(),
            no_locate: false,
            data_dir: None,
            log_file: None,
        }
    }

    #[test]
    fn test_from_cli_defaults() {
        let config = StartupConfig::from_cli(&cli()).unwrap();
        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.default_city, "London");
        assert!(config.initial_city.is_none());
        assert!(config.locate);
    }

    #[test]
    fn test_from_cli_missing_api_key() {
        let cli = Cli {
            api_key: None,
            ..cli()
        };
        assert_eq!(StartupConfig::from_cli(&cli), Err(CliError::MissingApiKey));
    }

    #[test]
    fn test_from_cli_blank_api_key_is_missing() {
        let cli = Cli {
            api_key: Some("   ".to_string()),
            ..cli()
        };
        assert_eq!(StartupConfig::from_cli(&cli), Err(CliError::MissingApiKey));
    }

    #[test]
    fn test_from_cli_blank_default_city() {
        let cli = Cli {
            default_city: " ".to_string(),
            ..cli()
        };
        assert_eq!(
            StartupConfig::from_cli(&cli),
            Err(CliError::EmptyDefaultCity)
        );
    }

    #[test]
    fn test_from_cli_trims_city_and_disables_location() {
        let cli = Cli {
            city: Some("  Paris ".to_string()),
            no_locate: true,
            ..cli()
        };
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.initial_city.as_deref(), Some("Paris"));
        assert!(!config.locate);
    }

    #[test]
    fn test_from_cli_blank_city_is_ignored() {
        let cli = Cli {
            city: Some("".to_string()),
            ..cli()
        };
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert!(config.initial_city.is_none());
    }
}

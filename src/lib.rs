//! Skycast Library
//!
//! Weather dashboard for the terminal: current conditions, a 24-hour strip,
//! a 5-day outlook, air quality, and a temperature map link for any city or
//! the machine's own location.

pub mod app;
pub mod cli;
pub mod controller;
pub mod dashboard;
pub mod data;
pub mod location;
pub mod logging;
pub mod recent;
pub mod ui;
pub mod view;

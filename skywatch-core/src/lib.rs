//! Core library for the `skywatch` weather dashboard.
//!
//! This crate defines:
//! - Configuration & the durable last-city store
//! - The weather provider abstraction and its OpenWeather implementation
//! - The dashboard state container and its update actions
//! - The fetch-cycle orchestrator and the side-effect seams it drives
//!
//! It is used by `skywatch-cli`, but can also be reused by other binaries or
//! services.

pub mod config;
pub mod cycle;
pub mod effects;
pub mod error;
pub mod model;
pub mod provider;
pub mod state;

pub use config::{Config, FileCityStore};
pub use cycle::{CycleReport, Forecaster, StageOutcome};
pub use effects::{CityStore, InMemoryCityStore, NoEffects, RainEffects};
pub use error::FetchError;
pub use model::{
    ChartSeries, Coordinates, CurrentWeather, ForecastSample, ForecastSeries, WeatherAlert,
    kelvin_to_celsius,
};
pub use provider::{OpenWeatherProvider, WeatherProvider};
pub use state::{Dashboard, DashboardUpdate};

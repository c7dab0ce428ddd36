use crate::error::FetchError;
use crate::model::{Coordinates, CurrentWeather, ForecastSeries, WeatherAlert};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Read-only weather data source behind the dashboard.
///
/// The three operations map to the three sequential calls of one fetch cycle;
/// alerts are keyed by coordinates because the provider exposes them on a
/// different endpoint than the city-keyed ones.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// 5-day/3-hour forecast for a city.
    async fn forecast(&self, city: &str) -> Result<ForecastSeries, FetchError>;

    /// Current conditions for a city.
    async fn current(&self, city: &str) -> Result<CurrentWeather, FetchError>;

    /// Active alerts at a location. An empty list is a valid answer.
    async fn alerts(&self, coord: Coordinates) -> Result<Vec<WeatherAlert>, FetchError>;
}

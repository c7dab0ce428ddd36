use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::FetchError;
use crate::model::{Coordinates, CurrentWeather, ForecastSample, ForecastSeries, WeatherAlert};

use super::WeatherProvider;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// OpenWeather client for the three dashboard endpoints: `forecast`,
/// `weather` and `onecall`.
///
/// Requests no unit conversion, so temperatures arrive in Kelvin and stay
/// that way in the models. No timeout is set beyond the transport default.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point the provider at a different host, e.g. a mock server in tests.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    async fn get_json<T>(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(%url, "requesting OpenWeather endpoint");

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Provider {
                status,
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn forecast(&self, city: &str) -> Result<ForecastSeries, FetchError> {
        let parsed: OwForecastResponse = self.get_json("forecast", &[("q", city)]).await?;

        let samples = parsed
            .list
            .into_iter()
            .map(|entry| {
                let description = entry
                    .weather
                    .into_iter()
                    .next()
                    .map(|w| w.description)
                    .unwrap_or_default();

                ForecastSample {
                    timestamp: entry.dt,
                    label: entry.dt_txt,
                    temperature_k: entry.main.temp,
                    humidity_pct: entry.main.humidity,
                    wind_speed_mps: entry.wind.speed,
                    precipitation_mm: entry.rain.and_then(|r| r.three_h).unwrap_or(0.0),
                    description,
                }
            })
            .collect();

        Ok(ForecastSeries {
            city: parsed.city.name,
            samples,
        })
    }

    async fn current(&self, city: &str) -> Result<CurrentWeather, FetchError> {
        let parsed: OwCurrentResponse = self.get_json("weather", &[("q", city)]).await?;

        let primary = parsed.weather.into_iter().next();
        let (condition, description, icon) = match primary {
            Some(w) => (w.main, w.description, w.icon),
            None => (String::new(), String::new(), String::new()),
        };

        Ok(CurrentWeather {
            city: parsed.name,
            temperature_k: parsed.main.temp,
            condition,
            description,
            icon,
            coord: Coordinates {
                lat: parsed.coord.lat,
                lon: parsed.coord.lon,
            },
            sunrise: parsed.sys.sunrise,
            sunset: parsed.sys.sunset,
            observed_at: parsed.dt,
        })
    }

    async fn alerts(&self, coord: Coordinates) -> Result<Vec<WeatherAlert>, FetchError> {
        let lat = coord.lat.to_string();
        let lon = coord.lon.to_string();
        let parsed: OwOneCallResponse = self
            .get_json("onecall", &[("lat", lat.as_str()), ("lon", lon.as_str())])
            .await?;

        // The provider omits the field entirely when nothing is active.
        let alerts = parsed
            .alerts
            .unwrap_or_default()
            .into_iter()
            .map(|a| WeatherAlert {
                event: a.event,
                description: a.description,
            })
            .collect();

        Ok(alerts)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    #[serde(default)]
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    coord: OwCoord,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwRain {
    #[serde(rename = "3h")]
    three_h: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    dt_txt: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    rain: Option<OwRain>,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct OwAlert {
    event: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwOneCallResponse {
    alerts: Option<Vec<OwAlert>>,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}

use serde::{Deserialize, Serialize};

/// Exact conversion used everywhere a Kelvin temperature is shown or charted.
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - 273.15
}

/// How many forecast samples the summary view shows. The provider returns
/// 3-hour samples, so "5-day" is a surface label, not a day-boundary filter.
pub const SUMMARY_SAMPLES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Current conditions for one city, replaced wholesale on every fetch.
///
/// Temperatures stay in Kelvin as delivered by the provider; conversion
/// happens only at the display/chart edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub city: String,
    pub temperature_k: f64,
    /// Primary condition group, e.g. "Rain", "Clear", "Clouds". Empty when
    /// the provider sent no condition at all.
    pub condition: String,
    pub description: String,
    pub icon: String,
    pub coord: Coordinates,
    pub sunrise: i64,
    pub sunset: i64,
    pub observed_at: i64,
}

impl CurrentWeather {
    /// The rain check is an exact, case-sensitive match on the primary
    /// condition group. "Drizzle", "Clouds" or a padded "Rain " do not count.
    pub fn is_raining(&self) -> bool {
        self.condition == "Rain"
    }
}

/// One 3-hour forecast sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: i64,
    /// Provider-formatted timestamp label ("2024-06-15 12:00:00"), used
    /// verbatim as the chart label.
    pub label: String,
    pub temperature_k: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    /// Rain volume over the 3-hour window, 0.0 when the provider omitted it.
    pub precipitation_mm: f64,
    pub description: String,
}

/// The ordered forecast list for one city, exactly as the provider sent it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub city: String,
    pub samples: Vec<ForecastSample>,
}

impl ForecastSeries {
    /// First five samples in original order. Intentionally not deduplicated
    /// by calendar day, matching the dashboard's "5-day" panel.
    pub fn summary(&self) -> &[ForecastSample] {
        let n = self.samples.len().min(SUMMARY_SAMPLES);
        &self.samples[..n]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherAlert {
    pub event: String,
    pub description: String,
}

/// Four parallel numeric sequences aligned on one label sequence, ready for
/// a line-chart collaborator. Length and order mirror the upstream list; no
/// smoothing or gap filling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub temperature_c: Vec<f64>,
    pub humidity_pct: Vec<f64>,
    pub wind_speed_mps: Vec<f64>,
    pub precipitation_mm: Vec<f64>,
}

impl ChartSeries {
    pub fn from_forecast(series: &ForecastSeries) -> Self {
        let mut chart = ChartSeries::default();
        for sample in &series.samples {
            chart.labels.push(sample.label.clone());
            chart.temperature_c.push(kelvin_to_celsius(sample.temperature_k));
            chart.humidity_pct.push(f64::from(sample.humidity_pct));
            chart.wind_speed_mps.push(sample.wind_speed_mps);
            chart.precipitation_mm.push(sample.precipitation_mm);
        }
        chart
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

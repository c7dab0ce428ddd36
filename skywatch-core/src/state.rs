use crate::model::{CurrentWeather, ForecastSeries, WeatherAlert};

/// Everything the dashboard can show, held as at most one snapshot per slot.
///
/// Slots are only ever replaced wholesale by [`DashboardUpdate`] actions;
/// a failed fetch stage leaves the previous snapshot in place.
#[derive(Debug, Default)]
pub struct Dashboard {
    /// The most recently submitted city query.
    pub city: Option<String>,
    pub current: Option<CurrentWeather>,
    pub forecast: Option<ForecastSeries>,
    /// `None` until alerts have been fetched at least once; `Some(vec![])`
    /// means the provider answered with no active alerts. The view renders
    /// those two cases differently.
    pub alerts: Option<Vec<WeatherAlert>>,
    pub rain: bool,
}

/// One update per fetch stage, plus the user's query itself.
#[derive(Debug)]
pub enum DashboardUpdate {
    CitySubmitted(String),
    ForecastLoaded(ForecastSeries),
    CurrentLoaded(CurrentWeather),
    RainEvaluated(bool),
    AlertsLoaded(Vec<WeatherAlert>),
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one update. Pure with respect to its input: no I/O, no effect
    /// handling, just slot replacement.
    pub fn apply(&mut self, update: DashboardUpdate) {
        match update {
            DashboardUpdate::CitySubmitted(city) => self.city = Some(city),
            DashboardUpdate::ForecastLoaded(series) => self.forecast = Some(series),
            DashboardUpdate::CurrentLoaded(current) => self.current = Some(current),
            DashboardUpdate::RainEvaluated(rain) => self.rain = rain,
            DashboardUpdate::AlertsLoaded(alerts) => self.alerts = Some(alerts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coordinates, ForecastSample};

    fn current(city: &str, condition: &str) -> CurrentWeather {
        CurrentWeather {
            city: city.to_string(),
            temperature_k: 285.0,
            condition: condition.to_string(),
            description: condition.to_lowercase(),
            icon: "04d".to_string(),
            coord: Coordinates { lat: 0.0, lon: 0.0 },
            sunrise: 0,
            sunset: 0,
            observed_at: 0,
        }
    }

    fn forecast(city: &str, n: usize) -> ForecastSeries {
        ForecastSeries {
            city: city.to_string(),
            samples: (0..n)
                .map(|i| ForecastSample {
                    timestamp: i as i64,
                    label: format!("label-{i}"),
                    temperature_k: 280.0,
                    humidity_pct: 50,
                    wind_speed_mps: 1.0,
                    precipitation_mm: 0.0,
                    description: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn starts_empty() {
        let dash = Dashboard::new();
        assert!(dash.city.is_none());
        assert!(dash.current.is_none());
        assert!(dash.forecast.is_none());
        assert!(dash.alerts.is_none());
        assert!(!dash.rain);
    }

    #[test]
    fn slots_are_replaced_wholesale() {
        let mut dash = Dashboard::new();

        dash.apply(DashboardUpdate::ForecastLoaded(forecast("London", 8)));
        dash.apply(DashboardUpdate::ForecastLoaded(forecast("Phoenix", 2)));

        let series = dash.forecast.expect("forecast slot must be set");
        assert_eq!(series.city, "Phoenix");
        assert_eq!(series.samples.len(), 2);
    }

    #[test]
    fn empty_alert_list_is_distinct_from_never_fetched() {
        let mut dash = Dashboard::new();
        assert!(dash.alerts.is_none());

        dash.apply(DashboardUpdate::AlertsLoaded(Vec::new()));
        assert!(dash.alerts.as_ref().is_some_and(|a| a.is_empty()));
    }

    #[test]
    fn rain_flag_follows_evaluation() {
        let mut dash = Dashboard::new();

        dash.apply(DashboardUpdate::CurrentLoaded(current("London", "Rain")));
        dash.apply(DashboardUpdate::RainEvaluated(true));
        assert!(dash.rain);

        dash.apply(DashboardUpdate::CurrentLoaded(current("Phoenix", "Clear")));
        dash.apply(DashboardUpdate::RainEvaluated(false));
        assert!(!dash.rain);
    }
}

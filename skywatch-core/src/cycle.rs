//! The fetch cycle: forecast, current conditions, rain evaluation, alerts.
//!
//! The sequence is an explicit pipeline with named intermediate results;
//! the coordinates the alerts stage needs flow out of the current-weather
//! stage as data. Failures are logged and swallowed, but each stage's
//! outcome is recorded so "silently degraded" is inspectable.

use tracing::{debug, warn};

use crate::effects::{CityStore, RainEffects};
use crate::error::FetchError;
use crate::provider::WeatherProvider;
use crate::state::{Dashboard, DashboardUpdate};

/// What happened to one stage of a cycle.
#[derive(Debug)]
pub enum StageOutcome {
    Completed,
    Failed(FetchError),
    /// An earlier stage failed, so this one never ran.
    Skipped,
}

impl StageOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, StageOutcome::Completed)
    }
}

/// Per-stage record of one cycle, for diagnostics and tests. The dashboard
/// view never renders failures; sections backed by a failed stage simply
/// keep their previous content.
#[derive(Debug)]
pub struct CycleReport {
    pub forecast: StageOutcome,
    pub current: StageOutcome,
    pub alerts: StageOutcome,
}

/// Owns the provider and the effect seams, and runs fetch cycles against a
/// [`Dashboard`].
#[derive(Debug)]
pub struct Forecaster<P, S, E> {
    provider: P,
    store: S,
    effects: E,
}

impl<P, S, E> Forecaster<P, S, E>
where
    P: WeatherProvider,
    S: CityStore,
    E: RainEffects,
{
    pub fn new(provider: P, store: S, effects: E) -> Self {
        Self {
            provider,
            store,
            effects,
        }
    }

    /// Last city recorded by a successful cycle, if any.
    pub fn saved_city(&self) -> Option<String> {
        self.store.load()
    }

    /// Run one complete cycle for `city`.
    ///
    /// Stages run strictly in order and each one suspends until the previous
    /// finished. A failed stage is logged, its dashboard slot keeps the prior
    /// snapshot, and the remaining stages are skipped; updates already
    /// applied in the same cycle stay in place. There is no retry, timeout or
    /// cancellation, and overlapping cycles are not guarded against.
    pub async fn run_cycle(&mut self, dashboard: &mut Dashboard, city: &str) -> CycleReport {
        debug!(%city, "starting fetch cycle");
        dashboard.apply(DashboardUpdate::CitySubmitted(city.to_string()));

        let series = match self.provider.forecast(city).await {
            Ok(series) => series,
            Err(err) => {
                warn!(%city, error = %err, "forecast stage failed");
                return CycleReport {
                    forecast: StageOutcome::Failed(err),
                    current: StageOutcome::Skipped,
                    alerts: StageOutcome::Skipped,
                };
            }
        };
        dashboard.apply(DashboardUpdate::ForecastLoaded(series));

        let current = match self.provider.current(city).await {
            Ok(current) => current,
            Err(err) => {
                warn!(%city, error = %err, "current weather stage failed");
                return CycleReport {
                    forecast: StageOutcome::Completed,
                    current: StageOutcome::Failed(err),
                    alerts: StageOutcome::Skipped,
                };
            }
        };

        let coord = current.coord;
        let raining = current.is_raining();
        dashboard.apply(DashboardUpdate::CurrentLoaded(current));

        // Persist the city this cycle actually fetched, never a stale query.
        if let Err(err) = self.store.save(city) {
            warn!(%city, error = %err, "could not persist city");
        }

        dashboard.apply(DashboardUpdate::RainEvaluated(raining));
        if raining {
            self.effects.rain_started();
        } else {
            self.effects.rain_stopped();
        }

        let alerts = match self.provider.alerts(coord).await {
            Ok(alerts) => alerts,
            Err(err) => {
                warn!(%city, error = %err, "alerts stage failed");
                return CycleReport {
                    forecast: StageOutcome::Completed,
                    current: StageOutcome::Completed,
                    alerts: StageOutcome::Failed(err),
                };
            }
        };
        dashboard.apply(DashboardUpdate::AlertsLoaded(alerts));

        CycleReport {
            forecast: StageOutcome::Completed,
            current: StageOutcome::Completed,
            alerts: StageOutcome::Completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{InMemoryCityStore, NoEffects};
    use crate::model::{Coordinates, CurrentWeather, ForecastSample, ForecastSeries, WeatherAlert};
    use async_trait::async_trait;
    use reqwest::StatusCode;

    /// Which stages of the stub provider should answer with an error.
    #[derive(Debug, Default, Clone, Copy)]
    struct Failures {
        forecast: bool,
        current: bool,
        alerts: bool,
    }

    #[derive(Debug)]
    struct StubProvider {
        condition: &'static str,
        failures: Failures,
    }

    impl StubProvider {
        fn ok(condition: &'static str) -> Self {
            Self {
                condition,
                failures: Failures::default(),
            }
        }

        fn failing(failures: Failures) -> Self {
            Self {
                condition: "Clear",
                failures,
            }
        }
    }

    fn provider_error() -> FetchError {
        FetchError::Provider {
            status: StatusCode::NOT_FOUND,
            body: "{\"cod\":\"404\",\"message\":\"city not found\"}".to_string(),
        }
    }

    fn fixture_series(city: &str) -> ForecastSeries {
        ForecastSeries {
            city: city.to_string(),
            samples: (0..8)
                .map(|i| ForecastSample {
                    timestamp: 1_718_420_000 + i * 10_800,
                    label: format!("2024-06-15 {:02}:00:00", i * 3),
                    temperature_k: 290.15 + i as f64,
                    humidity_pct: 55,
                    wind_speed_mps: 4.2,
                    precipitation_mm: 0.0,
                    description: "few clouds".to_string(),
                })
                .collect(),
        }
    }

    fn fixture_current(city: &str, condition: &str) -> CurrentWeather {
        CurrentWeather {
            city: city.to_string(),
            temperature_k: 287.45,
            condition: condition.to_string(),
            description: condition.to_lowercase(),
            icon: "10d".to_string(),
            coord: Coordinates { lat: 51.51, lon: -0.13 },
            sunrise: 1_718_419_200,
            sunset: 1_718_478_000,
            observed_at: 1_718_450_000,
        }
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn forecast(&self, city: &str) -> Result<ForecastSeries, FetchError> {
            if self.failures.forecast {
                return Err(provider_error());
            }
            Ok(fixture_series(city))
        }

        async fn current(&self, city: &str) -> Result<CurrentWeather, FetchError> {
            if self.failures.current {
                return Err(provider_error());
            }
            Ok(fixture_current(city, self.condition))
        }

        async fn alerts(&self, _coord: Coordinates) -> Result<Vec<WeatherAlert>, FetchError> {
            if self.failures.alerts {
                return Err(provider_error());
            }
            Ok(vec![WeatherAlert {
                event: "Flood warning".to_string(),
                description: "River levels rising".to_string(),
            }])
        }
    }

    /// Records every effect invocation in order.
    #[derive(Debug, Default)]
    struct RecordingEffects {
        calls: Vec<&'static str>,
    }

    impl RainEffects for RecordingEffects {
        fn rain_started(&mut self) {
            self.calls.push("rain_started");
        }

        fn rain_stopped(&mut self) {
            self.calls.push("rain_stopped");
        }
    }

    fn forecaster(
        provider: StubProvider,
    ) -> Forecaster<StubProvider, InMemoryCityStore, RecordingEffects> {
        Forecaster::new(provider, InMemoryCityStore::default(), RecordingEffects::default())
    }

    #[tokio::test]
    async fn successful_cycle_fills_all_three_slots() {
        let mut fc = forecaster(StubProvider::ok("Clear"));
        let mut dash = Dashboard::new();

        let report = fc.run_cycle(&mut dash, "London").await;

        assert!(report.forecast.is_completed());
        assert!(report.current.is_completed());
        assert!(report.alerts.is_completed());

        assert_eq!(dash.city.as_deref(), Some("London"));
        assert_eq!(dash.forecast.as_ref().map(|f| f.samples.len()), Some(8));
        let current = dash.current.as_ref().expect("current slot must be set");
        assert_eq!(current.temperature_k, 287.45);
        assert_eq!(current.icon, "10d");
        assert_eq!(dash.alerts.as_ref().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn rain_condition_triggers_theme_and_playback() {
        let mut fc = forecaster(StubProvider::ok("Rain"));
        let mut dash = Dashboard::new();

        fc.run_cycle(&mut dash, "London").await;

        assert!(dash.rain);
        assert_eq!(fc.effects.calls, vec!["rain_started"]);
    }

    #[tokio::test]
    async fn clear_condition_stops_playback() {
        let mut fc = forecaster(StubProvider::ok("Clear"));
        let mut dash = Dashboard::new();

        fc.run_cycle(&mut dash, "Phoenix").await;

        assert!(!dash.rain);
        assert_eq!(fc.effects.calls, vec!["rain_stopped"]);
    }

    #[tokio::test]
    async fn successful_current_stage_persists_the_fetched_city() {
        let mut fc = forecaster(StubProvider::ok("Clear"));
        let mut dash = Dashboard::new();

        fc.run_cycle(&mut dash, "London").await;
        assert_eq!(fc.saved_city().as_deref(), Some("London"));

        fc.run_cycle(&mut dash, "Phoenix").await;
        assert_eq!(fc.saved_city().as_deref(), Some("Phoenix"));
    }

    #[tokio::test]
    async fn forecast_failure_skips_the_rest_of_the_cycle() {
        let mut fc = forecaster(StubProvider::failing(Failures {
            forecast: true,
            ..Failures::default()
        }));
        let mut dash = Dashboard::new();

        let report = fc.run_cycle(&mut dash, "London").await;

        assert!(matches!(report.forecast, StageOutcome::Failed(_)));
        assert!(matches!(report.current, StageOutcome::Skipped));
        assert!(matches!(report.alerts, StageOutcome::Skipped));

        assert!(dash.forecast.is_none());
        assert!(dash.current.is_none());
        assert!(fc.effects.calls.is_empty());
        assert!(fc.saved_city().is_none());
    }

    #[tokio::test]
    async fn current_failure_keeps_the_fresh_forecast() {
        let mut fc = forecaster(StubProvider::failing(Failures {
            current: true,
            ..Failures::default()
        }));
        let mut dash = Dashboard::new();

        let report = fc.run_cycle(&mut dash, "London").await;

        assert!(report.forecast.is_completed());
        assert!(matches!(report.current, StageOutcome::Failed(_)));
        assert!(matches!(report.alerts, StageOutcome::Skipped));

        assert!(dash.forecast.is_some());
        assert!(dash.current.is_none());
        assert!(dash.alerts.is_none());
        assert!(fc.saved_city().is_none());
    }

    #[tokio::test]
    async fn alerts_failure_leaves_other_sections_updated() {
        let mut fc = forecaster(StubProvider::failing(Failures {
            alerts: true,
            ..Failures::default()
        }));
        let mut dash = Dashboard::new();

        let report = fc.run_cycle(&mut dash, "London").await;

        assert!(report.forecast.is_completed());
        assert!(report.current.is_completed());
        assert!(matches!(report.alerts, StageOutcome::Failed(_)));

        assert!(dash.forecast.is_some());
        assert!(dash.current.is_some());
        assert!(dash.alerts.is_none());
        assert_eq!(fc.saved_city().as_deref(), Some("London"));
    }

    #[tokio::test]
    async fn cycle_runs_headless_with_no_effects() {
        let mut fc =
            Forecaster::new(StubProvider::ok("Rain"), InMemoryCityStore::default(), NoEffects);
        let mut dash = Dashboard::new();

        fc.run_cycle(&mut dash, "London").await;
        assert!(dash.rain);
    }

    #[tokio::test]
    async fn new_cycle_replaces_previous_snapshots() {
        let mut fc = forecaster(StubProvider::ok("Clear"));
        let mut dash = Dashboard::new();

        fc.run_cycle(&mut dash, "London").await;
        fc.run_cycle(&mut dash, "Phoenix").await;

        assert_eq!(dash.city.as_deref(), Some("Phoenix"));
        let current = dash.current.as_ref().expect("current slot must be set");
        assert_eq!(current.city, "Phoenix");
    }
}

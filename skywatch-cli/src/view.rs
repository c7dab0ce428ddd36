//! Terminal rendering of the dashboard sections.
//!
//! Sections backed by a slot that was never filled are skipped entirely;
//! there is no error rendering. The rain flag switches the headings to the
//! rain palette and prepends a banner.

use std::fmt::Write as _;
use std::io::{self, IsTerminal};

use chrono::{DateTime, Local};
use owo_colors::{OwoColorize, Style};
use skywatch_core::{
    ChartSeries, CurrentWeather, Dashboard, ForecastSeries, WeatherAlert, kelvin_to_celsius,
};
use tabled::{Table, Tabled, settings::Style as TableStyle};

/// Determine whether color output should be enabled.
pub fn should_color(no_color_flag: bool) -> bool {
    !no_color_flag && io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err()
}

pub fn render(dashboard: &Dashboard, color: bool) -> String {
    let theme = Theme { rain: dashboard.rain, color };
    let mut out = String::new();

    if dashboard.rain {
        let city = dashboard.city.as_deref().unwrap_or("the city");
        let _ = writeln!(out, "{}", theme.banner(&format!("Rain is falling over {city}")));
        let _ = writeln!(out);
    }

    if let Some(current) = &dashboard.current {
        current_section(&mut out, current, &theme);
    }

    if let Some(forecast) = &dashboard.forecast {
        summary_section(&mut out, forecast, &theme);
    }

    if let Some(alerts) = &dashboard.alerts {
        alerts_section(&mut out, alerts, &theme);
    }

    if let Some(forecast) = &dashboard.forecast {
        chart_section(&mut out, &ChartSeries::from_forecast(forecast), &theme);
    }

    out
}

struct Theme {
    rain: bool,
    color: bool,
}

impl Theme {
    fn heading(&self, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        let style = if self.rain {
            Style::new().bright_blue().bold()
        } else {
            Style::new().bold()
        };
        text.style(style).to_string()
    }

    fn banner(&self, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        text.style(Style::new().bright_blue().italic()).to_string()
    }
}

fn rounded_celsius(kelvin: f64) -> f64 {
    kelvin_to_celsius(kelvin).round()
}

fn local_clock(epoch_secs: i64) -> String {
    DateTime::from_timestamp(epoch_secs, 0)
        .map(|dt| dt.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string())
}

fn current_section(out: &mut String, current: &CurrentWeather, theme: &Theme) {
    let _ = writeln!(out, "{}", theme.heading(&format!("Current weather in {}", current.city)));
    let _ = writeln!(out, "  Temperature: {}°C", rounded_celsius(current.temperature_k));
    if current.description.is_empty() {
        let _ = writeln!(out, "  Conditions:  unknown");
    } else {
        let _ = writeln!(out, "  Conditions:  {} (icon {})", current.description, current.icon);
    }
    let _ = writeln!(out, "  Sunrise:     {}", local_clock(current.sunrise));
    let _ = writeln!(out, "  Sunset:      {}", local_clock(current.sunset));
    let _ = writeln!(out);
}

fn summary_section(out: &mut String, forecast: &ForecastSeries, theme: &Theme) {
    let _ = writeln!(out, "{}", theme.heading(&format!("5-day forecast for {}", forecast.city)));
    // First five samples as delivered; the 3-hour grid means these can all
    // fall on the same calendar day.
    for sample in forecast.summary() {
        let _ = writeln!(
            out,
            "  {}: {}°C, {}",
            sample.label,
            rounded_celsius(sample.temperature_k),
            sample.description,
        );
    }
    let _ = writeln!(out);
}

fn alerts_section(out: &mut String, alerts: &[WeatherAlert], theme: &Theme) {
    let _ = writeln!(out, "{}", theme.heading("Weather alerts"));
    if alerts.is_empty() {
        let _ = writeln!(out, "  No active alerts");
    } else {
        for alert in alerts {
            let _ = writeln!(out, "  {}: {}", alert.event, alert.description);
        }
    }
    let _ = writeln!(out);
}

#[derive(Tabled)]
struct ChartRow {
    #[tabled(rename = "Time")]
    label: String,
    #[tabled(rename = "Temp (°C)")]
    temperature: String,
    #[tabled(rename = "Humidity (%)")]
    humidity: String,
    #[tabled(rename = "Wind (m/s)")]
    wind: String,
    #[tabled(rename = "Rain (mm)")]
    precipitation: String,
}

fn chart_section(out: &mut String, chart: &ChartSeries, theme: &Theme) {
    if chart.is_empty() {
        return;
    }

    let _ = writeln!(out, "{}", theme.heading("Forecast series"));

    let rows: Vec<ChartRow> = (0..chart.len())
        .map(|i| ChartRow {
            label: chart.labels[i].clone(),
            temperature: format!("{:.2}", chart.temperature_c[i]),
            humidity: format!("{:.0}", chart.humidity_pct[i]),
            wind: format!("{:.1}", chart.wind_speed_mps[i]),
            precipitation: format!("{:.2}", chart.precipitation_mm[i]),
        })
        .collect();

    let _ = writeln!(out, "{}", Table::new(rows).with(TableStyle::rounded()));
}

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use skywatch_core::{Config, Dashboard, FileCityStore, Forecaster, OpenWeatherProvider};
use tracing::debug;

use crate::audio::AmbientPlayer;
use crate::view;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skywatch", version, about = "Weather dashboard for your terminal")]
pub struct Cli {
    /// Running `skywatch` with no subcommand shows the last fetched city.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch current weather, the 5-day forecast and alerts, and render them.
    Show {
        /// City name. Falls back to the last successfully fetched city.
        city: Option<String>,

        /// Play ambient audio while it rains. Audio never starts without
        /// this explicit opt-in, even when rain is detected.
        #[arg(long)]
        ambient: bool,

        /// Disable the rain theme and section colors.
        #[arg(long)]
        no_color: bool,
    },

    /// Store the OpenWeather API key in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let command = self.command.unwrap_or(Command::Show {
            city: None,
            ambient: false,
            no_color: false,
        });

        match command {
            Command::Show { city, ambient, no_color } => show(city, ambient, no_color).await,
            Command::Configure => configure(),
        }
    }
}

async fn show(city: Option<String>, ambient: bool, no_color: bool) -> anyhow::Result<()> {
    let config = Config::load()?;

    let api_key = std::env::var("OPENWEATHER_API_KEY")
        .ok()
        .filter(|key| !key.is_empty())
        .or_else(|| config.api_key.clone());
    let Some(api_key) = api_key else {
        bail!(
            "No API key configured.\n\
             Hint: run `skywatch configure` or set OPENWEATHER_API_KEY."
        );
    };

    // With no argument, this is the "startup" path of the dashboard: the
    // stored city gets exactly one fetch cycle.
    let Some(city) = city.or_else(|| config.city.clone()) else {
        bail!(
            "No city given and none fetched before.\n\
             Hint: run `skywatch show <city>` once; the city is remembered afterwards."
        );
    };

    let provider = OpenWeatherProvider::new(api_key);
    let store = FileCityStore::new()?;
    let player = AmbientPlayer::new(ambient);

    let mut forecaster = Forecaster::new(provider, store, player);
    let mut dashboard = Dashboard::new();

    let report = forecaster.run_cycle(&mut dashboard, &city).await;
    debug!(?report, "fetch cycle finished");

    // Failed stages were already logged; the view simply leaves those
    // sections out instead of rendering an error state.
    print!("{}", view::render(&dashboard, view::should_color(no_color)));

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Text::new("OpenWeather API key:")
        .with_help_message("Created under 'API keys' on your OpenWeather account")
        .prompt()
        .context("Could not read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key cannot be empty");
    }

    config.api_key = Some(api_key.to_string());
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}

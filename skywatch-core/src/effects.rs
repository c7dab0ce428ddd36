//! Side-effect seams for the fetch cycle.
//!
//! The orchestrator mutates nothing outside the [`Dashboard`] itself; theme
//! toggling, ambient playback and city persistence all go through these
//! traits so callers decide what (if anything) actually happens.
//!
//! [`Dashboard`]: crate::state::Dashboard

use anyhow::Result;

/// Presentation and playback reactions to the rain flag.
///
/// `rain_started` means: apply the rain theme and restart ambient playback
/// from the beginning. `rain_stopped` means: remove the theme and stop
/// playback. Both are invoked on every cycle that evaluates the flag, not
/// only on transitions.
pub trait RainEffects {
    fn rain_started(&mut self);
    fn rain_stopped(&mut self);
}

/// Headless implementation; useful when embedding the core without a UI.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEffects;

impl RainEffects for NoEffects {
    fn rain_started(&mut self) {}
    fn rain_stopped(&mut self) {}
}

/// Durable storage for the single "city" key: the last successfully fetched
/// city, read once at startup and written once per successful
/// current-weather stage.
pub trait CityStore {
    fn load(&self) -> Option<String>;
    fn save(&mut self, city: &str) -> Result<()>;
}

/// Volatile store for tests and headless embedding.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCityStore {
    city: Option<String>,
}

impl InMemoryCityStore {
    pub fn new(city: Option<String>) -> Self {
        Self { city }
    }
}

impl CityStore for InMemoryCityStore {
    fn load(&self) -> Option<String> {
        self.city.clone()
    }

    fn save(&mut self, city: &str) -> Result<()> {
        self.city = Some(city.to_string());
        Ok(())
    }
}

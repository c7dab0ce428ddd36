//! Ambient playback collaborator.
//!
//! Drives a single fixed stream through an external player process. Playback
//! is double-gated: the orchestrator only signals while it rains, and the
//! player itself stays silent unless the user opted in with `--ambient`.

use std::process::Stdio;

use skywatch_core::RainEffects;
use tokio::process::{Child, Command};
use tracing::{debug, warn};

/// The fixed ambient track of the dashboard.
pub const STREAM_URL: &str = "https://soundcloud.com/lemmino/cipher";

const DEFAULT_PLAYER: &str = "mpv";

#[derive(Debug)]
pub struct AmbientPlayer {
    enabled: bool,
    child: Option<Child>,
}

impl AmbientPlayer {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, child: None }
    }

    /// Player binary, overridable via `SKYWATCH_PLAYER`.
    fn player_command() -> String {
        std::env::var("SKYWATCH_PLAYER").unwrap_or_else(|_| DEFAULT_PLAYER.to_string())
    }

    fn spawn_player() -> std::io::Result<Child> {
        Command::new(Self::player_command())
            .args(["--no-video", "--really-quiet", "--loop"])
            .arg(STREAM_URL)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
    }

    fn kill_current(&mut self) {
        if let Some(mut child) = self.child.take()
            && let Err(err) = child.start_kill()
        {
            warn!(error = %err, "could not stop ambient player");
        }
    }
}

impl RainEffects for AmbientPlayer {
    fn rain_started(&mut self) {
        if !self.enabled {
            debug!("rain detected, ambient playback not enabled");
            return;
        }

        // "Seek to the beginning" for an external process is kill + respawn.
        self.kill_current();
        match Self::spawn_player() {
            Ok(child) => {
                debug!(url = STREAM_URL, "ambient playback started");
                self.child = Some(child);
            }
            // A missing player degrades like any other collaborator failure.
            Err(err) => warn!(error = %err, "could not start ambient player"),
        }
    }

    fn rain_stopped(&mut self) {
        self.kill_current();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_player_never_spawns() {
        let mut player = AmbientPlayer::new(false);
        player.rain_started();
        assert!(player.child.is_none());
    }

    #[test]
    fn stopping_without_a_child_is_a_no_op() {
        let mut player = AmbientPlayer::new(true);
        player.rain_stopped();
        assert!(player.child.is_none());
    }
}

//! Audio and presentation preferences
//!
//! Supplied by the page as JSON and never written back.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::sim::Phase;

/// Player-facing preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Cue tone volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Looping track per phase, indexed by phase number - 1
    pub music_tracks: [String; 4],
    /// Begin the session with music muted
    pub start_muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sfx_volume: 0.1,
            music_volume: 0.15,
            music_tracks: Phase::ALL.map(|p| format!("music/phase{}.mp3", p.number())),
            start_muted: false,
        }
    }
}

impl Settings {
    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        for (field, volume) in [("sfx_volume", self.sfx_volume), ("music_volume", self.music_volume)] {
            if !(0.0..=1.0).contains(&volume) {
                return Err(ConfigError::invalid(field, format!("{volume} is outside 0.0..=1.0")));
            }
        }
        if self.music_tracks.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::invalid("music_tracks", "track path is empty"));
        }
        Ok(())
    }

    /// Track URL for a phase
    pub fn track_for(&self, phase: Phase) -> &str {
        &self.music_tracks[phase.number() as usize - 1]
    }
}

//! DODGE.exe - a square dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (phase scheduler, spawner, collisions, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction (input, storage)
//! - `tuning`: Data-driven game balance
//! - `settings`: Audio preferences

pub mod audio;
pub mod error;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use highscores::HighScore;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Arena dimensions in pixels
    pub const ARENA_WIDTH: f32 = 600.0;
    pub const ARENA_HEIGHT: f32 = 400.0;

    /// Player square edge length and per-frame speed
    pub const PLAYER_SIZE: f32 = 8.0;
    pub const PLAYER_SPEED: f32 = 4.0;

    /// Enemy square edge length
    pub const ENEMY_SIZE: f32 = 8.0;

    /// Phase change overlay duration (ms)
    pub const TRANSITION_DURATION_MS: f64 = 1000.0;
    /// Death animation duration (ms) before returning to the menu
    pub const DEATH_EFFECT_DURATION_MS: f64 = 800.0;

    /// Phase 1 spawner defaults
    pub const STRAIGHT_START_INTERVAL_MS: f64 = 1000.0;
    pub const AIMED_START_INTERVAL_MS: f64 = 1200.0;
    pub const STRAIGHT_START_SPEED: f32 = 2.0;
    pub const AIMED_START_SPEED: f32 = 2.0;

    /// Nominal frame duration used by the headless runner (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}

/// Round to one decimal place, the precision scores are shown and stored at
#[inline]
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_tenths() {
        assert_eq!(round_tenths(45.24), 45.2);
        assert_eq!(round_tenths(45.26), 45.3);
        assert_eq!(round_tenths(0.0), 0.0);
    }
}

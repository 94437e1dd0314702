//! Read-only view of a session for rendering and the HUD

use glam::Vec2;
use serde::Serialize;

use super::state::{GameMode, GameState, Phase};

/// A drawable square
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Square {
    pub pos: Vec2,
    pub size: f32,
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub mode: GameMode,
    pub arena: Vec2,
    pub player: Square,
    pub enemies: Vec<Square>,
    pub phase: Phase,
    pub survived_secs: f64,
    /// Phase being announced while the overlay is up
    pub transition: Option<Phase>,
    pub muted: bool,
    pub invulnerable: bool,
    /// Milliseconds into the death effect, while Dead
    pub death_elapsed_ms: Option<f64>,
    /// 0..1 through the death effect, while Dead
    pub death_progress: Option<f32>,
    pub latest_score: Option<f64>,
    pub high_score: f64,
}

impl Snapshot {
    pub fn capture(state: &GameState, now_ms: f64) -> Self {
        let death_elapsed_ms = (state.mode == GameMode::Dead)
            .then(|| (now_ms - state.death_start_ms).max(0.0));
        let death_progress = death_elapsed_ms
            .map(|elapsed| (elapsed / state.tuning.death_effect_ms).clamp(0.0, 1.0) as f32);

        Self {
            mode: state.mode,
            arena: state.bounds(),
            player: Square {
                pos: state.player.pos,
                size: state.player.size,
            },
            enemies: state
                .enemies
                .iter()
                .map(|e| Square {
                    pos: e.pos,
                    size: e.size,
                })
                .collect(),
            phase: state.phase,
            survived_secs: state.survived_secs,
            transition: state.in_transition().then_some(state.phase),
            muted: state.muted,
            invulnerable: state.invulnerable,
            death_elapsed_ms,
            death_progress,
            latest_score: state.latest_score,
            high_score: state.best.best,
        }
    }

    /// HUD clock text
    pub fn time_label(&self) -> String {
        format!("TIME: {:.1}", self.survived_secs)
    }

    pub fn phase_label(&self) -> String {
        format!("PHASE {}", self.phase.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::HighScore;
    use crate::tuning::Tuning;

    #[test]
    fn test_menu_snapshot() {
        let state = GameState::new(1, Tuning::default(), HighScore::new(12.5));
        let snap = Snapshot::capture(&state, 0.0);
        assert_eq!(snap.mode, GameMode::Menu);
        assert_eq!(snap.high_score, 12.5);
        assert_eq!(snap.latest_score, None);
        assert_eq!(snap.transition, None);
        assert_eq!(snap.death_progress, None);
        assert!(snap.enemies.is_empty());
    }

    #[test]
    fn test_death_progress() {
        let mut state = GameState::new(1, Tuning::default(), HighScore::default());
        state.mode = GameMode::Dead;
        state.death_start_ms = 1_000.0;

        let snap = Snapshot::capture(&state, 1_400.0);
        assert_eq!(snap.death_elapsed_ms, Some(400.0));
        assert_eq!(snap.death_progress, Some(0.5));

        let snap = Snapshot::capture(&state, 5_000.0);
        assert_eq!(snap.death_progress, Some(1.0));
    }

    #[test]
    fn test_labels() {
        let mut state = GameState::new(1, Tuning::default(), HighScore::default());
        state.survived_secs = 45.26;
        state.phase = Phase::Mixed;
        state.transition_start_ms = Some(0.0);
        let snap = Snapshot::capture(&state, 0.0);
        assert_eq!(snap.time_label(), "TIME: 45.3");
        assert_eq!(snap.phase_label(), "PHASE 3");
        assert_eq!(snap.transition, Some(Phase::Mixed));
    }
}

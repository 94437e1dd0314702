//! Phase scheduler
//!
//! Maps survived time to a difficulty phase and evaluates the active phase's
//! spawn curves from the [`PhaseTable`](crate::tuning::PhaseTable).

use super::state::{GameEvent, GameState, Phase};
use crate::tuning::PhaseTable;

/// Phase the session should move to, if any.
///
/// Only the immediate successor is considered, so at most one transition
/// fires per call even if the clock jumped past several thresholds.
pub fn next_phase(table: &PhaseTable, phase: Phase, survived_secs: f64) -> Option<Phase> {
    let next = phase.next()?;
    (survived_secs >= table.get(next).enters_at_secs).then_some(next)
}

/// Enter `phase`: wipe the board, restart the phase clock and raise the overlay
pub fn start_phase(state: &mut GameState, phase: Phase, now_ms: f64) {
    log::info!(
        "Phase {} ({}) at {:.1}s",
        phase.number(),
        phase.name(),
        state.survived_secs
    );

    state.phase = phase;
    state.enemies.clear();
    state.phase_start_ms = now_ms;
    state.transition_start_ms = Some(now_ms);

    state.events.push(GameEvent::PhaseChanged { phase });
    if !state.muted {
        state.events.push(GameEvent::MusicTrack { phase });
    }
}

/// Recompute spawner speed/interval for the current phase.
///
/// Inactive families keep their last values; so does an interval whose
/// curve is `None`.
pub fn apply_curves(state: &mut GameState, phase_elapsed_secs: f64) {
    let spec = *state.tuning.phases.get(state.phase);
    let t = phase_elapsed_secs.max(0.0);

    for (family, timer) in [
        (spec.straight, &mut state.straight),
        (spec.aimed, &mut state.aimed),
    ] {
        let Some(curve) = family else { continue };
        timer.speed = curve.speed.at(t) as f32;
        if let Some(interval) = curve.interval {
            timer.interval_ms = interval.at(t);
        }
    }
}

/// Seconds since the current phase began
pub fn phase_elapsed_secs(state: &GameState, now_ms: f64) -> f64 {
    (now_ms - state.phase_start_ms) / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::HighScore;
    use crate::sim::state::{Enemy, EnemyKind, GameMode};
    use crate::tuning::Tuning;

    fn playing_state() -> GameState {
        let mut state = GameState::new(7, Tuning::default(), HighScore::default());
        state.mode = GameMode::Playing;
        state
    }

    #[test]
    fn test_next_phase_thresholds() {
        let table = PhaseTable::default();
        assert_eq!(next_phase(&table, Phase::Basic, 29.99), None);
        assert_eq!(next_phase(&table, Phase::Basic, 30.0), Some(Phase::Aim));
        assert_eq!(next_phase(&table, Phase::Aim, 59.9), None);
        assert_eq!(next_phase(&table, Phase::Aim, 60.0), Some(Phase::Mixed));
        assert_eq!(next_phase(&table, Phase::Mixed, 90.0), Some(Phase::Hardcore));
        assert_eq!(next_phase(&table, Phase::Hardcore, 10_000.0), None);
    }

    #[test]
    fn test_next_phase_one_step_at_a_time() {
        let table = PhaseTable::default();
        // Clock jumped straight to 95s: still only BASIC -> AIM this call
        assert_eq!(next_phase(&table, Phase::Basic, 95.0), Some(Phase::Aim));
    }

    #[test]
    fn test_start_phase_clears_and_signals() {
        let mut state = playing_state();
        state.enemies.push(Enemy {
            kind: EnemyKind::Straight,
            pos: glam::Vec2::ZERO,
            vel: glam::Vec2::X,
            size: 8.0,
        });
        start_phase(&mut state, Phase::Aim, 30_000.0);

        assert_eq!(state.phase, Phase::Aim);
        assert!(state.enemies.is_empty());
        assert_eq!(state.phase_start_ms, 30_000.0);
        assert_eq!(state.transition_start_ms, Some(30_000.0));
        assert_eq!(
            state.events,
            vec![
                GameEvent::PhaseChanged { phase: Phase::Aim },
                GameEvent::MusicTrack { phase: Phase::Aim },
            ]
        );
    }

    #[test]
    fn test_start_phase_muted_skips_music() {
        let mut state = playing_state();
        state.muted = true;
        start_phase(&mut state, Phase::Mixed, 1.0);
        assert_eq!(state.events, vec![GameEvent::PhaseChanged { phase: Phase::Mixed }]);
    }

    #[test]
    fn test_apply_curves_basic() {
        let mut state = playing_state();
        apply_curves(&mut state, 10.0);
        assert_eq!(state.straight.speed, 2.5);
        assert_eq!(state.straight.interval_ms, 700.0);
        // Aimed family untouched in BASIC
        assert_eq!(state.aimed.interval_ms, 1200.0);
        assert_eq!(state.aimed.speed, 2.0);

        apply_curves(&mut state, 500.0);
        assert_eq!(state.straight.interval_ms, 300.0);
    }

    #[test]
    fn test_mixed_inherits_aim_interval() {
        let mut state = playing_state();
        state.phase = Phase::Aim;
        apply_curves(&mut state, 10.0);
        assert_eq!(state.aimed.interval_ms, 900.0);

        state.phase = Phase::Mixed;
        apply_curves(&mut state, 5.0);
        assert_eq!(state.aimed.interval_ms, 900.0);
        assert!((state.aimed.speed - 2.4).abs() < 1e-6);
        assert_eq!(state.straight.speed, 2.0);
        assert_eq!(state.straight.interval_ms, 725.0);
    }

    #[test]
    fn test_mixed_after_full_aim_phase() {
        let mut state = playing_state();
        state.phase = Phase::Aim;
        apply_curves(&mut state, 30.0);
        assert_eq!(state.aimed.interval_ms, 400.0);

        state.phase = Phase::Mixed;
        apply_curves(&mut state, 20.0);
        assert_eq!(state.aimed.interval_ms, 400.0);
    }

    #[test]
    fn test_hardcore_floors() {
        let mut state = playing_state();
        state.phase = Phase::Hardcore;
        apply_curves(&mut state, 3_600.0);
        assert_eq!(state.straight.interval_ms, 150.0);
        assert_eq!(state.aimed.interval_ms, 300.0);
        assert!(state.straight.speed > 100.0);
    }
}

//! Per-frame simulation tick
//!
//! One call per rendered frame, driven by the host's frame clock. Within a
//! Playing tick the order is fixed: phase check, curve update, spawning,
//! player movement, enemy advance + collision, overlay decay.

use glam::Vec2;

use super::collision::first_hit;
use super::phase::{apply_curves, next_phase, phase_elapsed_secs, start_phase};
use super::spawn::run_spawners;
use super::state::{GameEvent, GameMode, GameState, Phase, SpawnTimer};
use crate::round_tenths;

/// Input for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Held directions
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Start a run (only honoured at the menu)
    pub start: bool,
    /// Toggle music mute
    pub toggle_mute: bool,
    /// Toggle invulnerability
    pub toggle_invulnerable: bool,
}

impl TickInput {
    /// Movement direction, -1/0/1 per axis (screen coordinates, y down)
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// What a tick did to the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing changed at the state machine level
    Continue,
    /// A run began this tick
    Started,
    /// The player died this tick
    Died,
    /// The death effect finished and the menu is back
    BackToMenu,
}

/// Advance the session to `now_ms`
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) -> TickOutcome {
    handle_toggles(state, input);

    match state.mode {
        GameMode::Menu => {
            if input.start {
                start_game(state, now_ms);
                TickOutcome::Started
            } else {
                TickOutcome::Continue
            }
        }
        GameMode::Dead => {
            if now_ms - state.death_start_ms >= state.tuning.death_effect_ms {
                state.mode = GameMode::Menu;
                TickOutcome::BackToMenu
            } else {
                TickOutcome::Continue
            }
        }
        GameMode::Playing => play(state, input, now_ms),
    }
}

fn handle_toggles(state: &mut GameState, input: &TickInput) {
    if input.toggle_mute {
        state.muted = !state.muted;
        if state.muted {
            state.events.push(GameEvent::MusicStop);
        } else if state.mode == GameMode::Playing {
            state.events.push(GameEvent::MusicTrack { phase: state.phase });
        }
        state.events.push(GameEvent::MuteToggled { muted: state.muted });
    }

    if input.toggle_invulnerable {
        state.invulnerable = !state.invulnerable;
        log::info!("God mode: {}", if state.invulnerable { "ON" } else { "OFF" });
        state.events.push(GameEvent::InvulnerabilityToggled {
            enabled: state.invulnerable,
        });
    }
}

fn play(state: &mut GameState, input: &TickInput, now_ms: f64) -> TickOutcome {
    state.survived_secs = (now_ms - state.session_start_ms) / 1000.0;

    if let Some(phase) = next_phase(&state.tuning.phases, state.phase, state.survived_secs) {
        start_phase(state, phase, now_ms);
    }

    apply_curves(state, phase_elapsed_secs(state, now_ms));

    if !state.in_transition() {
        run_spawners(state, now_ms);
        let bounds = state.bounds();
        state.player.step(input.direction(), bounds);
    }

    for enemy in &mut state.enemies {
        enemy.advance();
    }
    if !state.invulnerable && first_hit(&state.player, &state.enemies).is_some() {
        game_over(state, now_ms);
        return TickOutcome::Died;
    }

    if let Some(started) = state.transition_start_ms {
        if now_ms - started > state.tuning.transition_ms {
            state.transition_start_ms = None;
        }
    }

    TickOutcome::Continue
}

/// Menu -> Playing: reset everything a run touches
pub fn start_game(state: &mut GameState, now_ms: f64) {
    let t = &state.tuning;
    state.straight = SpawnTimer::new(t.straight_start_interval_ms, t.straight_start_speed);
    state.aimed = SpawnTimer::new(t.aimed_start_interval_ms, t.aimed_start_speed);

    state.mode = GameMode::Playing;
    state.phase = Phase::Basic;
    state.enemies.clear();
    let bounds = state.bounds();
    state.player.reset(bounds);
    state.session_start_ms = now_ms;
    state.phase_start_ms = now_ms;
    state.survived_secs = 0.0;
    state.transition_start_ms = None;

    log::info!("Run started at {:.0}ms", now_ms);
    if !state.muted {
        state.events.push(GameEvent::MusicTrack { phase: Phase::Basic });
    }
    state.events.push(GameEvent::Started);
}

/// Playing -> Dead: score the run and update the best time
pub fn game_over(state: &mut GameState, now_ms: f64) {
    state.mode = GameMode::Dead;
    state.death_start_ms = now_ms;

    let score = round_tenths(state.survived_secs);
    state.latest_score = Some(score);

    let new_best = state.best.record(state.survived_secs);

    log::info!(
        "Died in phase {} after {:.1}s (best {:.1}s{})",
        state.phase.number(),
        score,
        state.best.best,
        if new_best { ", new record" } else { "" }
    );

    state.events.push(GameEvent::MusicStop);
    state.events.push(GameEvent::Died { score, new_best });
}

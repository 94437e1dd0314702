//! Enemy spawner
//!
//! Two independent timers, one per [`EnemyKind`]. Enemies enter from a
//! uniformly chosen arena edge, just outside it.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, EnemyKind, GameState};

/// Arena edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    /// Unit vector pointing from this edge into the arena
    pub fn inward(self) -> Vec2 {
        match self {
            Side::Top => Vec2::Y,
            Side::Bottom => Vec2::NEG_Y,
            Side::Left => Vec2::X,
            Side::Right => Vec2::NEG_X,
        }
    }

    /// Spawn point `t` (0..1) of the way along this edge, one enemy size
    /// outside the arena
    pub fn point(self, t: f32, bounds: Vec2, size: f32) -> Vec2 {
        match self {
            Side::Top => Vec2::new(t * bounds.x, -size),
            Side::Bottom => Vec2::new(t * bounds.x, bounds.y + size),
            Side::Left => Vec2::new(-size, t * bounds.y),
            Side::Right => Vec2::new(bounds.x + size, t * bounds.y),
        }
    }
}

/// Velocity for a straight enemy entering from `side`
pub fn straight_velocity(side: Side, speed: f32) -> Vec2 {
    side.inward() * speed
}

/// Velocity from `from` toward `target`, fixed at spawn time.
///
/// When the two points coincide there is no direction to aim along; the
/// enemy then travels along `fallback` instead.
pub fn aimed_velocity(from: Vec2, target: Vec2, speed: f32, fallback: Vec2) -> Vec2 {
    (target - from).try_normalize().unwrap_or(fallback) * speed
}

/// Build an enemy of `kind` on `side` at `t` along it
pub fn make_enemy(state: &GameState, kind: EnemyKind, side: Side, t: f32) -> Enemy {
    let size = state.tuning.enemy_size;
    let pos = side.point(t, state.bounds(), size);
    let vel = match kind {
        EnemyKind::Straight => straight_velocity(side, state.straight.speed),
        EnemyKind::Aimed => {
            aimed_velocity(pos, state.player.pos, state.aimed.speed, side.inward())
        }
    };
    Enemy {
        kind,
        pos,
        vel,
        size,
    }
}

/// Spawn one enemy of `kind` at a random perimeter point
pub fn spawn(state: &mut GameState, kind: EnemyKind) {
    let side = Side::ALL[state.rng.random_range(0..Side::ALL.len())];
    let t: f32 = state.rng.random();
    let enemy = make_enemy(state, kind, side, t);
    log::debug!("Spawned {:?} enemy at {:?} vel {:?}", kind, enemy.pos, enemy.vel);
    state.enemies.push(enemy);
}

/// Run both spawn timers for this frame.
///
/// Only families active in the current phase are checked; the caller skips
/// this entirely while the phase overlay is up.
pub fn run_spawners(state: &mut GameState, now_ms: f64) {
    let spec = *state.tuning.phases.get(state.phase);

    if spec.straight.is_some() && state.straight.is_due(now_ms) {
        spawn(state, EnemyKind::Straight);
        state.straight.last_spawn_ms = Some(now_ms);
    }

    if spec.aimed.is_some() && state.aimed.is_due(now_ms) {
        spawn(state, EnemyKind::Aimed);
        state.aimed.last_spawn_ms = Some(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::HighScore;
    use crate::sim::state::Phase;
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(42, Tuning::default(), HighScore::default())
    }

    #[test]
    fn test_straight_from_top_moves_down() {
        let mut state = state();
        state.straight.speed = 2.0;
        let mut enemy = make_enemy(&state, EnemyKind::Straight, Side::Top, 0.5);
        assert_eq!(enemy.pos, Vec2::new(300.0, -8.0));
        assert_eq!(enemy.vel, Vec2::new(0.0, 2.0));

        for _ in 0..10 {
            enemy.advance();
        }
        assert_eq!(enemy.pos.y, -8.0 + 10.0 * 2.0);
        assert_eq!(enemy.pos.x, 300.0);
    }

    #[test]
    fn test_straight_directions() {
        assert_eq!(straight_velocity(Side::Bottom, 3.0), Vec2::new(0.0, -3.0));
        assert_eq!(straight_velocity(Side::Left, 3.0), Vec2::new(3.0, 0.0));
        assert_eq!(straight_velocity(Side::Right, 3.0), Vec2::new(-3.0, 0.0));
    }

    #[test]
    fn test_spawn_points_outside_arena() {
        let bounds = Vec2::new(600.0, 400.0);
        assert_eq!(Side::Bottom.point(0.0, bounds, 8.0), Vec2::new(0.0, 408.0));
        assert_eq!(Side::Left.point(1.0, bounds, 8.0), Vec2::new(-8.0, 400.0));
        assert_eq!(Side::Right.point(0.25, bounds, 8.0), Vec2::new(608.0, 100.0));
    }

    #[test]
    fn test_aimed_straight_up() {
        let vel = aimed_velocity(
            Vec2::new(100.0, 200.0),
            Vec2::new(100.0, 100.0),
            3.0,
            Vec2::Y,
        );
        assert_eq!(vel, Vec2::new(0.0, -3.0));
    }

    #[test]
    fn test_aimed_uses_spawn_time_player_position() {
        let mut state = state();
        state.player.pos = Vec2::new(300.0, -8.0 + 100.0);
        state.aimed.speed = 2.0;
        let enemy = make_enemy(&state, EnemyKind::Aimed, Side::Top, 0.5);
        assert_eq!(enemy.vel, Vec2::new(0.0, 2.0));
    }

    #[test]
    fn test_aimed_zero_distance_falls_back() {
        let p = Vec2::new(5.0, 5.0);
        let vel = aimed_velocity(p, p, 2.0, Vec2::NEG_X);
        assert_eq!(vel, Vec2::new(-2.0, 0.0));
        assert!(vel.is_finite());
    }

    #[test]
    fn test_run_spawners_respects_phase_and_interval() {
        let mut state = state();
        assert_eq!(state.phase, Phase::Basic);

        run_spawners(&mut state, 1_000.0);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].kind, EnemyKind::Straight);

        // Not yet due (needs strictly more than 1000ms)
        run_spawners(&mut state, 2_000.0);
        assert_eq!(state.enemies.len(), 1);

        run_spawners(&mut state, 2_001.0);
        assert_eq!(state.enemies.len(), 2);
        assert!(state.enemies.iter().all(|e| e.kind == EnemyKind::Straight));
    }

    #[test]
    fn test_run_spawners_mixed_spawns_both() {
        let mut state = state();
        state.phase = Phase::Mixed;
        run_spawners(&mut state, 0.0);
        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.enemies[0].kind, EnemyKind::Straight);
        assert_eq!(state.enemies[1].kind, EnemyKind::Aimed);
    }

    #[test]
    fn test_random_spawns_on_perimeter() {
        let mut state = state();
        for _ in 0..200 {
            spawn(&mut state, EnemyKind::Straight);
        }
        let (w, h, s) = (600.0, 400.0, 8.0);
        for e in &state.enemies {
            let on_edge = (e.pos.y == -s || e.pos.y == h + s) && (0.0..=w).contains(&e.pos.x)
                || (e.pos.x == -s || e.pos.x == w + s) && (0.0..=h).contains(&e.pos.y);
            assert!(on_edge, "off-perimeter spawn at {:?}", e.pos);
            assert_eq!(e.vel.length(), 2.0);
        }
    }
}

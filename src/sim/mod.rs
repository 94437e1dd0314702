//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in from the host as a timestamp per tick
//! - Seeded RNG only
//! - Stable iteration order (enemy insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod phase;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, first_hit};
pub use phase::{apply_curves, next_phase, start_phase};
pub use snapshot::{Snapshot, Square};
pub use spawn::{Side, aimed_velocity, run_spawners, straight_velocity};
pub use state::{Enemy, EnemyKind, GameEvent, GameMode, GameState, Phase, Player, SpawnTimer};
pub use tick::{TickInput, TickOutcome, game_over, start_game, tick};

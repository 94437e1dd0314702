//! Game state and core simulation types
//!
//! A single [`GameState`] owns everything a session mutates. The host keeps
//! one and feeds it timestamps; nothing here is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::highscores::HighScore;
use crate::tuning::Tuning;

/// Top-level screen / state machine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Title screen, waiting for start input
    Menu,
    /// Active run
    Playing,
    /// Death animation, returns to Menu on its own
    Dead,
}

/// Difficulty tier, only ever increases within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    Basic = 1,
    Aim = 2,
    Mixed = 3,
    Hardcore = 4,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Basic, Phase::Aim, Phase::Mixed, Phase::Hardcore];

    /// 1-based phase number shown on the HUD
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Following phase, `None` for the endless tier
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::Basic => Some(Phase::Aim),
            Phase::Aim => Some(Phase::Mixed),
            Phase::Mixed => Some(Phase::Hardcore),
            Phase::Hardcore => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::Basic => "BASIC",
            Phase::Aim => "AIM",
            Phase::Mixed => "MIXED",
            Phase::Hardcore => "HARDCORE",
        }
    }

    /// Caption on the transition overlay
    pub fn title(self) -> &'static str {
        match self {
            Phase::Hardcore => "ENDLESS PHASE",
            other => other.name(),
        }
    }
}

/// The player's square
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    /// Pixels per frame, per held axis
    pub speed: f32,
}

impl Player {
    pub fn new(size: f32, speed: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            size,
            speed,
        }
    }

    /// Center the player in an arena of `bounds`
    pub fn reset(&mut self, bounds: Vec2) {
        self.pos = bounds / 2.0;
        self.clamp_to(bounds);
    }

    /// Apply one frame of movement. `dir` holds -1/0/1 per axis.
    pub fn step(&mut self, dir: Vec2, bounds: Vec2) {
        self.pos += dir * self.speed;
        self.clamp_to(bounds);
    }

    fn clamp_to(&mut self, bounds: Vec2) {
        let max = (bounds - Vec2::splat(self.size)).max(Vec2::ZERO);
        self.pos = self.pos.clamp(Vec2::ZERO, max);
    }
}

/// How an enemy's velocity was chosen at spawn time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Axis-aligned, straight into the arena
    Straight,
    /// Toward where the player stood when it spawned
    Aimed,
}

/// A linear mover. Never clamped, never removed individually.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
}

impl Enemy {
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

/// Per-family spawn timer with the parameters currently in force
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    pub interval_ms: f64,
    pub speed: f32,
    /// `None` until the first spawn of the session
    pub last_spawn_ms: Option<f64>,
}

impl SpawnTimer {
    pub fn new(interval_ms: f64, speed: f32) -> Self {
        Self {
            interval_ms,
            speed,
            last_spawn_ms: None,
        }
    }

    /// True if strictly more than one interval has passed since the last spawn
    pub fn is_due(&self, now_ms: f64) -> bool {
        match self.last_spawn_ms {
            Some(last) => now_ms - last > self.interval_ms,
            None => true,
        }
    }
}

/// Fire-and-forget signals for the audio layer, drained by the host each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A run began
    Started,
    /// Music mute was toggled
    MuteToggled { muted: bool },
    /// Invulnerability was toggled
    InvulnerabilityToggled { enabled: bool },
    /// Entered a new phase (plays the arpeggio)
    PhaseChanged { phase: Phase },
    /// Select and start the looping track for a phase
    MusicTrack { phase: Phase },
    /// Stop background music
    MusicStop,
    /// The player was hit
    Died { score: f64, new_best: bool },
}

/// Complete session context
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub mode: GameMode,
    pub phase: Phase,
    pub player: Player,
    /// Insertion ordered; order only affects draw order
    pub enemies: Vec<Enemy>,
    pub straight: SpawnTimer,
    pub aimed: SpawnTimer,
    /// Timestamps in host milliseconds
    pub session_start_ms: f64,
    pub phase_start_ms: f64,
    /// Seconds survived in the current run
    pub survived_secs: f64,
    /// Start of the active phase overlay, `None` when no overlay
    pub transition_start_ms: Option<f64>,
    pub death_start_ms: f64,
    /// Score of the last finished run, one decimal
    pub latest_score: Option<f64>,
    /// Best survived time, one decimal. Never decreases.
    pub best: HighScore,
    pub muted: bool,
    pub invulnerable: bool,
    /// Pending audio signals
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a session sitting at the menu
    pub fn new(seed: u64, tuning: Tuning, best: HighScore) -> Self {
        let mut player = Player::new(tuning.player_size, tuning.player_speed);
        player.reset(Vec2::new(tuning.arena_width, tuning.arena_height));

        Self {
            straight: SpawnTimer::new(tuning.straight_start_interval_ms, tuning.straight_start_speed),
            aimed: SpawnTimer::new(tuning.aimed_start_interval_ms, tuning.aimed_start_speed),
            tuning,
            mode: GameMode::Menu,
            phase: Phase::Basic,
            player,
            enemies: Vec::new(),
            session_start_ms: 0.0,
            phase_start_ms: 0.0,
            survived_secs: 0.0,
            transition_start_ms: None,
            death_start_ms: 0.0,
            latest_score: None,
            best,
            muted: false,
            invulnerable: false,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Arena size as a vector
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.tuning.arena_width, self.tuning.arena_height)
    }

    pub fn in_transition(&self) -> bool {
        self.transition_start_ms.is_some()
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

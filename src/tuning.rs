//! Data-driven game balance
//!
//! Every number that shapes difficulty lives here: arena and entity sizes,
//! overlay durations and the per-phase spawn curves. Loaded from JSON when
//! the host page provides one, otherwise the defaults below apply.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, ConfigResult};
use crate::sim::Phase;

/// A linear ramp over phase-elapsed seconds, optionally clamped from below.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub base: f64,
    /// Change per second (negative for shrinking spawn intervals)
    pub slope: f64,
    #[serde(default)]
    pub floor: Option<f64>,
}

impl Curve {
    pub const fn new(base: f64, slope: f64) -> Self {
        Self {
            base,
            slope,
            floor: None,
        }
    }

    pub const fn floored(base: f64, slope: f64, floor: f64) -> Self {
        Self {
            base,
            slope,
            floor: Some(floor),
        }
    }

    /// Constant value
    pub const fn flat(value: f64) -> Self {
        Self::new(value, 0.0)
    }

    /// Evaluate at `t` seconds into the phase
    pub fn at(&self, t: f64) -> f64 {
        let v = self.base + self.slope * t;
        match self.floor {
            Some(floor) => v.max(floor),
            None => v,
        }
    }
}

/// Speed and spawn-interval curves for one enemy family within a phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FamilyCurve {
    /// Enemy speed in px/frame
    pub speed: Curve,
    /// Spawn interval in ms. `None` keeps whatever interval the previous
    /// phase last computed.
    #[serde(default)]
    pub interval: Option<Curve>,
}

/// Everything that differs between phases
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseSpec {
    /// Survived time (s) at which the session enters this phase
    pub enters_at_secs: f64,
    /// Straight spawner curves, `None` when the family is inactive
    #[serde(default)]
    pub straight: Option<FamilyCurve>,
    /// Aimed spawner curves, `None` when the family is inactive
    #[serde(default)]
    pub aimed: Option<FamilyCurve>,
}

/// One [`PhaseSpec`] per [`Phase`], indexed in phase order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseTable {
    pub basic: PhaseSpec,
    pub aim: PhaseSpec,
    pub mixed: PhaseSpec,
    pub hardcore: PhaseSpec,
}

impl PhaseTable {
    pub fn get(&self, phase: Phase) -> &PhaseSpec {
        match phase {
            Phase::Basic => &self.basic,
            Phase::Aim => &self.aim,
            Phase::Mixed => &self.mixed,
            Phase::Hardcore => &self.hardcore,
        }
    }
}

impl Default for PhaseTable {
    fn default() -> Self {
        Self {
            basic: PhaseSpec {
                enters_at_secs: 0.0,
                straight: Some(FamilyCurve {
                    speed: Curve::new(2.0, 0.05),
                    interval: Some(Curve::floored(1000.0, -30.0, 300.0)),
                }),
                aimed: None,
            },
            aim: PhaseSpec {
                enters_at_secs: 30.0,
                straight: None,
                aimed: Some(FamilyCurve {
                    speed: Curve::new(2.0, 0.07),
                    interval: Some(Curve::floored(1200.0, -30.0, 400.0)),
                }),
            },
            mixed: PhaseSpec {
                enters_at_secs: 60.0,
                straight: Some(FamilyCurve {
                    speed: Curve::flat(2.0),
                    interval: Some(Curve::floored(900.0, -35.0, 250.0)),
                }),
                // Aimed interval carries over from AIM
                aimed: Some(FamilyCurve {
                    speed: Curve::new(2.0, 0.08),
                    interval: None,
                }),
            },
            hardcore: PhaseSpec {
                enters_at_secs: 90.0,
                straight: Some(FamilyCurve {
                    speed: Curve::new(2.0, 0.05),
                    interval: Some(Curve::floored(800.0, -25.0, 150.0)),
                }),
                aimed: Some(FamilyCurve {
                    speed: Curve::new(2.0, 0.07),
                    interval: Some(Curve::floored(1200.0, -20.0, 300.0)),
                }),
            },
        }
    }
}

/// Gameplay balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub arena_width: f32,
    pub arena_height: f32,
    pub player_size: f32,
    /// Player movement per frame, per held axis
    pub player_speed: f32,
    pub enemy_size: f32,
    pub transition_ms: f64,
    pub death_effect_ms: f64,
    /// Spawner values restored at session start
    pub straight_start_interval_ms: f64,
    pub aimed_start_interval_ms: f64,
    pub straight_start_speed: f32,
    pub aimed_start_speed: f32,
    pub phases: PhaseTable,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            enemy_size: ENEMY_SIZE,
            transition_ms: TRANSITION_DURATION_MS,
            death_effect_ms: DEATH_EFFECT_DURATION_MS,
            straight_start_interval_ms: STRAIGHT_START_INTERVAL_MS,
            aimed_start_interval_ms: AIMED_START_INTERVAL_MS,
            straight_start_speed: STRAIGHT_START_SPEED,
            aimed_start_speed: AIMED_START_SPEED,
            phases: PhaseTable::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        let positive: [(&'static str, f64); 9] = [
            ("arena_width", self.arena_width as f64),
            ("arena_height", self.arena_height as f64),
            ("player_size", self.player_size as f64),
            ("player_speed", self.player_speed as f64),
            ("enemy_size", self.enemy_size as f64),
            ("transition_ms", self.transition_ms),
            ("death_effect_ms", self.death_effect_ms),
            ("straight_start_interval_ms", self.straight_start_interval_ms),
            ("aimed_start_interval_ms", self.aimed_start_interval_ms),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::invalid(field, format!("must be > 0, got {value}")));
            }
        }

        if self.player_size > self.arena_width.min(self.arena_height) {
            return Err(ConfigError::invalid(
                "player_size",
                "player does not fit inside the arena",
            ));
        }

        if self.phases.basic.enters_at_secs != 0.0 {
            return Err(ConfigError::invalid(
                "phases.basic.enters_at_secs",
                "the first phase starts at 0",
            ));
        }

        let mut previous = 0.0;
        for phase in [Phase::Aim, Phase::Mixed, Phase::Hardcore] {
            let at = self.phases.get(phase).enters_at_secs;
            if !(at.is_finite() && at > previous) {
                return Err(ConfigError::invalid(
                    "phases.enters_at_secs",
                    format!("{} threshold {at} must exceed {previous}", phase.name()),
                ));
            }
            previous = at;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_table_matches_phase_formulas() {
        let table = PhaseTable::default();
        let basic = table.basic.straight.unwrap();
        assert_eq!(basic.speed.at(10.0), 2.5);
        assert_eq!(basic.interval.unwrap().at(10.0), 700.0);
        assert!(table.basic.aimed.is_none());
        assert!(table.aim.straight.is_none());
        assert!(table.mixed.aimed.unwrap().interval.is_none());
        assert_eq!(table.mixed.straight.unwrap().speed.at(25.0), 2.0);
    }

    #[test]
    fn test_curve_floor() {
        let c = Curve::floored(1000.0, -30.0, 300.0);
        assert_eq!(c.at(0.0), 1000.0);
        assert_eq!(c.at(20.0), 400.0);
        assert_eq!(c.at(1_000.0), 300.0);
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "player_speed": 6.0 }"#).unwrap();
        assert_eq!(tuning.player_speed, 6.0);
        assert_eq!(tuning.arena_width, ARENA_WIDTH);
        assert_eq!(tuning.phases, PhaseTable::default());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut tuning = Tuning::default();
        tuning.player_size = 0.0;
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::Invalid { field: "player_size", .. })
        ));

        let mut tuning = Tuning::default();
        tuning.player_size = 1_000.0;
        assert!(tuning.validate().is_err());

        let mut tuning = Tuning::default();
        tuning.phases.mixed.enters_at_secs = 20.0;
        assert!(tuning.validate().is_err());

        assert!(Tuning::default().validate().is_ok());
    }

    proptest! {
        #[test]
        fn prop_intervals_never_below_floor(t in 0.0f64..100_000.0) {
            let table = PhaseTable::default();
            for phase in Phase::ALL {
                let spec = table.get(phase);
                for family in [spec.straight, spec.aimed].into_iter().flatten() {
                    if let Some(curve) = family.interval {
                        let floor = curve.floor.unwrap();
                        prop_assert!(curve.at(t) >= floor);
                    }
                }
            }
        }

        #[test]
        fn prop_intervals_monotonic_non_increasing(t in 0.0f64..10_000.0, dt in 0.0f64..100.0) {
            let table = PhaseTable::default();
            for phase in Phase::ALL {
                let spec = table.get(phase);
                for family in [spec.straight, spec.aimed].into_iter().flatten() {
                    if let Some(curve) = family.interval {
                        prop_assert!(curve.at(t + dt) <= curve.at(t));
                    }
                    prop_assert!(family.speed.at(t + dt) >= family.speed.at(t));
                }
            }
        }
    }
}

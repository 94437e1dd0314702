//! Best survival time
//!
//! A single number persisted to LocalStorage as a one-decimal string
//! (e.g. `"45.3"`). It only ever goes up.

use crate::platform::storage;
use crate::round_tenths;

/// Best survived time in seconds
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HighScore {
    pub best: f64,
}

impl HighScore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "dodge_highscore";

    pub fn new(best: f64) -> Self {
        Self { best }
    }

    /// Parse the stored representation; anything unusable reads as 0
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Self::new(round_tenths(v)),
            _ => {
                log::warn!("Ignoring unreadable high score {raw:?}");
                Self::default()
            }
        }
    }

    /// Stored representation
    pub fn encode(&self) -> String {
        format!("{:.1}", self.best)
    }

    /// Record a finished run. Returns true (and updates) only when `survived`
    /// strictly beats the current best. Rounding never lowers the best.
    pub fn record(&mut self, survived: f64) -> bool {
        if survived > self.best {
            self.best = round_tenths(survived).max(self.best);
            true
        } else {
            false
        }
    }

    /// Load from LocalStorage, 0 if absent
    pub fn load() -> Self {
        match storage::get_item(Self::STORAGE_KEY) {
            Some(raw) => {
                let score = Self::parse(&raw);
                log::info!("Loaded best time {:.1}s", score.best);
                score
            }
            None => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
        }
    }

    /// Save to LocalStorage (best-effort)
    pub fn save(&self) {
        if storage::set_item(Self::STORAGE_KEY, &self.encode()) {
            log::info!("High score saved ({:.1}s)", self.best);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_record_is_strict() {
        let mut hs = HighScore::new(45.2);
        assert!(!hs.record(45.2));
        assert_eq!(hs.best, 45.2);
        assert!(hs.record(45.3));
        assert_eq!(hs.best, 45.3);
        assert!(!hs.record(10.0));
        assert_eq!(hs.best, 45.3);
    }

    #[test]
    fn test_record_rounds_to_tenths() {
        let mut hs = HighScore::default();
        assert!(hs.record(12.345));
        assert_eq!(hs.best, 12.3);
        assert_eq!(hs.encode(), "12.3");
    }

    #[test]
    fn test_parse() {
        assert_eq!(HighScore::parse("45.3").best, 45.3);
        assert_eq!(HighScore::parse(" 7 ").best, 7.0);
        assert_eq!(HighScore::parse("garbage").best, 0.0);
        assert_eq!(HighScore::parse("-3").best, 0.0);
        assert_eq!(HighScore::parse("NaN").best, 0.0);
        assert_eq!(HighScore::parse("45.24").best, 45.2);
    }

    #[test]
    fn test_off_tenth_best_never_rounds_down() {
        let mut hs = HighScore::new(45.24);
        assert!(hs.record(45.245));
        assert!(hs.best >= 45.24);

        let mut stored = HighScore::parse("45.24");
        stored.record(45.245);
        assert_eq!(stored.best, 45.2);
    }

    #[test]
    fn test_native_load_defaults() {
        assert_eq!(HighScore::load().best, 0.0);
    }

    proptest! {
        #[test]
        fn prop_best_never_decreases(
            start in 0.0f64..500.0,
            runs in proptest::collection::vec(0.0f64..500.0, 0..50),
        ) {
            let mut hs = HighScore::new(start);
            for run in runs {
                let before = hs.best;
                hs.record(run);
                prop_assert!(hs.best >= before);
            }
        }
    }
}

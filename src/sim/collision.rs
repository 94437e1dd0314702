//! Axis-aligned bounding box collision
//!
//! Player and enemies are squares addressed by their top-left corner, so a
//! strict interval overlap on both axes is all that is needed. Touching
//! edges do not count as a hit.

use glam::Vec2;

use super::state::{Enemy, Player};

/// An axis-aligned square
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    pub size: f32,
}

impl Aabb {
    pub fn new(min: Vec2, size: f32) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + Vec2::splat(self.size)
    }

    /// Strict overlap on both axes
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

impl From<&Player> for Aabb {
    fn from(p: &Player) -> Self {
        Aabb::new(p.pos, p.size)
    }
}

impl From<&Enemy> for Aabb {
    fn from(e: &Enemy) -> Self {
        Aabb::new(e.pos, e.size)
    }
}

/// Index of the first enemy (in insertion order) overlapping the player
pub fn first_hit(player: &Player, enemies: &[Enemy]) -> Option<usize> {
    let p = Aabb::from(player);
    enemies.iter().position(|e| p.overlaps(&Aabb::from(e)))
}

//! Frame composition
//!
//! Turns a [`Snapshot`] into a vertex list. Pure, so it can be tested
//! without a GPU.

use glam::Vec2;
use rand::Rng;

use super::shapes::{fill, square};
use super::vertex::{Vertex, colors};
use crate::sim::{GameMode, Snapshot};

/// Peak shake amplitude in pixels
const SHAKE_PX: f32 = 8.0;
/// Peak red flash opacity
const FLASH_ALPHA: f32 = 0.7;

/// Random shake offset for the death effect, shrinking to zero as it ends
pub fn death_shake(progress: f32, rng: &mut impl Rng) -> Vec2 {
    if progress >= 1.0 {
        return Vec2::ZERO;
    }
    let intensity = SHAKE_PX * (1.0 - progress);
    Vec2::new(
        (rng.random::<f32>() - 0.5) * intensity,
        (rng.random::<f32>() - 0.5) * intensity,
    )
}

/// Opacity of the pulsing red flash
pub fn flash_alpha(elapsed_ms: f64, progress: f32) -> f32 {
    let pulse = (elapsed_ms * 0.02).sin() as f32 * 0.5 + 0.5;
    (1.0 - progress) * FLASH_ALPHA * pulse
}

/// Build the vertex list for one frame. `shake` offsets every shape.
pub fn build_scene(snap: &Snapshot, shake: Vec2) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((snap.enemies.len() + 4) * 6);
    vertices.extend(fill(snap.arena, colors::ARENA));

    if snap.mode == GameMode::Menu {
        return vertices;
    }

    if let (Some(elapsed), Some(progress)) = (snap.death_elapsed_ms, snap.death_progress) {
        let alpha = flash_alpha(elapsed, progress);
        vertices.extend(fill(snap.arena, [1.0, 0.0, 0.0, alpha]));
    }

    vertices.extend(square(snap.player.pos, snap.player.size, colors::PLAYER));
    for enemy in &snap.enemies {
        vertices.extend(square(enemy.pos, enemy.size, colors::ENEMY));
    }

    if snap.transition.is_some() {
        vertices.extend(fill(snap.arena, colors::VEIL));
    }

    if shake != Vec2::ZERO {
        for v in &mut vertices[6..] {
            v.position[0] += shake.x;
            v.position[1] += shake.y;
        }
    }

    vertices
}

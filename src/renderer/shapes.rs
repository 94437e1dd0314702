//! Shape generation for 2D primitives

use glam::Vec2;

use super::vertex::Vertex;

/// Axis-aligned rectangle from its top-left corner, as two triangles
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let max = min + size;
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Square entity quad
pub fn square(pos: Vec2, size: f32, color: [f32; 4]) -> [Vertex; 6] {
    rect(pos, Vec2::splat(size), color)
}

/// Fill the whole arena
pub fn fill(arena: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    rect(Vec2::ZERO, arena, color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_corners() {
        let quad = rect(Vec2::new(10.0, 20.0), Vec2::new(8.0, 4.0), [1.0; 4]);
        let xs: Vec<f32> = quad.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = quad.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 18.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 24.0);
    }
}

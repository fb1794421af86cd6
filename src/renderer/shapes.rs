//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Generate vertices for a filled axis-aligned square
pub fn square(center: Vec2, half_size: f32, color: [f32; 4]) -> Vec<Vertex> {
    let min = center - Vec2::splat(half_size);
    let max = center + Vec2::splat(half_size);

    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, max.y, color),
    ]
}

/// Generate vertices for an upward-pointing filled triangle of edge `size`
///
/// Apex at `center.y + size/2`, base at `center.y - size/2`.
pub fn triangle(center: Vec2, size: f32, color: [f32; 4]) -> Vec<Vertex> {
    let half = size / 2.0;
    vec![
        Vertex::new(center.x, center.y + half, color),
        Vertex::new(center.x - half, center.y - half, color),
        Vertex::new(center.x + half, center.y - half, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_square_covers_bounds() {
        let verts = square(Vec2::new(100.0, 50.0), 25.0, WHITE);
        assert_eq!(verts.len(), 6);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 75.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 125.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 25.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 75.0);
    }

    #[test]
    fn test_triangle_points_up() {
        let verts = triangle(Vec2::new(0.0, 0.0), 30.0, WHITE);
        assert_eq!(verts.len(), 3);
        assert_eq!(verts[0].position, [0.0, 15.0]);
        assert_eq!(verts[1].position, [-15.0, -15.0]);
        assert_eq!(verts[2].position, [15.0, -15.0]);
    }

    #[test]
    fn test_circle_radius() {
        let center = Vec2::new(10.0, 10.0);
        let verts = circle(center, 5.0, WHITE, 12);
        assert_eq!(verts.len(), 36);
        for v in verts.iter().skip(1).step_by(3) {
            let d = Vec2::from(v.position).distance(center);
            assert!((d - 5.0).abs() < 1e-4);
        }
    }
}

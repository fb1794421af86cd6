//! Collision and bounds tests
//!
//! Everything here is axis-aligned: the player is a square, the screen is a
//! rectangle with its origin at the bottom-left corner, and projectiles are
//! tested by their centre point only.

use glam::Vec2;

/// Is `point` strictly inside the square centred on `center`?
///
/// Open interval on both axes: a point exactly on an edge is a miss.
#[inline]
pub fn point_in_square(point: Vec2, center: Vec2, half_size: f32) -> bool {
    center.x - half_size < point.x
        && point.x < center.x + half_size
        && center.y - half_size < point.y
        && point.y < center.y + half_size
}

/// Is `point` outside the screen rectangle grown by `margin` on every side?
#[inline]
pub fn outside_screen(point: Vec2, screen: Vec2, margin: f32) -> bool {
    point.x < -margin || point.x > screen.x + margin || point.y < -margin || point.y > screen.y + margin
}

/// Clamp a square's centre so the whole square stays on screen
#[inline]
pub fn clamp_square_to_screen(center: Vec2, half_size: f32, screen: Vec2) -> Vec2 {
    let min = Vec2::splat(half_size);
    let max = screen - Vec2::splat(half_size);
    center.clamp(min, max)
}

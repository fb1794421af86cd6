//! Turn a game state into a flat vertex list
//!
//! Pure CPU work, so it is testable without a GPU. Coordinates stay in
//! screen space; [`super::RenderState`] maps them to clip space.

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::GameState;

/// Segments used for projectile circles
const PROJECTILE_SEGMENTS: u32 = 12;

/// Player color by remaining health
pub fn player_color(health: u8) -> [f32; 4] {
    match health {
        0 => colors::PLAYER_DEAD,
        1 => colors::PLAYER_CRITICAL,
        2 => colors::PLAYER_HURT,
        _ => colors::PLAYER_FULL,
    }
}

/// Build the vertices for one frame: player, then enemies, then projectiles
pub fn build_scene(state: &GameState) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(
        6 + state.enemies.len() * 3 + state.projectiles.len() * PROJECTILE_SEGMENTS as usize * 3,
    );

    let player = &state.player;
    vertices.extend(shapes::square(
        player.pos,
        player.half_size,
        player_color(player.health),
    ));

    for enemy in &state.enemies {
        vertices.extend(shapes::triangle(enemy.pos, enemy.size, colors::ENEMY));
    }

    for projectile in &state.projectiles {
        vertices.extend(shapes::circle(
            projectile.pos,
            projectile.radius,
            colors::PROJECTILE,
            PROJECTILE_SEGMENTS,
        ));
    }

    vertices
}

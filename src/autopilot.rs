//! Idle/demo mode - a simple bot that plays the game
//!
//! Produces the same [`MoveIntent`] a human would, so the simulation cannot
//! tell the difference. Used by the headless driver and the browser's idle
//! toggle.

use glam::Vec2;

use crate::input::MoveIntent;
use crate::sim::GameState;

/// Projectiles farther than this are ignored
const THREAT_RANGE: f32 = 250.0;
/// How close to a wall before the bot steers back toward the middle
const WALL_BUFFER: f32 = 60.0;

/// Pick movement for this frame: sidestep the most urgent incoming shot,
/// otherwise drift back toward the centre of the screen.
pub fn autopilot(state: &GameState) -> MoveIntent {
    if state.is_game_over() {
        return MoveIntent::default();
    }

    let player = state.player.pos;

    // Most urgent threat: closest projectile still flying toward us
    let threat = state
        .projectiles
        .iter()
        .filter(|p| p.vel != Vec2::ZERO && p.vel.dot(player - p.pos) > 0.0)
        .map(|p| (p, p.pos.distance(player)))
        .filter(|(_, dist)| *dist < THREAT_RANGE)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut desired = match threat {
        Some((p, _)) => {
            // Step sideways off the projectile's line
            let mut side = p.vel.perp();
            if side.dot(player - p.pos) < 0.0 {
                side = -side;
            }
            side.normalize_or_zero()
        }
        None => {
            let home = state.tuning.screen() / 2.0 - player;
            if home.length() < state.player.half_size {
                Vec2::ZERO
            } else {
                home.normalize_or_zero()
            }
        }
    };

    // Don't pin ourselves against a wall
    let screen = state.tuning.screen();
    if player.x < WALL_BUFFER {
        desired.x = desired.x.max(0.5);
    } else if player.x > screen.x - WALL_BUFFER {
        desired.x = desired.x.min(-0.5);
    }
    if player.y < WALL_BUFFER {
        desired.y = desired.y.max(0.5);
    } else if player.y > screen.y - WALL_BUFFER {
        desired.y = desired.y.min(-0.5);
    }

    const DEAD_ZONE: f32 = 0.3;
    MoveIntent {
        up: desired.y > DEAD_ZONE,
        down: desired.y < -DEAD_ZONE,
        left: desired.x < -DEAD_ZONE,
        right: desired.x > DEAD_ZONE,
    }
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (insertion order of enemies and projectiles)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{clamp_square_to_screen, outside_screen, point_in_square};
pub use state::{Enemy, GameEvent, GameState, Player, Projectile, Snapshot};
pub use tick::tick;

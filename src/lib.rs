//! Square vs Triangles - a tiny survival arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, enemies, projectiles, collisions)
//! - `input`: Movement intent flags and key mapping
//! - `tuning`: Data-driven game balance
//! - `renderer`: Scene building, HUD model and WebGPU pipeline
//! - `autopilot`: Idle/demo bot that drives the player

pub mod autopilot;
pub mod input;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use input::{Direction, MoveIntent, intent_off, intent_on};
pub use tuning::{EscalationMode, Tuning, TuningError};

/// Game configuration constants (reference balance, see [`Tuning::default`])
pub mod consts {
    /// Visible play area, in screen units
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Player square edge length
    pub const PLAYER_SIZE: f32 = 50.0;
    /// Player starting speed (units/s)
    pub const PLAYER_START_SPEED: f32 = 200.0;
    /// Player starting (and maximum) health
    pub const PLAYER_MAX_HEALTH: u8 = 3;

    /// Enemy triangle size
    pub const ENEMY_SIZE: f32 = 30.0;
    /// Inset from the screen edge where enemies appear
    pub const ENEMY_SPAWN_MARGIN: f32 = 50.0;
    /// Seconds between enemy spawns
    pub const SPAWN_INTERVAL: f32 = 5.0;
    /// Seconds between shots of a single enemy
    pub const FIRE_INTERVAL: f32 = 3.0;

    /// Projectile speed (units/s)
    pub const PROJECTILE_SPEED: f32 = 300.0;
    /// Projectile radius (drawing only, hits test the centre point)
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    /// Distance past the screen edge before a projectile is dropped
    pub const OUT_OF_BOUNDS_MARGIN: f32 = 50.0;

    /// Seconds between player speed escalations
    pub const ESCALATION_INTERVAL: f32 = 2.0;
    /// Multiplier applied to player speed on each escalation
    pub const ESCALATION_FACTOR: f32 = 1.10;

    /// Largest frame delta the browser loop feeds into the simulation
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Delta used for the very first frame (no previous timestamp)
    pub const FIRST_FRAME_DT: f32 = 1.0 / 60.0;
}

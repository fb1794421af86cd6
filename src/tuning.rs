//! Gameplay tuning
//!
//! Every balance number the simulation reads lives here, so a run can be
//! reconfigured from JSON without touching code. Keep runtime concerns
//! (frame pacing, canvas size) out of this struct.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// How the player speed escalation timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationMode {
    /// Once every `escalation_interval` seconds of play
    #[default]
    Interval,
    /// Every simulated frame, regardless of the interval
    EveryFrame,
}

/// Errors reported when a tuning set is rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("escalation_factor must be at least 1.0, got {0}")]
    ShrinkingEscalation(f32),

    #[error("player_health must be at least 1")]
    NoHealth,

    #[error("player_health {health} exceeds the maximum of {max}")]
    TooMuchHealth { health: u8, max: u8 },

    #[error("spawn margin {margin} leaves no room on a {width}x{height} screen")]
    SpawnMarginTooLarge { margin: f32, width: f32, height: f32 },

    #[error("player size {size} does not fit on a {width}x{height} screen")]
    PlayerTooLarge { size: f32, width: f32, height: f32 },
}

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    pub screen_width: f32,
    pub screen_height: f32,

    /// Edge length of the player square
    pub player_size: f32,
    /// Starting speed in units per second
    pub player_speed: f32,
    pub player_health: u8,

    pub enemy_size: f32,
    pub enemy_spawn_margin: f32,
    /// Seconds between enemy spawns
    pub spawn_interval: f32,
    /// Seconds between shots of one enemy
    pub fire_interval: f32,

    pub projectile_speed: f32,
    pub projectile_radius: f32,
    /// Extra distance past the screen before a projectile is discarded
    pub out_of_bounds_margin: f32,

    pub escalation_interval: f32,
    pub escalation_factor: f32,
    pub escalation_mode: EscalationMode,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            player_size: PLAYER_SIZE,
            player_speed: PLAYER_START_SPEED,
            player_health: PLAYER_MAX_HEALTH,

            enemy_size: ENEMY_SIZE,
            enemy_spawn_margin: ENEMY_SPAWN_MARGIN,
            spawn_interval: SPAWN_INTERVAL,
            fire_interval: FIRE_INTERVAL,

            projectile_speed: PROJECTILE_SPEED,
            projectile_radius: PROJECTILE_RADIUS,
            out_of_bounds_margin: OUT_OF_BOUNDS_MARGIN,

            escalation_interval: ESCALATION_INTERVAL,
            escalation_factor: ESCALATION_FACTOR,
            escalation_mode: EscalationMode::Interval,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override on top of the defaults and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Screen dimensions as a vector
    #[inline]
    pub fn screen(&self) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height)
    }

    /// Half the player square's edge
    #[inline]
    pub fn player_half_size(&self) -> f32 {
        self.player_size / 2.0
    }

    /// Check every invariant the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("player_size", self.player_size),
            ("player_speed", self.player_speed),
            ("enemy_size", self.enemy_size),
            ("spawn_interval", self.spawn_interval),
            ("fire_interval", self.fire_interval),
            ("projectile_speed", self.projectile_speed),
            ("projectile_radius", self.projectile_radius),
            ("escalation_interval", self.escalation_interval),
            ("escalation_factor", self.escalation_factor),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        // Margins may be zero but not negative
        for (field, value) in [
            ("enemy_spawn_margin", self.enemy_spawn_margin),
            ("out_of_bounds_margin", self.out_of_bounds_margin),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        if self.escalation_factor < 1.0 {
            return Err(TuningError::ShrinkingEscalation(self.escalation_factor));
        }
        if self.player_health == 0 {
            return Err(TuningError::NoHealth);
        }
        if self.player_health > PLAYER_MAX_HEALTH {
            return Err(TuningError::TooMuchHealth {
                health: self.player_health,
                max: PLAYER_MAX_HEALTH,
            });
        }

        let shortest = self.screen_width.min(self.screen_height);
        if self.enemy_spawn_margin * 2.0 > shortest {
            return Err(TuningError::SpawnMarginTooLarge {
                margin: self.enemy_spawn_margin,
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        if self.player_size > shortest {
            return Err(TuningError::PlayerTooLarge {
                size: self.player_size,
                width: self.screen_width,
                height: self.screen_height,
            });
        }

        Ok(())
    }
}

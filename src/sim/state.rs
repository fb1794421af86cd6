//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`]; the renderer and
//! the HUD only read it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{clamp_square_to_screen, outside_screen, point_in_square};
use crate::input::MoveIntent;
use crate::tuning::{Tuning, TuningError};

/// Relative slack on timer thresholds. Summed f32 frame deltas land a hair
/// short of the interval (120 × 1/60 < 2.0), which would cost a whole frame
/// per interval.
const TIMER_TOLERANCE: f32 = 1.0e-4;

/// True once an accumulated timer has reached `interval`
#[inline]
pub fn interval_elapsed(timer: f32, interval: f32) -> bool {
    timer >= interval * (1.0 - TIMER_TOLERANCE)
}

/// The player's square
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Centre of the square
    pub pos: Vec2,
    pub half_size: f32,
    /// Current movement speed (grows with escalation, never shrinks)
    pub speed: f32,
    pub vel: Vec2,
    /// Remaining hits, 0 means dead
    pub health: u8,
    pub alive: bool,
}

impl Player {
    pub fn new(pos: Vec2, half_size: f32, speed: f32, health: u8) -> Self {
        Self {
            pos,
            half_size,
            speed,
            vel: Vec2::ZERO,
            health,
            alive: health > 0,
        }
    }

    /// Derive velocity from the held directions
    pub fn steer(&mut self, intent: &MoveIntent) {
        self.vel = Vec2::new(intent.axis_x(), intent.axis_y()) * self.speed;
    }

    /// Move by velocity and keep the square on screen
    pub fn integrate(&mut self, dt: f32, screen: Vec2) {
        self.pos += self.vel * dt;
        self.pos = clamp_square_to_screen(self.pos, self.half_size, screen);
    }

    /// Apply one projectile hit. Returns true if this hit killed the player.
    pub fn take_hit(&mut self) -> bool {
        if self.health == 0 {
            return false;
        }
        self.health -= 1;
        if self.health == 0 {
            self.alive = false;
            self.vel = Vec2::ZERO;
            return true;
        }
        false
    }
}

/// A stationary triangle turret
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    /// Seconds since this enemy last fired
    pub time_since_shot: f32,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, size: f32) -> Self {
        Self {
            id,
            pos,
            size,
            time_since_shot: 0.0,
        }
    }

    /// Place a new enemy on a random screen edge, inset by `margin`
    pub fn spawn(id: u32, rng: &mut impl Rng, screen: Vec2, margin: f32, size: f32) -> Self {
        let (far_x, far_y) = (screen.x - margin, screen.y - margin);

        let pos = match rng.random_range(0..4u8) {
            // Top
            0 => Vec2::new(rng.random_range(margin..=far_x), far_y),
            // Right
            1 => Vec2::new(far_x, rng.random_range(margin..=far_y)),
            // Bottom
            2 => Vec2::new(rng.random_range(margin..=far_x), margin),
            // Left
            _ => Vec2::new(margin, rng.random_range(margin..=far_y)),
        };

        Self::new(id, pos, size)
    }

    /// Advance the firing timer. True once the interval has elapsed; the
    /// caller fires and then calls [`Enemy::reset_timer`].
    pub fn tick(&mut self, dt: f32, fire_interval: f32) -> bool {
        self.time_since_shot += dt;
        interval_elapsed(self.time_since_shot, fire_interval)
    }

    pub fn reset_timer(&mut self) {
        self.time_since_shot = 0.0;
    }
}

/// A straight-flying enemy shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Fixed at creation (no homing)
    pub vel: Vec2,
    pub radius: f32,
}

impl Projectile {
    /// Shot from `origin` aimed at `target`. Zero distance gives a shot that never moves.
    pub fn aimed(id: u32, origin: Vec2, target: Vec2, speed: f32, radius: f32) -> Self {
        let vel = (target - origin).normalize_or_zero() * speed;
        Self {
            id,
            pos: origin,
            vel,
            radius,
        }
    }

    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    #[inline]
    pub fn is_out_of_bounds(&self, screen: Vec2, margin: f32) -> bool {
        outside_screen(self.pos, screen, margin)
    }

    /// Centre-in-square test; `radius` is intentionally not considered
    #[inline]
    pub fn hits(&self, player_pos: Vec2, player_half_size: f32) -> bool {
        point_in_square(self.pos, player_pos, player_half_size)
    }
}

/// Things that happened during the last tick (for HUD, logs, sound)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemySpawned { id: u32, pos: Vec2 },
    ProjectileFired { id: u32, from: Vec2, velocity: Vec2 },
    SpeedEscalated { speed: f32 },
    PlayerHit { health: u8 },
    /// `survived` is the session time in seconds
    PlayerDied { survived: f32 },
    ProjectileExpired { id: u32 },
}

/// Read-only view of the world handed to presentation code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub frame: u64,
    pub elapsed: f32,
    pub screen: Vec2,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub player: Player,
    /// Enemies never despawn; this grows for the whole session
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    /// Seconds since the last enemy spawn
    pub spawn_timer: f32,
    /// Seconds since the last speed escalation
    pub escalation_timer: f32,
    /// Number of escalations applied so far
    pub escalations: u32,
    /// Simulated session time in seconds (stops when the player dies)
    pub elapsed: f32,
    /// Simulated frames
    pub frame: u64,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// New game with the reference tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// New game with custom tuning (validated first)
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let player = Player::new(
            tuning.screen() / 2.0,
            tuning.player_half_size(),
            tuning.player_speed,
            tuning.player_health,
        );

        Self {
            seed,
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            spawn_timer: 0.0,
            escalation_timer: 0.0,
            escalations: 0,
            elapsed: 0.0,
            frame: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.player.health == 0
    }

    /// Current speed relative to the starting speed
    pub fn speed_multiplier(&self) -> f32 {
        self.player.speed / self.tuning.player_speed
    }

    /// Spawn an enemy on a random edge
    pub fn spawn_enemy(&mut self) -> u32 {
        let id = self.next_entity_id();
        let enemy = Enemy::spawn(
            id,
            &mut self.rng,
            self.tuning.screen(),
            self.tuning.enemy_spawn_margin,
            self.tuning.enemy_size,
        );
        log::debug!(
            "Enemy {} spawned at ({:.0}, {:.0}), {} on field",
            id,
            enemy.pos.x,
            enemy.pos.y,
            self.enemies.len() + 1
        );
        self.events.push(GameEvent::EnemySpawned { id, pos: enemy.pos });
        self.enemies.push(enemy);
        id
    }

    /// Place an enemy at a fixed position (scripted setups, tests)
    pub fn add_enemy_at(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(id, pos, self.tuning.enemy_size));
        id
    }

    /// Fire a projectile from `origin` toward `target`
    pub fn fire_projectile(&mut self, origin: Vec2, target: Vec2) -> u32 {
        let id = self.next_entity_id();
        let projectile = Projectile::aimed(
            id,
            origin,
            target,
            self.tuning.projectile_speed,
            self.tuning.projectile_radius,
        );
        log::debug!(
            "Projectile {} fired from ({:.0}, {:.0})",
            id,
            origin.x,
            origin.y
        );
        self.events.push(GameEvent::ProjectileFired {
            id,
            from: origin,
            velocity: projectile.vel,
        });
        self.projectiles.push(projectile);
        id
    }

    /// Copy of everything presentation code needs
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            frame: self.frame,
            elapsed: self.elapsed,
            screen: self.tuning.screen(),
            player: self.player.clone(),
            enemies: self.enemies.clone(),
            projectiles: self.projectiles.clone(),
        }
    }
}

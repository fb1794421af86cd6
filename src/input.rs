//! Movement intent flags
//!
//! The simulation never sees keys, only four booleans. Key events from the
//! host are folded into a [`MoveIntent`] with [`intent_on`] / [`intent_off`]
//! between simulation steps.

use serde::{Deserialize, Serialize};

/// One of the four movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Map a key name to a direction.
    ///
    /// Accepts both `KeyboardEvent.key` ("ArrowUp", "w", "W") and
    /// `KeyboardEvent.code` ("KeyW") spellings. Arrow keys and WASD drive
    /// the same four directions.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "Up" | "w" | "W" | "KeyW" => Some(Direction::Up),
            "ArrowDown" | "Down" | "s" | "S" | "KeyS" => Some(Direction::Down),
            "ArrowLeft" | "Left" | "a" | "A" | "KeyA" => Some(Direction::Left),
            "ArrowRight" | "Right" | "d" | "D" | "KeyD" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Held-direction flags consumed by [`crate::sim::tick`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    pub const fn new() -> Self {
        Self {
            up: false,
            down: false,
            left: false,
            right: false,
        }
    }

    #[inline]
    pub fn is_held(&self, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    #[inline]
    pub fn set(&mut self, dir: Direction, held: bool) {
        match dir {
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    /// Net horizontal direction: -1, 0 or 1 (opposite keys cancel)
    #[inline]
    pub fn axis_x(&self) -> f32 {
        (self.right as i8 - self.left as i8) as f32
    }

    /// Net vertical direction: -1, 0 or 1 (up is +y)
    #[inline]
    pub fn axis_y(&self) -> f32 {
        (self.up as i8 - self.down as i8) as f32
    }

    /// Release every direction (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

/// Key pressed: raise the mapped flag. Returns false for unmapped keys.
pub fn intent_on(intent: &mut MoveIntent, key: &str) -> bool {
    match Direction::from_key(key) {
        Some(dir) => {
            intent.set(dir, true);
            true
        }
        None => false,
    }
}

/// Key released: lower the mapped flag. Returns false for unmapped keys.
pub fn intent_off(intent: &mut MoveIntent, key: &str) -> bool {
    match Direction::from_key(key) {
        Some(dir) => {
            intent.set(dir, false);
            true
        }
        None => false,
    }
}

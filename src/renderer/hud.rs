//! HUD text model
//!
//! The browser build writes these strings into DOM elements; the native
//! driver logs them.

use crate::sim::GameState;

/// Text shown over the play field
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub health: String,
    pub enemies: String,
    pub survived: String,
    /// Shown only once the player is dead
    pub game_over: Option<String>,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            health: format!("Health: {}", state.player.health),
            enemies: format!("Enemies: {}", state.enemies.len()),
            survived: format!("Time: {:.1}s", state.elapsed),
            game_over: state
                .is_game_over()
                .then(|| "GAME OVER!".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;

    #[test]
    fn test_hud_alive() {
        let mut state = GameState::new(1);
        state.add_enemy_at(Vec2::new(50.0, 50.0));
        let hud = Hud::from_state(&state);
        assert_eq!(hud.health, "Health: 3");
        assert_eq!(hud.enemies, "Enemies: 1");
        assert_eq!(hud.survived, "Time: 0.0s");
        assert!(hud.game_over.is_none());
    }

    #[test]
    fn test_hud_game_over() {
        let mut state = GameState::new(1);
        for _ in 0..3 {
            state.player.take_hit();
        }
        let hud = Hud::from_state(&state);
        assert_eq!(hud.health, "Health: 0");
        assert_eq!(hud.game_over.as_deref(), Some("GAME OVER!"));
    }
}

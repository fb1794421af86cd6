//! Per-frame simulation step
//!
//! Core game loop that advances the world by one frame of `dt` seconds.

use super::state::{GameEvent, GameState, interval_elapsed};
use crate::input::MoveIntent;
use crate::tuning::EscalationMode;

/// Advance the game state by one frame
///
/// Order matters: movement, spawning, escalation, enemy fire, then
/// projectile resolution against the player's new position.
pub fn tick(state: &mut GameState, intent: &MoveIntent, dt: f32) {
    state.events.clear();

    // Dead players freeze the world
    if state.player.health == 0 {
        return;
    }

    state.frame += 1;
    state.elapsed += dt;

    let screen = state.tuning.screen();

    // Player movement
    state.player.steer(intent);
    state.player.integrate(dt, screen);

    // Enemy spawning
    state.spawn_timer += dt;
    if interval_elapsed(state.spawn_timer, state.tuning.spawn_interval) {
        state.spawn_enemy();
        state.spawn_timer = 0.0;
    }

    update_escalation(state, dt);

    // Enemy fire, aimed at where the player is now
    let target = state.player.pos;
    let fire_interval = state.tuning.fire_interval;
    let mut origins = Vec::new();
    for enemy in &mut state.enemies {
        if enemy.tick(dt, fire_interval) {
            origins.push(enemy.pos);
            enemy.reset_timer();
        }
    }
    for origin in origins {
        state.fire_projectile(origin, target);
    }

    resolve_projectiles(state, dt);
}

/// Speed ramp: multiply player speed on its own cadence
fn update_escalation(state: &mut GameState, dt: f32) {
    let due = match state.tuning.escalation_mode {
        EscalationMode::Interval => {
            state.escalation_timer += dt;
            interval_elapsed(state.escalation_timer, state.tuning.escalation_interval)
        }
        EscalationMode::EveryFrame => true,
    };

    if due {
        state.escalation_timer = 0.0;
        state.escalations += 1;
        state.player.speed *= state.tuning.escalation_factor;
        log::debug!(
            "Speed escalation #{}: {:.1} u/s",
            state.escalations,
            state.player.speed
        );
        state.events.push(GameEvent::SpeedEscalated {
            speed: state.player.speed,
        });
    }
}

/// Move every projectile, then drop the ones that hit or left play.
/// A hit always wins over leaving the screen.
fn resolve_projectiles(state: &mut GameState, dt: f32) {
    let screen = state.tuning.screen();
    let margin = state.tuning.out_of_bounds_margin;
    let elapsed = state.elapsed;
    let player = &mut state.player;
    let events = &mut state.events;

    state.projectiles.retain_mut(|projectile| {
        projectile.advance(dt);

        if player.alive && projectile.hits(player.pos, player.half_size) {
            let died = player.take_hit();
            log::info!("Player hit, health {}", player.health);
            events.push(GameEvent::PlayerHit {
                health: player.health,
            });
            if died {
                log::info!("Player died after {:.1}s", elapsed);
                events.push(GameEvent::PlayerDied { survived: elapsed });
            }
            return false;
        }

        if projectile.is_out_of_bounds(screen, margin) {
            events.push(GameEvent::ProjectileExpired { id: projectile.id });
            return false;
        }

        true
    });
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use proptest::prelude::*;

    use super::*;
    use crate::sim::state::Projectile;
    use crate::tuning::Tuning;

    /// Tuning where enemies effectively never shoot
    fn quiet_tuning() -> Tuning {
        Tuning {
            fire_interval: 1.0e6,
            ..Default::default()
        }
    }

    fn intent(up: bool, down: bool, left: bool, right: bool) -> MoveIntent {
        MoveIntent {
            up,
            down,
            left,
            right,
        }
    }

    fn run(state: &mut GameState, input: &MoveIntent, dt: f32, steps: usize) {
        for _ in 0..steps {
            tick(state, input, dt);
        }
    }

    #[test]
    fn test_player_moves_and_clamps() {
        let mut state = GameState::with_tuning(1, quiet_tuning()).unwrap();

        tick(&mut state, &intent(false, false, false, true), 0.5);
        assert_eq!(state.player.vel, Vec2::new(200.0, 0.0));
        assert_eq!(state.player.pos, Vec2::new(500.0, 300.0));

        // Hold right long enough to hit the wall
        run(&mut state, &intent(false, false, false, true), 0.5, 10);
        assert_eq!(state.player.pos.x, 800.0 - 25.0);

        run(&mut state, &intent(false, true, false, false), 0.5, 10);
        assert_eq!(state.player.pos.y, 25.0);
    }

    #[test]
    fn test_opposite_intents_cancel() {
        let mut state = GameState::with_tuning(1, quiet_tuning()).unwrap();
        let start = state.player.pos;

        tick(&mut state, &intent(true, true, true, true), 0.25);
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert_eq!(state.player.pos, start);

        tick(&mut state, &intent(true, false, true, true), 0.25);
        assert_eq!(state.player.vel, Vec2::new(0.0, 200.0));
    }

    #[test]
    fn test_spawn_once_per_interval() {
        let mut state = GameState::with_tuning(5, quiet_tuning()).unwrap();

        // 12 seconds at 5 second spawn interval
        run(&mut state, &MoveIntent::default(), 0.25, 48);
        assert_eq!(state.enemies.len(), 2);
        assert!((state.spawn_timer - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_enemies_accumulate() {
        let mut state = GameState::with_tuning(5, quiet_tuning()).unwrap();
        run(&mut state, &MoveIntent::default(), 0.5, 200);
        assert_eq!(state.enemies.len(), 20);
    }

    #[test]
    fn test_speed_escalates_geometrically() {
        let mut state = GameState::with_tuning(9, quiet_tuning()).unwrap();

        // 5 intervals of 2 seconds
        run(&mut state, &MoveIntent::default(), 0.5, 20);
        assert_eq!(state.escalations, 5);

        let expected = 200.0 * 1.1f32.powi(5);
        assert!(
            (state.player.speed - expected).abs() / expected < 1e-4,
            "speed {} expected {}",
            state.player.speed,
            expected
        );
        assert!((state.speed_multiplier() - 1.1f32.powi(5)).abs() < 1e-4);
    }

    #[test]
    fn test_timers_keep_cadence_at_60fps() {
        let mut state = GameState::with_tuning(9, quiet_tuning()).unwrap();

        // Exactly 10 seconds of 60 fps frames
        run(&mut state, &MoveIntent::default(), 1.0 / 60.0, 600);
        assert_eq!(state.escalations, 5);
        assert_eq!(state.enemies.len(), 2);

        // One frame short of an interval is not enough
        let mut state = GameState::with_tuning(9, quiet_tuning()).unwrap();
        run(&mut state, &MoveIntent::default(), 1.0 / 60.0, 119);
        assert_eq!(state.escalations, 0);
        tick(&mut state, &MoveIntent::default(), 1.0 / 60.0);
        assert_eq!(state.escalations, 1);
    }

    #[test]
    fn test_enemy_fires_every_180_frames_at_60fps() {
        let mut state = GameState::new(4);
        state.add_enemy_at(Vec2::new(100.0, 550.0));

        run(&mut state, &MoveIntent::default(), 1.0 / 60.0, 179);
        assert!(state.projectiles.is_empty());
        tick(&mut state, &MoveIntent::default(), 1.0 / 60.0);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.enemies[0].time_since_shot, 0.0);
    }

    #[test]
    fn test_every_frame_escalation_mode() {
        let tuning = Tuning {
            escalation_mode: EscalationMode::EveryFrame,
            ..quiet_tuning()
        };
        let mut state = GameState::with_tuning(9, tuning).unwrap();

        run(&mut state, &MoveIntent::default(), 0.01, 3);
        assert_eq!(state.escalations, 3);
        assert!((state.player.speed - 200.0 * 1.1f32.powi(3)).abs() < 1e-3);
    }

    #[test]
    fn test_enemy_above_fires_straight_down() {
        let mut state = GameState::new(3);
        let above = state.player.pos + Vec2::new(0.0, 50.0);
        state.add_enemy_at(above);
        state.enemies[0].time_since_shot = state.tuning.fire_interval;

        tick(&mut state, &MoveIntent::default(), 0.01);

        assert_eq!(state.projectiles.len(), 1);
        let shot = &state.projectiles[0];
        assert!(shot.vel.x.abs() < 1e-4);
        assert!(shot.vel.y < 0.0);
        assert!((shot.vel.length() - 300.0).abs() < 1e-3);
        assert_eq!(state.enemies[0].time_since_shot, 0.0);
        assert!(matches!(
            state.events.as_slice(),
            [GameEvent::ProjectileFired { .. }]
        ));
    }

    #[test]
    fn test_projectile_landing_on_centre_hits() {
        let mut state = GameState::with_tuning(1, quiet_tuning()).unwrap();
        let center = state.player.pos;
        state.projectiles.push(Projectile {
            id: 99,
            pos: center + Vec2::new(0.0, 37.5),
            vel: Vec2::new(0.0, -300.0),
            radius: 5.0,
        });

        tick(&mut state, &MoveIntent::default(), 0.125);

        assert_eq!(state.player.health, 2);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.events, vec![GameEvent::PlayerHit { health: 2 }]);
    }

    #[test]
    fn test_hit_wins_over_out_of_bounds() {
        let mut state = GameState::with_tuning(1, quiet_tuning()).unwrap();
        // Negative margin puts the whole screen out of bounds
        state.tuning.out_of_bounds_margin = -1000.0;
        state.projectiles.push(Projectile {
            id: 1,
            pos: state.player.pos,
            vel: Vec2::ZERO,
            radius: 5.0,
        });

        tick(&mut state, &MoveIntent::default(), 0.1);

        assert_eq!(state.player.health, 2);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.events, vec![GameEvent::PlayerHit { health: 2 }]);
    }

    #[test]
    fn test_out_of_bounds_projectile_removed() {
        let mut state = GameState::with_tuning(1, quiet_tuning()).unwrap();
        state.projectiles.push(Projectile {
            id: 7,
            pos: Vec2::new(-40.0, 300.0),
            vel: Vec2::new(-300.0, 0.0),
            radius: 5.0,
        });
        state.projectiles.push(Projectile {
            id: 8,
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::new(10.0, 0.0),
            radius: 5.0,
        });

        tick(&mut state, &MoveIntent::default(), 0.1);

        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].id, 8);
        assert_eq!(state.events, vec![GameEvent::ProjectileExpired { id: 7 }]);
        assert_eq!(state.player.health, 3);
    }

    #[test]
    fn test_death_freezes_simulation() {
        let mut state = GameState::with_tuning(1, quiet_tuning()).unwrap();
        let center = state.player.pos;
        for id in 0..4 {
            state.projectiles.push(Projectile {
                id,
                pos: center,
                vel: Vec2::ZERO,
                radius: 5.0,
            });
        }

        tick(&mut state, &intent(true, false, false, false), 0.1);

        assert_eq!(state.player.health, 0);
        assert!(!state.player.alive);
        assert_eq!(state.player.vel, Vec2::ZERO);
        let deaths = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::PlayerDied { .. }))
            .count();
        assert_eq!(deaths, 1);
        assert!(state.is_game_over());

        // Frozen: nothing moves, nothing spawns, events stay empty
        let frozen = state.snapshot();
        run(&mut state, &intent(false, false, true, false), 1.0, 20);
        assert_eq!(state.snapshot(), frozen);
        assert!(state.events.is_empty());
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_full_game_eventually_ends() {
        let mut state = GameState::new(2024);
        let mut health = state.player.health;
        let mut deaths = 0;

        // Standing still at the centre is fatal within a couple of minutes
        for _ in 0..(240 * 60) {
            tick(&mut state, &MoveIntent::default(), 1.0 / 60.0);
            assert!(state.player.health <= health);
            let hits = state
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::PlayerHit { .. }))
                .count() as u8;
            assert_eq!(health - state.player.health, hits);
            health = state.player.health;
            deaths += state
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::PlayerDied { .. }))
                .count();
        }

        assert!(state.is_game_over());
        assert_eq!(deaths, 1);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            intent(true, false, false, false),
            intent(false, false, true, false),
            intent(false, true, false, true),
            MoveIntent::default(),
        ];

        for step in 0..2000 {
            let input = &inputs[(step / 50) % inputs.len()];
            tick(&mut state1, input, 1.0 / 60.0);
            tick(&mut state2, input, 1.0 / 60.0);
        }

        assert_eq!(state1.snapshot(), state2.snapshot());
        assert!(!state1.enemies.is_empty());
    }

    fn any_intent() -> impl Strategy<Value = MoveIntent> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>())
            .prop_map(|(up, down, left, right)| intent(up, down, left, right))
    }

    proptest! {
        #[test]
        fn prop_player_stays_on_screen(
            width in 60.0f32..2000.0,
            height in 60.0f32..2000.0,
            seed in any::<u64>(),
            steps in prop::collection::vec((any_intent(), 0.001f32..0.2), 1..200),
        ) {
            let tuning = Tuning {
                screen_width: width,
                screen_height: height,
                enemy_spawn_margin: 10.0,
                ..Default::default()
            };
            let mut state = GameState::with_tuning(seed, tuning).unwrap();
            let half = state.player.half_size;

            for (input, dt) in &steps {
                tick(&mut state, input, *dt);
                if state.player.health > 0 {
                    prop_assert!(state.player.pos.x >= half && state.player.pos.x <= width - half);
                    prop_assert!(state.player.pos.y >= half && state.player.pos.y <= height - half);
                }
            }
        }

        #[test]
        fn prop_opposite_keys_never_move_axis(input in any_intent(), dt in 0.001f32..0.5) {
            let mut state = GameState::with_tuning(1, quiet_tuning()).unwrap();
            let start = state.player.pos;
            tick(&mut state, &input, dt);

            if input.left == input.right {
                prop_assert_eq!(state.player.vel.x, 0.0);
                prop_assert_eq!(state.player.pos.x, start.x);
            }
            if input.up == input.down {
                prop_assert_eq!(state.player.vel.y, 0.0);
                prop_assert_eq!(state.player.pos.y, start.y);
            }
        }
    }
}

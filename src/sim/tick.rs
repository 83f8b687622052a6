//! Per-frame simulation step
//!
//! Each phase has a fixed set of things that move. Frame deltas vary, so
//! every motion is proportional to elapsed time.

use super::lifecycle::{GamePhase, Transition};
use super::state::GameState;

/// Advance the game by `delta_ms` wall-clock milliseconds
pub fn tick(state: &mut GameState, delta_ms: f32) {
    // A stalled frame (surface wait, debugger) must not teleport anything
    let delta_ms = if delta_ms > 0.0 {
        delta_ms.min(state.max_delta)
    } else {
        0.0
    };
    let scaled_dt = delta_ms * state.game_speed;

    match state.phase {
        GamePhase::Started => {
            state.spawn_timer += delta_ms;

            state.pool.release_offscreen();

            if state.spawn_timer >= state.spawn_interval {
                if !state.pool.spawn(&mut state.rng) {
                    log::debug!("Obstacle pool exhausted, spawn skipped");
                }
                state.spawn_timer = 0.0;
            }

            let actor_x = state.actor.scoring_x();
            let mut crossed = 0;
            for obstacle in state.pool.active_mut() {
                obstacle.step(scaled_dt);
                if obstacle.check_scored(actor_x) {
                    crossed += 1;
                }
            }
            for _ in 0..crossed {
                state.add_score(1);
            }

            // Stop at the first hit
            let actor = &mut state.actor;
            let collided = state.pool.active().any(|o| o.check_collision(actor));
            if collided {
                state.apply(Transition::Collide);
            }

            state.background.step(scaled_dt);
            state.actor.step(delta_ms, scaled_dt);
            state.plane.step(scaled_dt, &mut state.rng);

            if !state.actor.is_alive() {
                state.apply(Transition::Ground);
            }
        }

        GamePhase::Ready => {
            state.background.step(scaled_dt);
            state.actor.step(delta_ms, scaled_dt);
            state.plane.step(scaled_dt, &mut state.rng);
        }

        GamePhase::Finishing => {
            state.plane.step(scaled_dt, &mut state.rng);
            if state.actor.is_alive() {
                state.actor.step(delta_ms, scaled_dt);
            }
            if !state.actor.is_alive() {
                state.apply(Transition::Ground);
            }
        }

        GamePhase::Over => {
            state.plane.step(scaled_dt, &mut state.rng);
            state.fireworks.step(scaled_dt);
        }

        GamePhase::Initializing | GamePhase::Paused => {}
    }
}

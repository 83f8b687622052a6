//! Game state and lifecycle operations
//!
//! `GameState` is plain single-threaded data. The engine wraps it in a mutex
//! and the render thread ticks it; tests drive it directly.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::actor::Actor;
use super::decor::{Background, Fireworks, Plane};
use super::lifecycle::{GamePhase, Transition, next_phase};
use super::pool::ObstaclePool;
use crate::settings::EngineConfig;

/// Something the host should hear about, queued during a tick or command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PhaseChanged(GamePhase),
    Scored { points: u32, total: u32 },
    /// The match with `match_id` ended with `total` points
    GameOver { total: u32, match_id: u64 },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u32,
    /// Host-reported outcome of the last game over
    pub record_beaten: bool,
    /// Bumped every time a match is readied, ties game-over replies to a match
    pub match_id: u64,
    /// Time since the last spawn (ms)
    pub spawn_timer: f32,
    pub spawn_interval: f32,
    /// Scaled ms per wall-clock ms, derived from display density
    pub game_speed: f32,
    pub max_delta: f32,
    pub width: f32,
    pub height: f32,
    pub actor: Actor,
    pub pool: ObstaclePool,
    pub background: Background,
    pub plane: Plane,
    pub fireworks: Fireworks,
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(config: &EngineConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let density = config.density;
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Initializing,
            score: 0,
            record_beaten: false,
            match_id: 0,
            spawn_timer: 0.0,
            spawn_interval: config.spawn_interval_ms,
            game_speed: config.game_speed(),
            max_delta: config.max_frame_delta_ms,
            width: 0.0,
            height: 0.0,
            actor: Actor::new(density),
            pool: ObstaclePool::new(config.pool_capacity, density),
            background: Background::new(density),
            plane: Plane::new(density),
            fireworks: Fireworks::new(density),
            events: Vec::new(),
        }
    }

    /// Lay every object out for a new surface size
    pub fn set_screen_dimensions(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        let floor = self.background.set_screen_dimensions(width, height);
        self.actor.set_screen_dimensions(width, floor);
        self.pool.set_screen_dimensions(width, floor);
        self.plane.set_screen_dimensions(width, floor);
        self.fireworks.set_screen_dimensions(width, floor);
    }

    pub fn is_started(&self) -> bool {
        self.phase == GamePhase::Started
    }

    /// Apply a transition if it is legal from the current phase
    ///
    /// Returns whether anything happened; illegal calls are ignored.
    pub fn apply(&mut self, transition: Transition) -> bool {
        let Some(next) = next_phase(self.phase, transition) else {
            log::debug!("Ignoring {:?} in {:?}", transition, self.phase);
            return false;
        };

        log::debug!("{:?} --{:?}--> {:?}", self.phase, transition, next);
        self.phase = next;
        // Listeners hear about the new phase before any hook reports
        self.events.push(GameEvent::PhaseChanged(next));

        match transition {
            Transition::Reset => {
                self.score = 0;
                self.record_beaten = false;
            }
            Transition::Ready => {
                self.pool.flush();
                self.actor.reset();
                self.fireworks.reset();
                self.spawn_timer = 0.0;
                self.score = 0;
                self.record_beaten = false;
                self.match_id += 1;
            }
            Transition::Start => self.actor.fly(),
            Transition::Resume => self.actor.idle(),
            Transition::Ground => {
                log::info!("Game over with {} points", self.score);
                self.events.push(GameEvent::GameOver {
                    total: self.score,
                    match_id: self.match_id,
                });
            }
            Transition::Pause | Transition::Collide => {}
        }

        true
    }

    pub fn reset(&mut self) -> bool {
        self.apply(Transition::Reset)
    }

    pub fn ready(&mut self) -> bool {
        self.apply(Transition::Ready)
    }

    pub fn start(&mut self) -> bool {
        self.apply(Transition::Start)
    }

    pub fn pause(&mut self) -> bool {
        self.apply(Transition::Pause)
    }

    pub fn resume(&mut self) -> bool {
        self.apply(Transition::Resume)
    }

    /// Flap; does nothing unless the match is running
    pub fn fly(&mut self) -> bool {
        if self.is_started() {
            self.actor.fly();
            return true;
        }
        false
    }

    /// Single-button control: the meaning of a press depends on the phase
    pub fn on_button_pressed(&mut self) -> bool {
        match self.phase {
            GamePhase::Started => self.fly(),
            GamePhase::Ready => self.start(),
            GamePhase::Over => self.ready(),
            GamePhase::Paused => self.resume(),
            GamePhase::Initializing | GamePhase::Finishing => false,
        }
    }

    pub fn add_score(&mut self, points: u32) {
        self.score += points;
        self.events.push(GameEvent::Scored {
            points,
            total: self.score,
        });
    }

    /// Cache the host's answer to a game over
    ///
    /// Dropped if the match has been readied or reset since.
    pub fn set_record_beaten(&mut self, match_id: u64, beaten: bool) {
        if self.phase == GamePhase::Over && self.match_id == match_id {
            self.record_beaten = beaten;
        }
    }

    /// Drain queued events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

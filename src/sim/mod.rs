//! Simulation module
//!
//! All gameplay logic lives here. This module is single-threaded and
//! deterministic for a given seed and delta sequence:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, threading or platform dependencies

pub mod actor;
pub mod collision;
pub mod decor;
pub mod lifecycle;
pub mod obstacle;
pub mod pool;
pub mod state;
pub mod tick;

pub use actor::Actor;
pub use collision::Rect;
pub use decor::{Background, Fireworks, Plane};
pub use lifecycle::{GamePhase, Transition, next_phase};
pub use obstacle::Obstacle;
pub use pool::ObstaclePool;
pub use state::{GameEvent, GameState};
pub use tick::tick;

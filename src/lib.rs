//! Skyhop - a one-button side-scrolling arcade engine
//!
//! Core modules:
//! - `sim`: Simulation (actor, obstacles, lifecycle, per-frame tick)
//! - `engine`: Thread-safe facade the host drives from its UI thread
//! - `render`: Surface adapter, render thread and draw routine
//! - `link`: Routing of wireless accessory events into the engine
//! - `settings`: Engine configuration
//! - `best_score`: Host-side best score store

pub mod autopilot;
pub mod best_score;
pub mod engine;
pub mod link;
pub mod render;
pub mod settings;
pub mod sim;

pub use best_score::BestScore;
pub use engine::{Engine, GameListener, Snapshot};
pub use settings::EngineConfig;
pub use sim::{GamePhase, GameState};

/// Game tuning constants
///
/// Sizes are in dp and get multiplied by the display density. Speeds are in
/// px per scaled millisecond, where scaled ms = wall-clock ms * game speed.
pub mod consts {
    /// Game speed per unit of display density
    pub const SPEED_MODIFIER: f32 = 0.125;
    /// Interval between two obstacles (ms)
    pub const SPAWN_INTERVAL_MS: f32 = 2400.0;
    /// Obstacles allocated up front
    pub const POOL_CAPACITY: usize = 4;

    /// Render thread frame budget (~60 fps)
    pub const FRAME_BUDGET_MS: u64 = 16;
    /// Largest delta a single tick will integrate
    pub const MAX_FRAME_DELTA_MS: f32 = 100.0;

    /// Actor sprite size
    pub const ACTOR_WIDTH_DP: f32 = 34.0;
    pub const ACTOR_HEIGHT_DP: f32 = 24.0;
    /// Hitbox inset on every side, forgives near misses
    pub const ACTOR_BORDER_DP: f32 = 7.0;
    /// Vertical velocity set by a flap
    pub const LAUNCH_VELOCITY: f32 = 2.4;
    /// Velocity lost per wall-clock millisecond while under control
    pub const GRAVITY_PER_MS: f32 = 0.0075;
    /// Velocity an obstacle hit clamps down to
    pub const BOUNCE_VELOCITY: f32 = -1.0;
    /// Length of one wing animation frame (scaled ms)
    pub const WING_FRAME: f32 = 50.0;

    /// Barrier width
    pub const OBSTACLE_WIDTH_DP: f32 = 52.0;
    /// Height of the opening between the two barriers
    pub const GAP_HEIGHT_DP: f32 = 100.0;
    /// Obstacle scroll speed (negative, obstacles move left)
    pub const OBSTACLE_SPEED: f32 = -1.0;

    /// Fraction of the screen height above the ground line
    pub const GROUND_FRACTION: f32 = 0.85;
    /// Grass texture tile width
    pub const GRASS_TILE_DP: f32 = 24.0;
    pub const GRASS_SPEED: f32 = -1.0;

    /// Plane sprite size
    pub const PLANE_WIDTH_DP: f32 = 60.0;
    pub const PLANE_HEIGHT_DP: f32 = 20.0;
    /// The higher, the slower the plane flies
    pub const PLANE_SLOWNESS: f32 = 6.0;
    pub const PLANE_FRAME: f32 = 80.0;

    /// Fireworks sprite
    pub const FIREWORKS_SIZE_DP: f32 = 96.0;
    pub const FIREWORKS_FRAMES: u32 = 5;
    pub const FIREWORKS_FRAME: f32 = 120.0;
}

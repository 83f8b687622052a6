//! The player-controlled actor

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// The actor flies at a fixed x; only its altitude changes.
///
/// Velocity is positive upward while `y` grows downward, so a position step
/// subtracts `velocity * scaled_dt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Hitbox inset
    pub border: f32,
    pub velocity: f32,
    /// False until the match starts; without control there is no gravity
    pub under_control: bool,
    /// Sprite rotation in degrees (positive = nose down)
    pub tilt: f32,
    /// Current wing animation frame (0..3)
    pub wing_frame: u8,
    wing_timer: f32,
    screen_width: f32,
    floor: f32,
}

impl Actor {
    pub fn new(density: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: ACTOR_WIDTH_DP * density,
            height: ACTOR_HEIGHT_DP * density,
            border: ACTOR_BORDER_DP * density,
            velocity: 0.0,
            under_control: false,
            tilt: 0.0,
            wing_frame: 0,
            wing_timer: 0.0,
            screen_width: 0.0,
            floor: 0.0,
        }
    }

    /// `floor` is the ground line, the bottom of the playable area
    pub fn set_screen_dimensions(&mut self, width: f32, floor: f32) {
        self.screen_width = width;
        self.floor = floor;
        self.x = width / 3.0;
        self.y = floor / 2.0;
    }

    /// Back to the idle hover position
    pub fn reset(&mut self) {
        self.under_control = false;
        self.velocity = 0.0;
        self.tilt = 0.0;
        self.x = self.screen_width / 3.0;
        self.y = self.floor / 2.0;
    }

    /// Stop falling and hover where we are
    pub fn idle(&mut self) {
        self.under_control = false;
        self.velocity = 0.0;
        self.tilt = 0.0;
    }

    /// Flap: hand control to the player and kick upward
    pub fn fly(&mut self) {
        self.under_control = true;
        self.velocity = LAUNCH_VELOCITY;
    }

    /// The actor is alive while its bottom edge is above the floor
    pub fn is_alive(&self) -> bool {
        self.y < self.floor - self.height
    }

    /// Lowest y the actor may occupy
    pub fn floor_y(&self) -> f32 {
        self.floor - self.height
    }

    /// X used for the scoring test (left edge of the hitbox)
    pub fn scoring_x(&self) -> f32 {
        self.x + self.border
    }

    /// Collision rectangle, inset by the border
    pub fn hitbox(&self) -> Rect {
        Rect::from_origin_size(Vec2::new(self.x, self.y), Vec2::new(self.width, self.height))
            .inset(self.border)
    }

    /// Test against a barrier; a hit clamps velocity to the bounce value
    pub fn intersect(&mut self, barrier: &Rect) -> bool {
        let hit = self.hitbox().intersects(barrier);
        if hit && self.velocity > BOUNCE_VELOCITY {
            self.velocity = BOUNCE_VELOCITY;
        }
        hit
    }

    /// Integrate one tick
    ///
    /// `delta_ms` is wall-clock time, `scaled_dt` is the same time multiplied
    /// by the game speed.
    pub fn step(&mut self, delta_ms: f32, scaled_dt: f32) {
        self.animate(scaled_dt);

        self.y -= self.velocity * scaled_dt;
        if self.y > self.floor_y() {
            self.y = self.floor_y();
        }

        if self.under_control {
            self.velocity -= GRAVITY_PER_MS * delta_ms;
        }
    }

    fn animate(&mut self, scaled_dt: f32) {
        self.tilt = if !self.under_control {
            0.0
        } else if self.velocity >= -0.4 {
            -30.0
        } else {
            (-self.velocity * 30.0 - 32.0).min(90.0)
        };

        self.wing_timer += scaled_dt;
        if self.wing_timer > WING_FRAME * 3.0 {
            self.wing_timer = 0.0;
        }
        self.wing_frame = (self.wing_timer / WING_FRAME).min(2.0) as u8;
    }
}

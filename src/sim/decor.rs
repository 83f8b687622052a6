//! Decorative scenery: scrolling grass, a plane and the victory fireworks
//!
//! None of this affects gameplay, but it animates in every phase except
//! Initializing and Paused.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Sky plus a grass strip that scrolls with the obstacles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Background {
    /// Grass texture offset in `[0, tile)`
    pub grass_offset: f32,
    pub tile: f32,
    pub width: f32,
    pub height: f32,
    /// Ground line
    pub floor: f32,
}

impl Background {
    pub fn new(density: f32) -> Self {
        Self {
            grass_offset: 0.0,
            tile: GRASS_TILE_DP * density,
            width: 0.0,
            height: 0.0,
            floor: 0.0,
        }
    }

    /// Returns the ground line for the other objects
    pub fn set_screen_dimensions(&mut self, width: f32, height: f32) -> f32 {
        self.width = width;
        self.height = height;
        self.floor = (height * GROUND_FRACTION).floor();
        self.floor
    }

    pub fn step(&mut self, scaled_dt: f32) {
        // Wrap so the offset never grows without bound
        self.grass_offset = (self.grass_offset + scaled_dt * GRASS_SPEED).rem_euclid(self.tile);
    }
}

/// A plane crossing the sky back and forth
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plane {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub flying_from_right: bool,
    pub frame: u8,
    timer: f32,
    screen_width: f32,
    floor: f32,
}

impl Plane {
    pub fn new(density: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: PLANE_WIDTH_DP * density,
            height: PLANE_HEIGHT_DP * density,
            flying_from_right: true,
            frame: 0,
            timer: 0.0,
            screen_width: 0.0,
            floor: 0.0,
        }
    }

    /// Starts well off screen on the right
    pub fn set_screen_dimensions(&mut self, width: f32, floor: f32) {
        self.screen_width = width;
        self.floor = floor;
        self.flying_from_right = true;
        self.x = width * 2.0;
        self.y = floor / 4.0;
    }

    pub fn step<R: Rng>(&mut self, scaled_dt: f32, rng: &mut R) {
        // Further away on the way back, so slower
        if self.flying_from_right {
            self.x -= scaled_dt * 1.1 / PLANE_SLOWNESS;
        } else {
            self.x += scaled_dt * 0.95 / PLANE_SLOWNESS;
        }

        self.timer += scaled_dt;
        if self.timer > PLANE_FRAME * 3.0 {
            self.timer = 0.0;
        }
        self.frame = (self.timer / PLANE_FRAME).min(2.0) as u8;

        let turn = if self.flying_from_right {
            self.x + self.width < -self.screen_width / 2.0
        } else {
            self.x > self.screen_width * 4.0 / 3.0
        };
        if turn {
            self.flying_from_right = !self.flying_from_right;
            self.y = self.floor / 10.0 + rng.random::<f32>() * self.floor / 2.0;
        }
    }
}

/// Victory animation shown when the record was beaten
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fireworks {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub frame: u32,
    timer: f32,
}

impl Fireworks {
    pub fn new(density: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            size: FIREWORKS_SIZE_DP * density,
            frame: 0,
            timer: 0.0,
        }
    }

    /// Bottom-right corner of the playable area
    pub fn set_screen_dimensions(&mut self, width: f32, floor: f32) {
        self.x = width - self.size;
        self.y = floor - self.size;
    }

    pub fn reset(&mut self) {
        self.timer = 0.0;
        self.frame = 0;
    }

    /// The first frame plays once; afterwards frames 1..5 loop
    pub fn step(&mut self, scaled_dt: f32) {
        self.timer += scaled_dt;
        if self.timer > FIREWORKS_FRAME * FIREWORKS_FRAMES as f32 {
            self.timer = FIREWORKS_FRAME;
        }
        self.frame = ((self.timer / FIREWORKS_FRAME) as u32).min(FIREWORKS_FRAMES - 1);
    }
}

//! Obstacles: a pair of barriers with an opening between them

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::collision::Rect;
use crate::consts::*;

/// A top and a bottom barrier sharing the same x, with a gap in between.
///
/// Obstacles are recycled, never dropped: `reset` puts one back at the right
/// edge of the screen with a fresh gap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left (leading) edge
    pub x: f32,
    pub width: f32,
    /// Bottom of the top barrier
    pub gap_top: f32,
    pub gap_height: f32,
    /// Latched once the actor has crossed the trailing edge
    pub passed: bool,
    screen_width: f32,
    floor: f32,
}

impl Obstacle {
    pub fn new(density: f32) -> Self {
        Self {
            x: 0.0,
            width: OBSTACLE_WIDTH_DP * density,
            gap_top: 0.0,
            gap_height: GAP_HEIGHT_DP * density,
            passed: false,
            screen_width: 0.0,
            floor: 0.0,
        }
    }

    pub fn set_screen_dimensions(&mut self, width: f32, floor: f32) {
        self.screen_width = width;
        self.floor = floor;
    }

    /// Top of the bottom barrier
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap_height
    }

    /// Trailing (right) edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Move to the right edge with a new random gap
    ///
    /// The gap stays within the middle three quarters of the playable height.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        let min_top = self.floor / 8.0;
        let max_bottom = self.floor * 7.0 / 8.0;
        let range = max_bottom - min_top - self.gap_height;

        self.x = self.screen_width;
        self.gap_top = if range > 0.0 {
            min_top + rng.random_range(0.0..range)
        } else {
            min_top
        };
        self.passed = false;
    }

    pub fn step(&mut self, scaled_dt: f32) {
        self.x += scaled_dt * OBSTACLE_SPEED;
    }

    /// True once the whole obstacle has left the screen on the left
    pub fn is_ready_to_release(&self) -> bool {
        self.right() < 0.0
    }

    /// Award the crossing exactly once per activation
    pub fn check_scored(&mut self, actor_x: f32) -> bool {
        if !self.passed && actor_x > self.right() {
            self.passed = true;
            return true;
        }
        false
    }

    /// The two barrier rectangles; the top one extends far above the screen
    pub fn barriers(&self) -> [Rect; 2] {
        [
            Rect::new(self.x, f32::MIN, self.right(), self.gap_top),
            Rect::new(self.x, self.gap_bottom(), self.right(), self.floor),
        ]
    }

    /// Test both barriers against the actor, top first
    pub fn check_collision(&self, actor: &mut Actor) -> bool {
        let [top, bottom] = self.barriers();
        actor.intersect(&top) || actor.intersect(&bottom)
    }
}

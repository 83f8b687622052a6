//! Fixed-size obstacle pool
//!
//! Obstacles are allocated once and move between a free queue and an active
//! queue. The active queue is ordered by spawn time, so its front is always
//! the leftmost obstacle on screen.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstaclePool {
    free: VecDeque<Obstacle>,
    active: VecDeque<Obstacle>,
}

impl ObstaclePool {
    pub fn new(capacity: usize, density: f32) -> Self {
        Self {
            free: (0..capacity).map(|_| Obstacle::new(density)).collect(),
            active: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.free.len() + self.active.len()
    }

    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn active(&self) -> impl Iterator<Item = &Obstacle> {
        self.active.iter()
    }

    pub fn active_mut(&mut self) -> impl Iterator<Item = &mut Obstacle> {
        self.active.iter_mut()
    }

    pub fn set_screen_dimensions(&mut self, width: f32, floor: f32) {
        for obstacle in self.free.iter_mut().chain(self.active.iter_mut()) {
            obstacle.set_screen_dimensions(width, floor);
        }
    }

    /// Activate one free obstacle at the right edge
    ///
    /// Returns false when the free queue is exhausted; the spawn is skipped.
    pub fn spawn<R: Rng>(&mut self, rng: &mut R) -> bool {
        match self.free.pop_front() {
            Some(mut obstacle) => {
                obstacle.reset(rng);
                self.active.push_back(obstacle);
                true
            }
            None => false,
        }
    }

    /// Return obstacles that scrolled off the left edge to the free queue
    pub fn release_offscreen(&mut self) -> usize {
        let mut released = 0;
        while self
            .active
            .front()
            .is_some_and(Obstacle::is_ready_to_release)
        {
            if let Some(obstacle) = self.active.pop_front() {
                self.free.push_back(obstacle);
                released += 1;
            }
        }
        released
    }

    /// Return every active obstacle to the free queue
    pub fn flush(&mut self) {
        self.free.extend(self.active.drain(..));
    }
}

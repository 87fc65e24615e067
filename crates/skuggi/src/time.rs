//! Frame clock.
//!
//! Two instants of state: when the app started and when the previous frame
//! began. The window loop calls [`Time::tick`] once per frame; game code
//! reads the delta during [`Game::update`](crate::app::Game::update) to
//! drive movement and the shared animation clock.

use std::time::Instant;

/// Per-frame timing, ticked by the window loop.
#[derive(Debug, Clone, Copy)]
pub struct Time {
    started: Instant,
    last_frame: Instant,
    delta: f32,
}

impl Time {
    pub(crate) fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_frame: now,
            delta: 0.0,
        }
    }

    pub(crate) fn tick(&mut self) {
        let now = Instant::now();
        self.delta = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
    }

    /// Seconds the previous frame took.
    pub fn delta_secs(&self) -> f32 {
        self.delta
    }

    /// Seconds since the app started.
    pub fn elapsed_secs(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }

    /// Estimated FPS from the last frame's delta.
    pub fn fps(&self) -> f32 {
        if self.delta > 0.0 { 1.0 / self.delta } else { 0.0 }
    }
}

//! Animation — the frame clock behind sprite columns.
//!
//! A sprite's animation frames are consecutive columns on its sheet. The
//! [`AnimationPlayer`] is the clock that picks the column: it accumulates
//! real time and advances a monotonic frame counter, wrapping at the sprite's
//! frame count. The renderer never touches time itself — it just reads
//! whatever frame the player is on, so a paused game renders a frozen frame
//! for free.

/// Drives one sprite's frame counter. Advance with [`advance`](Self::advance)
/// once per update tick.
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    /// Seconds per frame.
    pub frame_time: f32,
    /// Accumulated time within the current frame.
    timer: f32,
    frame: u32,
}

impl AnimationPlayer {
    pub fn new(frame_time: f32) -> Self {
        Self {
            frame_time,
            timer: 0.0,
            frame: 0,
        }
    }

    /// A player that never advances; frame stays 0.
    pub fn still() -> Self {
        Self::new(f32::INFINITY)
    }

    /// Current frame index in `[0, frame_count)`.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Accumulate `dt` seconds, stepping and wrapping the frame counter.
    ///
    /// A `frame_time` that is not finite and positive never advances — the
    /// sprite stays frozen on its current frame.
    pub fn advance(&mut self, dt: f32, frame_count: u32) {
        if frame_count <= 1 || !self.frame_time.is_finite() || self.frame_time <= 0.0 {
            return;
        }
        self.timer += dt;
        while self.timer >= self.frame_time {
            self.timer -= self.frame_time;
            self.frame = (self.frame + 1) % frame_count;
        }
    }

    /// Restart from frame 0.
    pub fn reset(&mut self) {
        self.timer = 0.0;
        self.frame = 0;
    }
}

//! # Frame Clock
//!
//! Fixed-cadence frame pacing at 60Hz by default.
//!
//! ## Design
//!
//! - `tick` marks the start of a frame and returns the time since the last one
//! - `wait_for_next_frame` sleeps until one budget after that start
//! - A frame that overruns its budget gets no sleep and no catch-up: the next
//!   frame simply starts late and sees a larger delta

use std::time::{Duration, Instant};

use tracing::warn;

/// Default frame rate.
pub const DEFAULT_FPS: u32 = 60;

/// Fixed-cadence frame clock.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Target frame duration.
    frame_duration: Duration,
    /// Start of the current frame.
    frame_start: Instant,
    /// Frames started.
    frame_count: u64,
    /// Frames that finished after their budget.
    late_frames: u64,
}

impl FrameClock {
    /// Creates a clock for the given frame rate. A rate of zero is treated as one.
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let frame_duration = Duration::from_micros(1_000_000 / u64::from(target_fps.max(1)));

        Self {
            frame_duration,
            frame_start: Instant::now(),
            frame_count: 0,
            late_frames: 0,
        }
    }

    /// Starts a new frame and returns the time elapsed since the previous start.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let delta = now.duration_since(self.frame_start);
        self.frame_start = now;
        self.frame_count += 1;
        delta
    }

    /// Sleeps until the current frame's budget is spent.
    ///
    /// Returns immediately if the budget is already exceeded.
    pub fn wait_for_next_frame(&mut self) {
        let elapsed = self.frame_start.elapsed();

        if elapsed < self.frame_duration {
            std::thread::sleep(self.frame_duration - elapsed);
            return;
        }

        self.late_frames += 1;
        if elapsed > self.frame_duration * 2 {
            warn!(
                frame = self.frame_count,
                elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                budget_ms = self.frame_duration.as_secs_f64() * 1000.0,
                "frame exceeded budget"
            );
        }
    }

    /// Returns the target frame duration.
    #[must_use]
    pub const fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Returns the time since the current frame started.
    #[must_use]
    pub fn frame_elapsed(&self) -> Duration {
        self.frame_start.elapsed()
    }

    /// Returns the number of frames started.
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Returns the number of frames that overran their budget.
    #[must_use]
    pub const fn late_frames(&self) -> u64 {
        self.late_frames
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

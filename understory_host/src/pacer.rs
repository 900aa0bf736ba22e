// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame pacing against a caller-supplied clock.
//!
//! ## Overview
//!
//! [`FramePacer`] answers one question per poll: how many frames became due
//! since the last poll? Frames are counted from an anchor time, so a late
//! poll reports every frame it missed rather than drifting.
//!
//! Time is a monotonic [`Duration`] since any fixed origin the caller likes
//! (process start, an `Instant` baseline, a test counter). The pacer never
//! reads a clock itself.
//!
//! ```
//! use core::time::Duration;
//! use understory_host::FramePacer;
//!
//! let mut pacer = FramePacer::new(10);
//! assert_eq!(pacer.frames_due(Duration::from_millis(500)), 0, "inactive");
//!
//! pacer.set_active(true, Duration::from_millis(1_000));
//! assert_eq!(pacer.frames_due(Duration::from_millis(1_050)), 0);
//! assert_eq!(pacer.frames_due(Duration::from_millis(1_100)), 1);
//! assert_eq!(pacer.frames_due(Duration::from_millis(1_420)), 3);
//! ```

use core::time::Duration;

/// Frame rate a [`Host`](crate::Host) starts with.
pub const DEFAULT_FPS: u32 = 60;

/// Counts due frames at a fixed rate from an anchor time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FramePacer {
    fps: u32,
    active: bool,
    start: Duration,
    frames_elapsed: u64,
}

impl FramePacer {
    /// Create an inactive pacer running at `fps` once started.
    pub fn new(fps: u32) -> Self {
        Self {
            fps,
            active: false,
            start: Duration::ZERO,
            frames_elapsed: 0,
        }
    }

    /// Frames per second.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Change the rate.
    ///
    /// The anchor is kept, so the frame count is recomputed from the original
    /// start at the new rate. Lowering the rate can therefore yield no frames
    /// until the new count catches up with the frames already delivered.
    pub fn set_fps(&mut self, fps: u32) {
        self.fps = fps;
    }

    /// Returns true while the pacer schedules frames.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Frames delivered since the pacer was last started.
    pub fn frames_elapsed(&self) -> u64 {
        self.frames_elapsed
    }

    /// Start or stop scheduling.
    ///
    /// Starting re-anchors at `now` and zeroes the frame count, even when
    /// already active. Stopping ignores `now`.
    pub fn set_active(&mut self, active: bool, now: Duration) {
        self.active = active;
        if active {
            self.start = now;
            self.frames_elapsed = 0;
        }
    }

    /// Number of frames that became due since the previous call.
    ///
    /// Always 0 while inactive, at 0 fps, or if `now` is before the anchor.
    pub fn frames_due(&mut self, now: Duration) -> u64 {
        if !self.active || self.fps == 0 {
            return 0;
        }
        let elapsed = now.saturating_sub(self.start);
        let total = elapsed.as_nanos() * u128::from(self.fps) / Duration::from_secs(1).as_nanos();
        let total = u64::try_from(total).unwrap_or(u64::MAX);
        let due = total.saturating_sub(self.frames_elapsed);
        self.frames_elapsed = self.frames_elapsed.max(total);
        if due > 1 {
            log::debug!("frame pacer at {} fps: {} frames due, coalescing", self.fps, due);
        }
        due
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

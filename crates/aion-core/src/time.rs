// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Frame timing: measured deltas with an absolute ceiling and a time scale.

use std::time::Instant;

/// Absolute ceiling applied to a measured frame delta, in seconds.
///
/// Bounds the worst-case simulation step after a stall (debugger pause,
/// suspended process, long GC in an embedded script runtime). The ceiling is
/// applied before the time scale.
pub const MAX_FRAME_DELTA_SECONDS: f32 = 0.1;

/// The delta produced by one [`FrameClock`] tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameDelta {
    /// Measured wall-clock delta, clamped to `[0, MAX_FRAME_DELTA_SECONDS]`.
    pub clamped: f32,
    /// The clamped delta multiplied by the clock's time scale. This is the
    /// value fed to variable-step updates.
    pub seconds: f32,
}

/// Tracks elapsed real time between frames.
///
/// The first tick reports a zero delta: `last_timestamp` is seeded on that
/// tick rather than at construction, so time spent between construction and
/// the first frame never reaches the simulation.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_timestamp: Option<Instant>,
    time_scale: f32,
}

impl FrameClock {
    /// Creates a clock with a time scale of `1.0`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_timestamp: None,
            time_scale: 1.0,
        }
    }

    /// Advances the clock to the current instant and returns the frame delta.
    pub fn tick(&mut self) -> FrameDelta {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to an explicit instant and returns the frame delta.
    ///
    /// The delta is clamped to `[0, MAX_FRAME_DELTA_SECONDS]` before the time
    /// scale is applied.
    pub fn tick_at(&mut self, now: Instant) -> FrameDelta {
        let raw = match self.last_timestamp {
            Some(prev) => now.saturating_duration_since(prev).as_secs_f32(),
            None => 0.0,
        };
        self.last_timestamp = Some(now);

        let clamped = raw.min(MAX_FRAME_DELTA_SECONDS);
        FrameDelta {
            clamped,
            seconds: clamped * self.time_scale,
        }
    }

    /// Sets the time scale. Negative values are clamped to zero; `0.0` pauses
    /// simulation while frames keep rendering, values above `1.0`
    /// fast-forward.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// The current time scale.
    #[must_use]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

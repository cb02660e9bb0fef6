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

//! The frame scheduler: one tick per host redraw, fixed phase order.
//!
//! Per tick: clamp and scale the measured delta, run fixed-step, variable,
//! and post-update passes over all systems in registration order, publish
//! the update notification, poll input, synchronize the hierarchy once,
//! render every enabled camera in registration order, then re-arm by
//! requesting the next redraw. Errors raised by the graphics device
//! propagate; the scheduler performs no partial-tick rollback.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

use aion_core::event::EventBus;
use aion_core::graphics::GraphicsDevice;
use aion_core::platform::{HostWindow, InputPoller};
use aion_core::scene::Scene;
use aion_core::system::SystemRegistry;
use aion_core::time::FrameClock;

use crate::notify::AppNotification;

/// The constant simulation step fed to deterministic systems, independent of
/// measured frame time.
pub const FIXED_STEP_SECONDS: f32 = 1.0 / 60.0;

/// Cooperative stop signal, honored at the top of each tick.
///
/// Stopping never interrupts a tick in progress; phase ordering within a
/// tick is unconditional.
#[derive(Debug, Clone, Default)]
pub struct StopToken(Arc<AtomicBool>);

impl StopToken {
    /// Creates a token in the running state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that the scheduler stop before its next tick.
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether a stop has been requested.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Everything one tick touches, borrowed from the application.
pub struct TickContext<'a> {
    /// Component systems, walked in registration order.
    pub systems: &'a mut SystemRegistry,
    /// The active scene.
    pub scene: &'a mut Scene,
    /// The drawing surface.
    pub graphics: &'a dyn GraphicsDevice,
    /// Bus carrying the per-frame update notification.
    pub notifications: &'a EventBus<AppNotification>,
    /// Input devices that need explicit stepping, if any.
    pub input: Option<&'a mut (dyn InputPoller + 'static)>,
    /// The host surface to re-arm for the next refresh, if any.
    pub window: Option<&'a dyn HostWindow>,
}

/// Drives the perpetual update/render cycle.
pub struct FrameScheduler {
    clock: FrameClock,
    stop: StopToken,
    started: bool,
    frame_number: u64,
    last_delta: f32,
}

impl FrameScheduler {
    /// Creates a scheduler that has not started ticking.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: FrameClock::new(),
            stop: StopToken::new(),
            started: false,
            frame_number: 0,
            last_delta: 0.0,
        }
    }

    /// Starts the cycle and requests the first redraw. The clock seeds on
    /// the first tick, so time spent before it never reaches the simulation.
    pub fn start(&mut self, window: Option<&dyn HostWindow>) {
        self.started = true;
        if let Some(window) = window {
            window.request_redraw();
        }
        log::info!("Frame scheduler started");
    }

    /// Whether [`start`](FrameScheduler::start) has been called and no stop
    /// was requested.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.started && !self.stop.is_stopped()
    }

    /// A clonable handle that stops the cycle from outside.
    #[must_use]
    pub fn stop_token(&self) -> StopToken {
        self.stop.clone()
    }

    /// Frames ticked since start.
    #[must_use]
    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// The delta fed to variable-step updates on the most recent tick.
    #[must_use]
    pub fn last_delta(&self) -> f32 {
        self.last_delta
    }

    /// Scales simulation time. Zero pauses simulation while rendering
    /// continues; values above one fast-forward.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.clock.set_time_scale(scale);
    }

    /// Runs one tick at the current instant.
    pub fn tick(&mut self, ctx: TickContext<'_>) -> Result<()> {
        self.tick_at(Instant::now(), ctx)
    }

    /// Runs one tick at an explicit instant.
    ///
    /// A no-op before [`start`](FrameScheduler::start) or after the stop
    /// token fires.
    pub fn tick_at(&mut self, now: Instant, ctx: TickContext<'_>) -> Result<()> {
        if !self.started || self.stop.is_stopped() {
            return Ok(());
        }

        let delta = self.clock.tick_at(now);
        let dt = delta.seconds;
        self.frame_number += 1;
        self.last_delta = dt;

        for system in ctx.systems.iter_mut() {
            system.fixed_update(FIXED_STEP_SECONDS);
        }
        for system in ctx.systems.iter_mut() {
            system.update(dt);
        }
        for system in ctx.systems.iter_mut() {
            system.post_update(dt);
        }

        ctx.notifications.publish(AppNotification::Update { dt });

        if let Some(input) = ctx.input {
            input.poll();
        }

        ctx.scene.sync_hierarchy();
        let scene: &Scene = ctx.scene;
        for camera in scene.cameras() {
            if !camera.enabled {
                continue;
            }
            ctx.graphics.begin_frame(camera)?;
            ctx.graphics.render_scene(scene, camera)?;
            ctx.graphics.end_frame(camera)?;
        }

        if let Some(window) = ctx.window {
            window.request_redraw();
        }

        Ok(())
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

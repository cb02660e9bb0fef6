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

//! Host platform contracts: the window surface and the events it emits.
//!
//! Any windowing backend can implement [`HostWindow`]; the runtime never
//! touches the backend directly. Host-side happenings reach the runtime as
//! [`HostEvent`] values on an event bus, so the runtime stays purely reactive
//! (no polling of host state).

/// An event originating from the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// The window's inner size changed.
    Resized {
        /// New inner width in physical pixels.
        width: u32,
        /// New inner height in physical pixels.
        height: u32,
    },
    /// The surface became visible or hidden (tab switch, minimize,
    /// occlusion). Drives audio suspension, never the scheduler.
    VisibilityChanged {
        /// `true` when the surface is visible again.
        visible: bool,
    },
    /// A fullscreen transition settled, in either direction.
    FullscreenChanged {
        /// `true` when the surface is now fullscreen.
        fullscreen: bool,
    },
    /// The host asks for a frame. The scheduler ticks once per such event
    /// and re-arms itself by requesting the next redraw.
    RedrawRequested,
}

/// A window surface provided by the host platform.
///
/// Implementations wrap whatever the backend offers (a winit window, a test
/// double) behind the narrow set of operations the runtime needs.
pub trait HostWindow: Send + Sync {
    /// Physical inner dimensions of the surface, `(width, height)`.
    fn inner_size(&self) -> (u32, u32);

    /// Display scale factor of the surface.
    fn scale_factor(&self) -> f64 {
        1.0
    }

    /// Requests that the host deliver a [`HostEvent::RedrawRequested`] at the
    /// next display refresh. The scheduler never sleeps or busy-waits;
    /// suspension between ticks belongs to the host.
    fn request_redraw(&self);

    /// Asks the host to enter or leave fullscreen. The transition is
    /// asynchronous; completion arrives as [`HostEvent::FullscreenChanged`].
    fn set_fullscreen(&self, fullscreen: bool);

    /// Whether the surface is currently fullscreen.
    fn is_fullscreen(&self) -> bool;

    /// Requests a new displayed size for the surface, in physical pixels.
    fn set_display_size(&self, width: u32, height: u32);

    /// A stable identifier for this surface, used as the application
    /// registry key.
    fn id(&self) -> u64;
}

/// Per-frame polling hook for input devices that need explicit stepping
/// (gamepads). Polled once per tick, after the update notification.
pub trait InputPoller: Send {
    /// Steps the device state once.
    fn poll(&mut self);
}

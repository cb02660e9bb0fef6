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

//! Canvas fill-mode and resolution-mode policy.
//!
//! The displayed size (what the host shows) and the backing resolution (what
//! is rendered into) are adapted independently: fill mode decides the
//! displayed size from the window bounds, resolution mode decides whether
//! the backing resolution follows it or stays fixed. Fullscreen transitions
//! are asynchronous and host-mediated; completion is observed through a
//! one-shot, self-removing subscription to the host's mode-change event.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use aion_core::graphics::GraphicsDevice;
use aion_core::platform::HostWindow;

/// Fallback dimensions when neither the device nor the host reports a size.
const DEFAULT_WIDTH: u32 = 1280;
const DEFAULT_HEIGHT: u32 = 720;

/// How the displayed canvas size tracks the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    /// The displayed size is whatever was explicitly requested.
    None,
    /// The displayed size tracks the window bounds; aspect changes freely.
    FillWindow,
    /// The displayed size is the largest window-fitting rectangle with the
    /// backing resolution's aspect ratio.
    #[default]
    KeepAspect,
}

/// Whether the backing resolution tracks the displayed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMode {
    /// Backing resolution is recomputed to match the displayed size on every
    /// resize.
    #[default]
    Auto,
    /// Backing resolution only changes through an explicit
    /// [`set_resolution`](ViewportAdapter::set_resolution).
    Fixed,
}

/// The resolved policy state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportPolicy {
    /// Current fill mode.
    pub fill_mode: FillMode,
    /// Current resolution mode.
    pub resolution_mode: ResolutionMode,
    /// Backing resolution width, in pixels.
    pub canvas_width: u32,
    /// Backing resolution height, in pixels.
    pub canvas_height: u32,
}

/// The displayed size computed by a resize, in physical pixels.
///
/// Kept fractional so aspect-preserving modes round only at the edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplaySize {
    /// Displayed width.
    pub width: f32,
    /// Displayed height.
    pub height: f32,
}

/// Callback for a settled fullscreen transition.
pub type FullscreenSuccess = Box<dyn FnOnce() + Send>;
/// Callback for a failed or unsupported fullscreen transition.
pub type FullscreenError = Box<dyn FnOnce(String) + Send>;

struct FullscreenRequest {
    entering: bool,
    on_success: Option<FullscreenSuccess>,
    on_error: Option<FullscreenError>,
}

/// Maintains the viewport policy and applies it to the graphics device and
/// the host window.
pub struct ViewportAdapter {
    policy: ViewportPolicy,
    display_width: f32,
    display_height: f32,
    device: Arc<dyn GraphicsDevice>,
    window: Option<Arc<dyn HostWindow>>,
    pending_fullscreen: Option<FullscreenRequest>,
}

impl ViewportAdapter {
    /// Creates an adapter seeded from the device's current backing
    /// resolution.
    #[must_use]
    pub fn new(device: Arc<dyn GraphicsDevice>, window: Option<Arc<dyn HostWindow>>) -> Self {
        let (mut width, mut height) = device.canvas_size();
        if width == 0 || height == 0 {
            width = DEFAULT_WIDTH;
            height = DEFAULT_HEIGHT;
        }
        Self {
            policy: ViewportPolicy {
                fill_mode: FillMode::default(),
                resolution_mode: ResolutionMode::default(),
                canvas_width: width,
                canvas_height: height,
            },
            display_width: width as f32,
            display_height: height as f32,
            device,
            window,
            pending_fullscreen: None,
        }
    }

    /// Attaches the host window after construction. Hosts that create their
    /// surface late (an event loop that only materializes windows once it is
    /// running) call this before the first resize.
    pub fn attach_window(&mut self, window: Arc<dyn HostWindow>) {
        self.window = Some(window);
    }

    /// The resolved policy state.
    #[must_use]
    pub fn policy(&self) -> ViewportPolicy {
        self.policy
    }

    /// The displayed size from the most recent resize.
    #[must_use]
    pub fn display_size(&self) -> DisplaySize {
        DisplaySize {
            width: self.display_width,
            height: self.display_height,
        }
    }

    /// Switches fill mode, optionally with an explicit displayed size, and
    /// recomputes the viewport.
    pub fn set_fill_mode(
        &mut self,
        mode: FillMode,
        width: Option<u32>,
        height: Option<u32>,
    ) -> DisplaySize {
        self.policy.fill_mode = mode;
        if mode == FillMode::None {
            if let (Some(w), Some(h), Some(window)) = (width, height, self.window.as_ref()) {
                window.set_display_size(w, h);
            }
        }
        self.resize(width, height)
    }

    /// Switches resolution mode.
    ///
    /// `Auto` adopts the current displayed size verbatim as the backing
    /// resolution (explicit dimensions are ignored). `Fixed` applies the
    /// explicit dimensions when both are given and freezes the backing
    /// resolution there.
    pub fn set_resolution(&mut self, mode: ResolutionMode, width: Option<u32>, height: Option<u32>) {
        self.policy.resolution_mode = mode;
        match mode {
            ResolutionMode::Auto => {
                if width.is_some() || height.is_some() {
                    log::debug!("Explicit dimensions ignored in auto resolution mode");
                }
                let w = self.display_width.round() as u32;
                let h = self.display_height.round() as u32;
                self.apply_backing(w, h);
            }
            ResolutionMode::Fixed => {
                if let (Some(w), Some(h)) = (width, height) {
                    self.apply_backing(w, h);
                }
            }
        }
    }

    /// Recomputes the displayed size for the current fill mode, and in auto
    /// resolution mode re-syncs the backing resolution to it.
    ///
    /// The explicit dimensions only matter for [`FillMode::None`], or as
    /// window-bounds fallback when no host window is attached.
    pub fn resize(&mut self, width: Option<u32>, height: Option<u32>) -> DisplaySize {
        let requested = match (width, height) {
            (Some(w), Some(h)) => Some((w as f32, h as f32)),
            _ => None,
        };
        let bounds = self
            .window
            .as_ref()
            .map(|window| {
                let (w, h) = window.inner_size();
                (w as f32, h as f32)
            })
            .or(requested)
            .unwrap_or((self.display_width, self.display_height));

        let (target_w, target_h) = match self.policy.fill_mode {
            FillMode::FillWindow => bounds,
            FillMode::KeepAspect => {
                let backing_w = self.policy.canvas_width as f32;
                let backing_h = self.policy.canvas_height as f32;
                if backing_h <= 0.0 || bounds.1 <= 0.0 {
                    bounds
                } else {
                    let ratio = backing_w / backing_h;
                    let (win_w, win_h) = bounds;
                    if win_w / win_h > ratio {
                        // Height is the limiting dimension.
                        (win_h * ratio, win_h)
                    } else {
                        (win_w, win_w / ratio)
                    }
                }
            }
            FillMode::None => requested.unwrap_or((self.display_width, self.display_height)),
        };

        self.display_width = target_w;
        self.display_height = target_h;

        if self.policy.resolution_mode == ResolutionMode::Auto {
            let w = target_w.round() as u32;
            let h = target_h.round() as u32;
            self.apply_backing(w, h);
        }

        DisplaySize {
            width: target_w,
            height: target_h,
        }
    }

    fn apply_backing(&mut self, width: u32, height: u32) {
        self.policy.canvas_width = width;
        self.policy.canvas_height = height;
        self.device.resize_canvas(width, height);
    }

    /// Asks the host to enter fullscreen. Completion arrives asynchronously
    /// through [`handle_fullscreen_changed`]
    /// (ViewportAdapter::handle_fullscreen_changed); exactly one of the two
    /// callbacks fires, once. A missing host window reports through
    /// `on_error` — host-capability problems never panic or return errors.
    pub fn enable_fullscreen(
        &mut self,
        on_success: Option<FullscreenSuccess>,
        on_error: Option<FullscreenError>,
    ) {
        self.request_fullscreen(true, on_success, on_error);
    }

    /// Asks the host to leave fullscreen. See
    /// [`enable_fullscreen`](ViewportAdapter::enable_fullscreen).
    pub fn disable_fullscreen(&mut self, on_success: Option<FullscreenSuccess>) {
        self.request_fullscreen(false, on_success, None);
    }

    fn request_fullscreen(
        &mut self,
        entering: bool,
        on_success: Option<FullscreenSuccess>,
        on_error: Option<FullscreenError>,
    ) {
        let Some(window) = self.window.as_ref() else {
            if let Some(on_error) = on_error {
                on_error("no host window attached; fullscreen is unavailable".to_string());
            }
            return;
        };

        // A newer request supersedes an unsettled one; the old observer is
        // removed so it can never fire against the new transition.
        if let Some(old) = self.pending_fullscreen.take() {
            if let Some(on_error) = old.on_error {
                on_error("superseded by a newer fullscreen request".to_string());
            }
        }

        self.pending_fullscreen = Some(FullscreenRequest {
            entering,
            on_success,
            on_error,
        });
        window.set_fullscreen(entering);
    }

    /// Settles the pending fullscreen request, if any, against the host's
    /// mode-change notification. The subscription is one-shot: success and
    /// error are mutually exclusive and each removes itself after firing.
    pub fn handle_fullscreen_changed(&mut self, fullscreen: bool) {
        let Some(request) = self.pending_fullscreen.take() else {
            log::debug!("Host-initiated fullscreen change to {fullscreen}");
            return;
        };
        if fullscreen == request.entering {
            if let Some(on_success) = request.on_success {
                on_success();
            }
        } else if let Some(on_error) = request.on_error {
            on_error(format!(
                "fullscreen transition settled at {fullscreen}, expected {}",
                request.entering
            ));
        }
    }

    /// Whether the host surface is currently fullscreen.
    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.window
            .as_ref()
            .map(|window| window.is_fullscreen())
            .unwrap_or(false)
    }
}

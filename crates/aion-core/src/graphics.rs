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

//! The graphics-device contract consumed by the frame scheduler and the
//! viewport adapter.
//!
//! Rendering algorithms are an external collaborator's concern; the runtime
//! only sequences per-camera frames and keeps the backing resolution in sync
//! with the viewport policy.

use anyhow::Result;

use crate::scene::{Camera, Scene};

/// The drawing surface the runtime renders into.
///
/// Implementations use interior mutability; the scheduler holds a shared
/// reference for the lifetime of the application.
pub trait GraphicsDevice: Send + Sync {
    /// Sets the backing resolution, in pixels. Rendering always occurs at
    /// this resolution regardless of the displayed size.
    fn resize_canvas(&self, width: u32, height: u32);

    /// The current backing resolution, `(width, height)`.
    fn canvas_size(&self) -> (u32, u32);

    /// Starts a frame for one camera.
    fn begin_frame(&self, camera: &Camera) -> Result<()>;

    /// Renders the scene from one camera's point of view.
    fn render_scene(&self, scene: &Scene, camera: &Camera) -> Result<()>;

    /// Finishes the frame started for this camera.
    fn end_frame(&self, camera: &Camera) -> Result<()>;
}

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

//! A graphics device that renders nothing.
//!
//! Keeps the backing-resolution bookkeeping honest and counts frames, which
//! is all demos and tools without a GPU backend need.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use anyhow::Result;

use aion_core::graphics::GraphicsDevice;
use aion_core::scene::{Camera, Scene};

/// A [`GraphicsDevice`] with no backend behind it.
pub struct HeadlessGraphicsDevice {
    size: Mutex<(u32, u32)>,
    frames: AtomicU64,
}

impl HeadlessGraphicsDevice {
    /// Creates a device with the given initial backing resolution.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Mutex::new((width, height)),
            frames: AtomicU64::new(0),
        }
    }

    /// Camera frames completed since creation.
    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }
}

impl GraphicsDevice for HeadlessGraphicsDevice {
    fn resize_canvas(&self, width: u32, height: u32) {
        if let Ok(mut size) = self.size.lock() {
            *size = (width, height);
        }
        log::debug!("Backing resolution set to {width}x{height}");
    }

    fn canvas_size(&self) -> (u32, u32) {
        self.size.lock().map(|size| *size).unwrap_or((0, 0))
    }

    fn begin_frame(&self, camera: &Camera) -> Result<()> {
        log::trace!("begin_frame for camera '{}'", camera.name);
        Ok(())
    }

    fn render_scene(&self, _scene: &Scene, camera: &Camera) -> Result<()> {
        log::trace!("render_scene for camera '{}'", camera.name);
        Ok(())
    }

    fn end_frame(&self, camera: &Camera) -> Result<()> {
        log::trace!("end_frame for camera '{}'", camera.name);
        self.frames.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

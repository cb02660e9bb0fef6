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

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use winit::dpi::PhysicalSize;
use winit::window::{Fullscreen, Window};

use aion_core::platform::HostWindow;

/// A wrapper around a winit window implementing the engine's
/// [`HostWindow`] contract.
#[derive(Debug, Clone)]
pub struct WinitHostWindow {
    inner: Arc<Window>,
    id: u64,
}

impl WinitHostWindow {
    /// Wraps a created winit window.
    #[must_use]
    pub fn new(window: Window) -> Self {
        let mut hasher = DefaultHasher::new();
        window.id().hash(&mut hasher);
        let id = hasher.finish();
        Self {
            inner: Arc::new(window),
            id,
        }
    }

    /// The wrapped winit window.
    #[must_use]
    pub fn winit_window(&self) -> &Arc<Window> {
        &self.inner
    }
}

impl HostWindow for WinitHostWindow {
    fn inner_size(&self) -> (u32, u32) {
        let size = self.inner.inner_size();
        (size.width, size.height)
    }

    fn scale_factor(&self) -> f64 {
        self.inner.scale_factor()
    }

    fn request_redraw(&self) {
        self.inner.request_redraw();
    }

    fn set_fullscreen(&self, fullscreen: bool) {
        let mode = fullscreen.then(|| Fullscreen::Borderless(None));
        self.inner.set_fullscreen(mode);
    }

    fn is_fullscreen(&self) -> bool {
        self.inner.fullscreen().is_some()
    }

    fn set_display_size(&self, width: u32, height: u32) {
        let _ = self.inner.request_inner_size(PhysicalSize::new(width, height));
    }

    fn id(&self) -> u64 {
        self.id
    }
}

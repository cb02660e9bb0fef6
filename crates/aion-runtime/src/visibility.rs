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

//! Visibility-driven suspension of audio-producing subsystems.
//!
//! Purely reactive: the host's visibility notification arrives as a
//! [`HostEvent::VisibilityChanged`](aion_core::platform::HostEvent) and is
//! routed here. The frame scheduler itself is never suspended; only the
//! audio system is, through an explicit capability check against the
//! registry.

use aion_core::system::{names, SystemRegistry};

/// Tracks the surface's visibility and suspends/resumes the audio system on
/// transitions.
#[derive(Debug, Default)]
pub struct VisibilitySuspension {
    hidden: bool,
}

impl VisibilitySuspension {
    /// Creates the tracker in the visible state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reacts to a host visibility change. Repeated notifications with the
    /// same state are ignored.
    pub fn handle(&mut self, visible: bool, systems: &mut SystemRegistry) {
        let hidden = !visible;
        if hidden == self.hidden {
            return;
        }
        self.hidden = hidden;

        match systems.get_mut(names::AUDIO) {
            Some(audio) => {
                if hidden {
                    log::info!("Surface hidden; suspending audio");
                    audio.suspend();
                } else {
                    log::info!("Surface visible; resuming audio");
                    audio.resume();
                }
            }
            None => log::debug!("No audio system registered; nothing to suspend"),
        }
    }

    /// Whether the surface is currently hidden.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

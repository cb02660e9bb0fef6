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

use winit::event::WindowEvent;

use aion_core::platform::HostEvent;

/// Translates winit window events into engine host events.
///
/// Winit reports no dedicated fullscreen-change event, so transitions are
/// edge-detected against the window's current mode on each resize — the
/// one-time capability selection the runtime never has to know about.
/// Visibility maps from occlusion, winit's analogue of a hidden surface.
pub struct HostEventPump {
    sender: flume::Sender<HostEvent>,
    last_fullscreen: bool,
}

impl HostEventPump {
    /// Creates a pump publishing into the given channel.
    #[must_use]
    pub fn new(sender: flume::Sender<HostEvent>) -> Self {
        Self {
            sender,
            last_fullscreen: false,
        }
    }

    /// Processes one winit event. `fullscreen_now` is the window's current
    /// fullscreen state, sampled by the caller.
    pub fn process(&mut self, fullscreen_now: bool, event: &WindowEvent) {
        match event {
            WindowEvent::Resized(size) => {
                self.publish(HostEvent::Resized {
                    width: size.width,
                    height: size.height,
                });
                if fullscreen_now != self.last_fullscreen {
                    self.last_fullscreen = fullscreen_now;
                    self.publish(HostEvent::FullscreenChanged {
                        fullscreen: fullscreen_now,
                    });
                }
            }
            WindowEvent::Occluded(occluded) => {
                self.publish(HostEvent::VisibilityChanged {
                    visible: !occluded,
                });
            }
            WindowEvent::RedrawRequested => {
                self.publish(HostEvent::RedrawRequested);
            }
            _ => {}
        }
    }

    fn publish(&self, event: HostEvent) {
        if let Err(e) = self.sender.send(event) {
            log::error!("Host event dropped: {e}");
        }
    }
}

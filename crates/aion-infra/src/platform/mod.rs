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

//! Winit-backed host platform: the window wrapper, the event pump that
//! translates winit events into engine host events, and the event loop that
//! drives an application's frames.

mod host_loop;
mod pump;
mod window;

pub use host_loop::{HostLoop, HostLoopConfig};
pub use pump::HostEventPump;
pub use window::WinitHostWindow;

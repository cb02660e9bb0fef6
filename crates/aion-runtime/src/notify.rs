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

//! Notifications emitted by the application for external observers
//! (scripts, tooling). Consumed from the application's notification bus;
//! the runtime never blocks on observers.

/// An observable application event.
#[derive(Debug, Clone, PartialEq)]
pub enum AppNotification {
    /// One frame's variable-step update ran with this delta (clamped,
    /// scaled seconds).
    Update {
        /// The frame delta fed to variable-step updates.
        dt: f32,
    },
    /// Preload progress advanced to this fraction of the batch.
    PreloadProgress {
        /// Completed fraction in `[0, 1]`, monotone non-decreasing.
        fraction: f32,
    },
    /// Declared libraries finished loading; queued scene activations may
    /// proceed.
    LibrariesReady,
}

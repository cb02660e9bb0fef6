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

//! # Aion Runtime
//!
//! The orchestration core of the engine: the process-wide lifecycle
//! (configure → preload → scene activation → frame loop), batch resource
//! loading with deterministic settlement, the frame scheduler, and the
//! display adaptation policy. Host integration (windowing, transport) plugs
//! in through the contracts defined in `aion-core`.

pub mod app;
pub mod config;
pub mod frame;
pub mod loader;
pub mod notify;
pub mod viewport;
pub mod visibility;

pub use app::{AppContext, AppRegistry, Application, LifecycleState};
pub use frame::{FrameScheduler, StopToken};
pub use loader::ResourceLoadCoordinator;
pub use notify::AppNotification;
pub use viewport::{FillMode, ResolutionMode, ViewportAdapter};

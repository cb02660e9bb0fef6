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

//! # Aion Infra
//!
//! Concrete implementations of the contracts `aion-core` leaves abstract:
//! a winit-backed host window and event pump, a filesystem-backed fetch, a
//! caching byte loader, and a headless graphics device for demos and tools.

pub mod fetch;
pub mod graphics;
pub mod loader;
pub mod platform;

pub use fetch::FsFetch;
pub use graphics::HeadlessGraphicsDevice;
pub use loader::FetchLoader;
pub use platform::{HostLoop, HostLoopConfig, WinitHostWindow};

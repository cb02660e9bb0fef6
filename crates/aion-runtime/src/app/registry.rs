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

use std::collections::HashMap;

use super::Application;

/// A lookup table of applications keyed by display-surface identifier, with
/// at most one designated as current.
///
/// Owned by the process harness and passed where needed; there is no static
/// registry anywhere in the runtime.
#[derive(Default)]
pub struct AppRegistry {
    apps: HashMap<u64, Application>,
    current: Option<u64>,
}

impl AppRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an application under its surface id. The first registered
    /// application becomes current.
    pub fn register(&mut self, surface: u64, app: Application) {
        if self.apps.insert(surface, app).is_some() {
            log::warn!("Replacing application registered for surface {surface}");
        }
        if self.current.is_none() {
            self.current = Some(surface);
        }
    }

    /// Looks up the application for a surface.
    #[must_use]
    pub fn get(&self, surface: u64) -> Option<&Application> {
        self.apps.get(&surface)
    }

    /// Looks up the application for a surface, mutably.
    pub fn get_mut(&mut self, surface: u64) -> Option<&mut Application> {
        self.apps.get_mut(&surface)
    }

    /// The current application, if one is designated.
    #[must_use]
    pub fn current(&self) -> Option<&Application> {
        self.current.and_then(|surface| self.apps.get(&surface))
    }

    /// The current application, mutably.
    pub fn current_mut(&mut self) -> Option<&mut Application> {
        match self.current {
            Some(surface) => self.apps.get_mut(&surface),
            None => None,
        }
    }

    /// Designates the current application. Returns `false` when no
    /// application is registered for that surface.
    pub fn set_current(&mut self, surface: u64) -> bool {
        if self.apps.contains_key(&surface) {
            self.current = Some(surface);
            true
        } else {
            false
        }
    }

    /// Removes an application, clearing the current designation if it
    /// pointed there.
    pub fn remove(&mut self, surface: u64) -> Option<Application> {
        if self.current == Some(surface) {
            self.current = None;
        }
        self.apps.remove(&surface)
    }

    /// The number of registered applications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.apps.len()
    }

    /// Returns `true` if no applications are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

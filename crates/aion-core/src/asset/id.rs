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

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A globally unique, persistent identifier for a logical asset.
///
/// Ids are derived deterministically (UUID v5) from the asset's source
/// locator, so every part of the runtime that knows the locator agrees on
/// the id without coordination. Random (v4) ids exist for assets created at
/// runtime with no source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(Uuid);

impl AssetId {
    /// Derives the stable id of the asset at `locator`.
    #[must_use]
    pub fn from_locator(locator: &str) -> Self {
        Self(Uuid::new_v5(&Uuid::NAMESPACE_URL, locator.as_bytes()))
    }

    /// Creates a new random id for a runtime-created asset.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AssetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_locator_same_id() {
        let a = AssetId::from_locator("models/ship.glb");
        let b = AssetId::from_locator("models/ship.glb");
        assert_eq!(a, b);
    }

    #[test]
    fn different_locators_differ() {
        let a = AssetId::from_locator("models/ship.glb");
        let b = AssetId::from_locator("models/station.glb");
        assert_ne!(a, b);
    }
}

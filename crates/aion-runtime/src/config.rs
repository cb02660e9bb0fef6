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

//! The application configuration payload.
//!
//! Fetched as bytes by the configure stage and split into display
//! properties, a script preload list, an asset manifest, and a scene-bundle
//! table of contents.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use aion_core::error::ConfigError;
use aion_core::scene::SceneSettings;

use crate::viewport::{FillMode, ResolutionMode};

/// Display properties applied during the configure stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DisplayProperties {
    /// Initial fill mode.
    #[serde(default)]
    pub fill_mode: FillMode,
    /// Initial resolution mode.
    #[serde(default)]
    pub resolution_mode: ResolutionMode,
    /// Explicit displayed width, when the fill mode wants one.
    #[serde(default)]
    pub width: Option<u32>,
    /// Explicit displayed height, when the fill mode wants one.
    #[serde(default)]
    pub height: Option<u32>,
}

/// One asset declared by the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetManifestEntry {
    /// Where the loader fetches the asset from; also the source of its
    /// stable id.
    pub locator: String,
    /// Decoder tag; opaque to the runtime.
    #[serde(default, rename = "type")]
    pub asset_type: Option<String>,
    /// Whether the asset belongs to the preload batch.
    #[serde(default)]
    pub preload: bool,
}

/// A named activation bundle from the table of contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneBundle {
    /// Locators of the assets the bundle needs resident.
    #[serde(default)]
    pub assets: Vec<String>,
    /// Environment settings the bundle applies to the active scene.
    #[serde(default)]
    pub settings: SceneSettings,
}

/// The parsed configuration payload.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Application name; the only property the payload must carry.
    pub name: String,
    /// Display properties.
    pub display: DisplayProperties,
    /// External libraries to load before anything else. A library failing
    /// fails the configure stage.
    pub libraries: Vec<String>,
    /// Scripts to load during preload.
    pub scripts: Vec<String>,
    /// The asset manifest.
    pub assets: Vec<AssetManifestEntry>,
    /// Named scene bundles, keyed by bundle name.
    pub bundles: HashMap<String, SceneBundle>,
}

#[derive(Deserialize)]
struct RawConfig {
    name: Option<String>,
    #[serde(default)]
    display: DisplayProperties,
    #[serde(default)]
    libraries: Vec<String>,
    #[serde(default)]
    scripts: Vec<String>,
    #[serde(default)]
    assets: Vec<AssetManifestEntry>,
    #[serde(default)]
    bundles: HashMap<String, SceneBundle>,
}

impl AppConfig {
    /// Parses a configuration payload.
    pub fn parse(bytes: &[u8]) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            serde_json::from_slice(bytes).map_err(|e| ConfigError::Malformed {
                detail: e.to_string(),
            })?;
        let name = raw.name.ok_or(ConfigError::MissingProperty {
            name: "name".to_string(),
        })?;
        Ok(Self {
            name,
            display: raw.display,
            libraries: raw.libraries,
            scripts: raw.scripts,
            assets: raw.assets,
            bundles: raw.bundles,
        })
    }
}

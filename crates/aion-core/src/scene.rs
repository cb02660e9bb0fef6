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

//! The active scene as the runtime sees it: environment settings, cameras in
//! registration order, and the attachment point for the initial hierarchy.
//!
//! Entity-component storage and per-node data are external collaborators;
//! this type carries only what the lifecycle and the frame scheduler consume.

use serde::{Deserialize, Serialize};

use crate::asset::ResourceHandle;

/// Fog falloff selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FogKind {
    /// No fog.
    #[default]
    None,
    /// Linear falloff between `start` and `end`.
    Linear,
    /// Exponential falloff controlled by `density`.
    Exponential,
}

/// Fog parameters applied to the active scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FogSettings {
    /// Falloff selection.
    pub kind: FogKind,
    /// Fog color, linear RGB.
    pub color: [f32; 3],
    /// Distance where linear fog starts.
    pub start: f32,
    /// Distance where linear fog is fully opaque.
    pub end: f32,
    /// Density for exponential fog.
    pub density: f32,
}

impl Default for FogSettings {
    fn default() -> Self {
        Self {
            kind: FogKind::None,
            color: [0.0, 0.0, 0.0],
            start: 1.0,
            end: 1000.0,
            density: 0.0,
        }
    }
}

/// Environment settings carried by a scene or a scene bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSettings {
    /// Ambient light color, linear RGB.
    #[serde(default = "SceneSettings::default_ambient")]
    pub ambient_light: [f32; 3],
    /// Exposure multiplier applied by the renderer.
    #[serde(default = "SceneSettings::default_exposure")]
    pub exposure: f32,
    /// Fog parameters.
    #[serde(default)]
    pub fog: FogSettings,
    /// Gravity vector consumed by the physics system, when one is
    /// registered.
    #[serde(default)]
    pub gravity: Option<[f32; 3]>,
    /// Locator of the skybox asset, if the bundle declares one.
    #[serde(default)]
    pub skybox: Option<String>,
}

impl SceneSettings {
    fn default_ambient() -> [f32; 3] {
        [0.0, 0.0, 0.0]
    }

    fn default_exposure() -> f32 {
        1.0
    }
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            ambient_light: Self::default_ambient(),
            exposure: Self::default_exposure(),
            fog: FogSettings::default(),
            gravity: None,
            skybox: None,
        }
    }
}

/// A render target registered with the scene.
///
/// Cameras render in registration order; no depth or priority reordering is
/// performed by this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Camera {
    /// Display name used for frame labeling.
    pub name: String,
    /// Disabled cameras are skipped by the render phase.
    pub enabled: bool,
}

impl Camera {
    /// Creates an enabled camera.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
        }
    }
}

/// The active scene.
#[derive(Default)]
pub struct Scene {
    /// Environment settings, mutable between ticks by bundle activation.
    pub settings: SceneSettings,
    cameras: Vec<Camera>,
    root_attached: bool,
    skybox: Option<ResourceHandle>,
    hierarchy_dirty: bool,
}

impl Scene {
    /// Creates an empty scene with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the initial hierarchy root under the world root.
    pub fn attach_root(&mut self) {
        self.root_attached = true;
        self.hierarchy_dirty = true;
    }

    /// Whether the initial hierarchy root has been attached.
    #[must_use]
    pub fn root_attached(&self) -> bool {
        self.root_attached
    }

    /// Registers a camera at the end of the render order.
    pub fn add_camera(&mut self, camera: Camera) {
        self.cameras.push(camera);
    }

    /// All registered cameras, in registration order.
    #[must_use]
    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    /// Replaces the environment settings.
    ///
    /// Writers leave the scene consistent after each synchronous mutation;
    /// the scheduler reads the new values on its next tick.
    pub fn apply_settings(&mut self, settings: SceneSettings) {
        self.settings = settings;
    }

    /// Attaches loaded skybox data. Intermediate ticks may render with the
    /// skybox unset while its load is still in flight.
    pub fn set_skybox(&mut self, skybox: ResourceHandle) {
        self.skybox = Some(skybox);
    }

    /// The attached skybox data, once resident.
    #[must_use]
    pub fn skybox(&self) -> Option<&ResourceHandle> {
        self.skybox.as_ref()
    }

    /// Marks the transform hierarchy as needing synchronization.
    pub fn mark_hierarchy_dirty(&mut self) {
        self.hierarchy_dirty = true;
    }

    /// Synchronizes the world-transform hierarchy. Called once per render
    /// phase, before any camera renders.
    pub fn sync_hierarchy(&mut self) {
        self.hierarchy_dirty = false;
    }

    /// Whether the hierarchy has pending transform changes.
    #[must_use]
    pub fn hierarchy_dirty(&self) -> bool {
        self.hierarchy_dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cameras_keep_registration_order() {
        let mut scene = Scene::new();
        scene.add_camera(Camera::new("main"));
        scene.add_camera(Camera::new("ui"));

        let names: Vec<&str> = scene.cameras().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["main", "ui"]);
    }

    #[test]
    fn applying_settings_replaces_environment() {
        let mut scene = Scene::new();
        let settings = SceneSettings {
            ambient_light: [0.1, 0.2, 0.3],
            exposure: 1.5,
            ..SceneSettings::default()
        };
        scene.apply_settings(settings.clone());
        assert_eq!(scene.settings, settings);
    }

    #[test]
    fn attach_root_dirties_hierarchy() {
        let mut scene = Scene::new();
        assert!(!scene.hierarchy_dirty());
        scene.attach_root();
        assert!(scene.root_attached());
        assert!(scene.hierarchy_dirty());

        scene.sync_hierarchy();
        assert!(!scene.hierarchy_dirty());
    }
}

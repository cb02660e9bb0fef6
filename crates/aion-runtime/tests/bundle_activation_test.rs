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

//! Named-bundle activation: latch waiting, environment application, and
//! asynchronous skybox attachment.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use aion_core::asset::{AssetId, ResourceHandle};
use aion_core::error::{FetchError, LoadError};
use aion_core::load::{ResourceKind, ResourceLoader};
use aion_core::net::Fetch;
use aion_core::scene::{Camera, Scene};
use aion_core::system::{names, ComponentSystem};
use aion_runtime::{AppContext, Application};

struct MemFetch {
    payloads: HashMap<String, Vec<u8>>,
}

#[async_trait]
impl Fetch for MemFetch {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.payloads
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                url: url.to_string(),
            })
    }
}

struct EchoLoader;

#[async_trait]
impl ResourceLoader for EchoLoader {
    async fn load(&self, locator: &str, _kind: ResourceKind) -> Result<ResourceHandle, LoadError> {
        Ok(ResourceHandle::new(locator.to_string()))
    }
}

#[derive(Default)]
struct NullDevice;

impl aion_core::graphics::GraphicsDevice for NullDevice {
    fn resize_canvas(&self, _width: u32, _height: u32) {}

    fn canvas_size(&self) -> (u32, u32) {
        (800, 600)
    }

    fn begin_frame(&self, _camera: &Camera) -> Result<()> {
        Ok(())
    }

    fn render_scene(&self, _scene: &Scene, _camera: &Camera) -> Result<()> {
        Ok(())
    }

    fn end_frame(&self, _camera: &Camera) -> Result<()> {
        Ok(())
    }
}

struct GravityRecorder {
    gravity: Option<[f32; 3]>,
}

impl ComponentSystem for GravityRecorder {
    fn name(&self) -> &str {
        names::PHYSICS
    }

    fn set_gravity(&mut self, gravity: [f32; 3]) {
        self.gravity = Some(gravity);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

const CONFIG_URL: &str = "app/config.json";

const TOC_CONFIG: &[u8] = br#"{
    "name": "bundles",
    "assets": [
        { "locator": "cubemaps/known.dds", "preload": false }
    ],
    "bundles": {
        "forest": {
            "assets": ["models/tree.glb", "models/rock.glb"],
            "settings": {
                "ambient_light": [0.2, 0.3, 0.4],
                "gravity": [0.0, -9.8, 0.0],
                "skybox": "cubemaps/unknown.dds"
            }
        },
        "desert": {
            "assets": [],
            "settings": { "skybox": "cubemaps/known.dds" }
        }
    }
}"#;

fn app() -> Application {
    let mut payloads = HashMap::new();
    payloads.insert(CONFIG_URL.to_string(), TOC_CONFIG.to_vec());
    Application::new(AppContext {
        fetch: Arc::new(MemFetch { payloads }),
        loader: Arc::new(EchoLoader),
        graphics: Arc::new(NullDevice),
        window: None,
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn activation_queued_before_libraries_waits_for_the_latch() {
    let mut app = app();

    // Queued before configure() has even run: the future must park on the
    // libraries-loaded latch, not fail.
    let progress = Arc::new(Mutex::new(Vec::new()));
    let observed = progress.clone();
    let pending = tokio::spawn(app.load_from_toc("forest", move |fraction| {
        observed.lock().unwrap().push(fraction);
    }));

    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
    assert!(!pending.is_finished());

    app.configure(CONFIG_URL).await.unwrap();

    let bundle = pending.await.unwrap().unwrap();
    assert_eq!(bundle.assets.len(), 2);

    // Environment settings landed on the active scene.
    let scene = app.scene();
    let scene = scene.lock().unwrap();
    assert_eq!(scene.settings.ambient_light, [0.2, 0.3, 0.4]);

    // Both bundle assets became resident.
    let assets = app.assets();
    let store = assets.lock().unwrap();
    assert!(store.contains(&AssetId::from_locator("models/tree.glb")));
    assert!(store.contains(&AssetId::from_locator("models/rock.glb")));

    let fractions = progress.lock().unwrap().clone();
    assert_eq!(*fractions.last().unwrap(), 1.0);
}

#[tokio::test]
async fn unknown_skybox_attaches_when_the_asset_arrives() {
    let mut app = app();
    app.configure(CONFIG_URL).await.unwrap();

    app.load_from_toc("forest", |_| {}).await.unwrap();

    // The skybox is not in the manifest and not resident: the scene renders
    // without one until the asset shows up.
    {
        let scene = app.scene();
        assert!(scene.lock().unwrap().skybox().is_none());
    }

    app.assets().lock().unwrap().insert(
        AssetId::from_locator("cubemaps/unknown.dds"),
        ResourceHandle::new("sky".to_string()),
    );

    let scene = app.scene();
    let scene = scene.lock().unwrap();
    let skybox = scene.skybox().expect("continuation attached the skybox");
    assert_eq!(skybox.downcast_ref::<String>().map(String::as_str), Some("sky"));
}

#[tokio::test]
async fn manifest_known_skybox_loads_immediately() {
    let mut app = app();
    app.configure(CONFIG_URL).await.unwrap();

    app.load_from_toc("desert", |_| {}).await.unwrap();

    let scene = app.scene();
    let scene = scene.lock().unwrap();
    let skybox = scene.skybox().expect("manifest-known skybox loads inline");
    assert_eq!(
        skybox.downcast_ref::<String>().map(String::as_str),
        Some("cubemaps/known.dds")
    );
}

#[tokio::test]
async fn gravity_reaches_the_physics_system_on_the_next_tick() {
    let mut app = app();
    app.systems_mut()
        .register(Box::new(GravityRecorder { gravity: None }));
    app.configure(CONFIG_URL).await.unwrap();
    app.preload(|_| {}).await.unwrap();
    app.start().unwrap();

    app.load_from_toc("forest", |_| {}).await.unwrap();
    app.tick().unwrap();

    let gravity = app
        .systems_mut()
        .get(names::PHYSICS)
        .and_then(|system| system.as_any().downcast_ref::<GravityRecorder>())
        .and_then(|recorder| recorder.gravity);
    assert_eq!(gravity, Some([0.0, -9.8, 0.0]));
}

#[tokio::test]
async fn unknown_bundle_name_is_an_error() {
    let mut app = app();
    app.configure(CONFIG_URL).await.unwrap();

    let error = app.load_from_toc("swamp", |_| {}).await.unwrap_err();
    assert!(error.to_string().contains("swamp"));
}

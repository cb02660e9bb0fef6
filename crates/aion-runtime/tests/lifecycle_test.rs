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

//! End-to-end lifecycle scenarios: configure → preload → start → tick.

use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;

use aion_core::asset::ResourceHandle;
use aion_core::error::{FetchError, LoadError};
use aion_core::load::{ResourceKind, ResourceLoader};
use aion_core::net::Fetch;
use aion_core::scene::{Camera, Scene};
use aion_core::system::ComponentSystem;
use aion_runtime::{AppContext, AppNotification, Application, LifecycleState};

// --- Test collaborators -------------------------------------------------

struct MemFetch {
    payloads: HashMap<String, Vec<u8>>,
}

impl MemFetch {
    fn single(url: &str, payload: &[u8]) -> Arc<Self> {
        let mut payloads = HashMap::new();
        payloads.insert(url.to_string(), payload.to_vec());
        Arc::new(Self { payloads })
    }
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

/// Resolves every locator immediately, except the ones marked failing.
struct MapLoader {
    failing: HashSet<String>,
    loads: Mutex<Vec<String>>,
}

impl MapLoader {
    fn all_ok() -> Arc<Self> {
        Self::failing(&[])
    }

    fn failing(locators: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            failing: locators.iter().map(|s| s.to_string()).collect(),
            loads: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ResourceLoader for MapLoader {
    async fn load(&self, locator: &str, _kind: ResourceKind) -> Result<ResourceHandle, LoadError> {
        self.loads.lock().unwrap().push(locator.to_string());
        if self.failing.contains(locator) {
            Err(LoadError::Transport {
                locator: locator.to_string(),
                detail: "host unreachable".to_string(),
            })
        } else {
            Ok(ResourceHandle::new(locator.to_string()))
        }
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

struct InitRecorder {
    name: &'static str,
    log: Arc<Mutex<Vec<String>>>,
}

impl ComponentSystem for InitRecorder {
    fn name(&self) -> &str {
        self.name
    }

    fn initialize(&mut self, _scene: &mut Scene) {
        self.log.lock().unwrap().push(format!("init:{}", self.name));
    }

    fn post_initialize(&mut self, _scene: &mut Scene) {
        self.log.lock().unwrap().push(format!("post:{}", self.name));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

const CONFIG_URL: &str = "app/config.json";

fn app_with(config: &[u8], loader: Arc<MapLoader>) -> Application {
    Application::new(AppContext {
        fetch: MemFetch::single(CONFIG_URL, config),
        loader,
        graphics: Arc::new(NullDevice),
        window: None,
    })
}

const BOOT_CONFIG: &[u8] = br#"{
    "name": "integration",
    "display": { "fill_mode": "none", "width": 640, "height": 360 },
    "scripts": ["scripts/main.js"],
    "assets": [
        { "locator": "textures/a.tex", "preload": true },
        { "locator": "textures/b.tex", "preload": true },
        { "locator": "models/c.glb", "preload": true },
        { "locator": "cubemaps/day.dds", "preload": false }
    ]
}"#;

// --- Scenarios ----------------------------------------------------------

#[tokio::test]
async fn configure_with_empty_libraries_settles_without_waiting() {
    let mut app = app_with(br#"{ "name": "empty" }"#, MapLoader::all_ok());

    app.configure(CONFIG_URL).await.unwrap();
    assert_eq!(app.state(), LifecycleState::LibrariesLoading);
}

#[tokio::test]
async fn library_failure_fails_configure() {
    let config = br#"{
        "name": "libs",
        "libraries": ["libs/physics.wasm", "libs/audio.wasm"]
    }"#;
    let mut app = app_with(config, MapLoader::failing(&["libs/audio.wasm"]));

    let error = app.configure(CONFIG_URL).await.unwrap_err();
    assert!(error.to_string().contains("libs/audio.wasm"));
    // The machine parks in the failed stage; it does not silently continue.
    assert_eq!(app.state(), LifecycleState::LibrariesLoading);
    assert!(app.preload(|_| {}).await.is_err());
}

#[tokio::test]
async fn malformed_configuration_is_reported() {
    let mut app = app_with(b"{ definitely not json", MapLoader::all_ok());
    let error = app.configure(CONFIG_URL).await.unwrap_err();
    assert!(error.to_string().contains("parsing configuration"));
}

#[tokio::test]
async fn preload_swallows_item_failures_and_start_proceeds() {
    let mut app = app_with(BOOT_CONFIG, MapLoader::failing(&["textures/b.tex"]));
    app.configure(CONFIG_URL).await.unwrap();

    let fractions = Arc::new(Mutex::new(Vec::new()));
    let observed = fractions.clone();
    app.preload(move |fraction| observed.lock().unwrap().push(fraction))
        .await
        .unwrap();

    // Three preload assets plus one script settle; the failure still counts.
    let fractions = fractions.lock().unwrap().clone();
    assert_eq!(fractions.len(), 4);
    assert!(fractions.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(*fractions.last().unwrap(), 1.0);

    app.start().unwrap();
    assert_eq!(app.state(), LifecycleState::Running);

    // The failed texture never became resident, its siblings did.
    let assets = app.assets();
    let store = assets.lock().unwrap();
    assert!(store.contains(&aion_core::asset::AssetId::from_locator("textures/a.tex")));
    assert!(!store.contains(&aion_core::asset::AssetId::from_locator("textures/b.tex")));
}

#[tokio::test]
async fn preload_skips_resident_assets() {
    let loader = MapLoader::all_ok();
    let mut app = app_with(BOOT_CONFIG, loader.clone());
    app.configure(CONFIG_URL).await.unwrap();

    app.assets().lock().unwrap().insert(
        aion_core::asset::AssetId::from_locator("textures/a.tex"),
        ResourceHandle::new("warm".to_string()),
    );

    app.preload(|_| {}).await.unwrap();

    let loads = loader.loads.lock().unwrap().clone();
    assert!(!loads.contains(&"textures/a.tex".to_string()));
    assert!(loads.contains(&"textures/b.tex".to_string()));
    assert!(loads.contains(&"scripts/main.js".to_string()));
    // The non-preload asset was not part of the batch.
    assert!(!loads.contains(&"cubemaps/day.dds".to_string()));
}

#[tokio::test]
async fn two_phase_init_orders_all_initializes_first() {
    let mut app = app_with(BOOT_CONFIG, MapLoader::all_ok());
    let log = Arc::new(Mutex::new(Vec::new()));
    for name in ["physics", "animation", "script"] {
        app.systems_mut().register(Box::new(InitRecorder {
            name,
            log: log.clone(),
        }));
    }

    app.configure(CONFIG_URL).await.unwrap();
    app.preload(|_| {}).await.unwrap();
    app.start().unwrap();

    let entries = log.lock().unwrap().clone();
    assert_eq!(
        entries,
        vec![
            "init:physics",
            "init:animation",
            "init:script",
            "post:physics",
            "post:animation",
            "post:script",
        ]
    );
}

#[tokio::test]
async fn stages_cannot_be_skipped() {
    let mut app = app_with(BOOT_CONFIG, MapLoader::all_ok());

    assert!(app.preload(|_| {}).await.is_err());
    assert!(app.start().is_err());
    assert_eq!(app.state(), LifecycleState::Unconfigured);

    app.configure(CONFIG_URL).await.unwrap();
    assert!(app.start().is_err());
    // A second configure is rejected once the machine has moved on.
    assert!(app.configure(CONFIG_URL).await.is_err());
}

#[tokio::test]
async fn running_app_ticks_and_notifies_observers() {
    let mut app = app_with(BOOT_CONFIG, MapLoader::all_ok());
    app.configure(CONFIG_URL).await.unwrap();
    app.preload(|_| {}).await.unwrap();
    app.start().unwrap();

    let start = Instant::now();
    app.tick_at(start).unwrap();
    app.tick_at(start + Duration::from_millis(16)).unwrap();
    assert_eq!(app.frame_number(), 2);

    let updates: Vec<f32> = app
        .notifications()
        .drain()
        .into_iter()
        .filter_map(|event| match event {
            AppNotification::Update { dt } => Some(dt),
            _ => None,
        })
        .collect();
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0], 0.0);
    assert!((updates[1] - 0.016).abs() < 1e-4);
}

#[tokio::test]
async fn host_events_route_to_their_subsystems() {
    let mut app = app_with(BOOT_CONFIG, MapLoader::all_ok());
    app.configure(CONFIG_URL).await.unwrap();
    app.preload(|_| {}).await.unwrap();
    app.start().unwrap();

    assert!(!app.is_hidden());
    app.handle_host_event(aion_core::platform::HostEvent::VisibilityChanged { visible: false })
        .unwrap();
    assert!(app.is_hidden());

    // A host-initiated fullscreen change with no pending request is a no-op.
    app.handle_host_event(aion_core::platform::HostEvent::FullscreenChanged {
        fullscreen: true,
    })
    .unwrap();

    app.handle_host_event(aion_core::platform::HostEvent::RedrawRequested)
        .unwrap();
    assert_eq!(app.frame_number(), 1);
}

#[tokio::test]
async fn registry_tracks_current_application() {
    let mut registry = aion_runtime::AppRegistry::new();
    assert!(registry.current().is_none());

    registry.register(7, app_with(BOOT_CONFIG, MapLoader::all_ok()));
    registry.register(9, app_with(BOOT_CONFIG, MapLoader::all_ok()));
    assert_eq!(registry.len(), 2);

    // The first registration became current.
    assert!(registry.current().is_some());
    assert!(registry.set_current(9));
    assert!(!registry.set_current(404));

    registry.remove(9);
    assert!(registry.current().is_none());
    assert!(registry.get(7).is_some());
}

#[tokio::test]
async fn updating_scene_settings_lands_on_the_next_tick() {
    let mut app = app_with(BOOT_CONFIG, MapLoader::all_ok());
    app.configure(CONFIG_URL).await.unwrap();
    app.preload(|_| {}).await.unwrap();
    app.start().unwrap();

    let settings = aion_core::scene::SceneSettings {
        ambient_light: [0.9, 0.8, 0.7],
        ..Default::default()
    };
    app.update_scene_settings(settings.clone()).unwrap();

    let scene = app.scene();
    assert_eq!(scene.lock().unwrap().settings, settings);
}

#[tokio::test]
async fn stop_token_halts_the_loop() {
    let mut app = app_with(BOOT_CONFIG, MapLoader::all_ok());
    app.configure(CONFIG_URL).await.unwrap();
    app.preload(|_| {}).await.unwrap();
    app.start().unwrap();

    app.tick().unwrap();
    app.stop_token().stop();
    app.tick().unwrap();
    assert_eq!(app.frame_number(), 1);
}

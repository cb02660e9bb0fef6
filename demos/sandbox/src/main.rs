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

// Aion Sandbox
// Boots a full application against filesystem content: configure → preload
// → start → bundle activation → frames. Pass --windowed to drive the frames
// from a winit window instead of the headless loop.

use std::any::Any;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use aion_core::scene::{Camera, Scene};
use aion_core::system::{names, ComponentSystem};
use aion_infra::{FetchLoader, FsFetch, HeadlessGraphicsDevice, HostLoop, HostLoopConfig};
use aion_runtime::{AppContext, Application};

const CONFIG: &str = r#"{
    "name": "sandbox",
    "display": { "fill_mode": "keep_aspect", "resolution_mode": "auto" },
    "scripts": ["scripts/main.js"],
    "assets": [
        { "locator": "textures/ground.tex", "type": "texture", "preload": true },
        { "locator": "models/plaza.glb", "type": "model", "preload": true },
        { "locator": "cubemaps/day.dds", "type": "cubemap", "preload": false }
    ],
    "bundles": {
        "plaza": {
            "assets": ["models/plaza.glb"],
            "settings": {
                "ambient_light": [0.25, 0.25, 0.3],
                "exposure": 1.2,
                "skybox": "cubemaps/day.dds"
            }
        }
    }
}"#;

/// Minimal script system: counts updates and honors the preloading flag.
struct ScriptSystem {
    preloading: bool,
    updates: u64,
}

impl ComponentSystem for ScriptSystem {
    fn name(&self) -> &str {
        names::SCRIPT
    }

    fn initialize(&mut self, _scene: &mut Scene) {
        log::info!("Script system initialized");
    }

    fn update(&mut self, _dt: f32) {
        if !self.preloading {
            self.updates += 1;
        }
    }

    fn set_preloading(&mut self, preloading: bool) {
        self.preloading = preloading;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Minimal audio system: logs suspension transitions.
struct AudioSystem;

impl ComponentSystem for AudioSystem {
    fn name(&self) -> &str {
        names::AUDIO
    }

    fn suspend(&mut self) {
        log::info!("Audio suspended");
    }

    fn resume(&mut self) {
        log::info!("Audio resumed");
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Lays out the demo content root on disk.
fn prepare_content() -> Result<PathBuf> {
    let root = std::env::temp_dir().join("aion-sandbox");
    for dir in ["app", "scripts", "textures", "models", "cubemaps"] {
        std::fs::create_dir_all(root.join(dir))
            .with_context(|| format!("creating content dir '{dir}'"))?;
    }
    std::fs::write(root.join("app/config.json"), CONFIG)?;
    std::fs::write(root.join("scripts/main.js"), b"// demo script\n")?;
    std::fs::write(root.join("textures/ground.tex"), vec![0u8; 256])?;
    std::fs::write(root.join("models/plaza.glb"), vec![0u8; 1024])?;
    std::fs::write(root.join("cubemaps/day.dds"), vec![0u8; 512])?;
    Ok(root)
}

fn main() -> Result<()> {
    env_logger::init();

    let content_root = prepare_content()?;
    log::info!("Content root: {}", content_root.display());

    let runtime = tokio::runtime::Runtime::new().context("creating tokio runtime")?;

    let fetch = Arc::new(FsFetch::new(&content_root));
    let loader = Arc::new(FetchLoader::new(fetch.clone()));
    let graphics = Arc::new(HeadlessGraphicsDevice::new(1280, 720));

    let mut app = Application::new(AppContext {
        fetch,
        loader,
        graphics: graphics.clone(),
        window: None,
    });
    app.systems_mut().register(Box::new(ScriptSystem {
        preloading: false,
        updates: 0,
    }));
    app.systems_mut().register(Box::new(AudioSystem));
    app.scene().lock().unwrap().add_camera(Camera::new("main"));

    runtime.block_on(async {
        app.configure("app/config.json").await?;
        app.preload(|fraction| log::info!("Preload {:.0}%", fraction * 100.0))
            .await
    })?;
    app.start()?;

    let bundle = runtime.block_on(app.load_from_toc("plaza", |fraction| {
        log::info!("Bundle {:.0}%", fraction * 100.0)
    }))?;
    log::info!(
        "Bundle active: {} asset(s), exposure {}",
        bundle.assets.len(),
        bundle.settings.exposure
    );

    if std::env::args().any(|arg| arg == "--windowed") {
        return HostLoop::run(app, HostLoopConfig::default());
    }

    for _ in 0..120 {
        app.tick()?;
    }
    log::info!(
        "Ran {} frame(s), rendered {} camera frame(s)",
        app.frame_number(),
        graphics.frames_rendered()
    );

    let updates = app
        .systems_mut()
        .get(names::SCRIPT)
        .and_then(|system| system.as_any().downcast_ref::<ScriptSystem>())
        .map(|script| script.updates)
        .unwrap_or(0);
    log::info!("Script system saw {updates} update(s)");

    Ok(())
}

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

//! The application lifecycle state machine.
//!
//! Stages run strictly in sequence — configure → libraries → preload →
//! scene activation → running — and a stage is only entered after the
//! previous stage's batch has fully settled. The application object holds no
//! business logic beyond this sequencing; load coordination, frame
//! scheduling, viewport policy, and visibility suspension are owned siblings.
//!
//! Failure policy (deliberately asymmetric): a library failing to load fails
//! `configure`; individual preload item failures are logged and never
//! escalated, so startup is best-effort for optional content.

mod registry;

pub use registry::AppRegistry;

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use anyhow::{anyhow, bail, Context, Result};
use tokio::sync::watch;

use aion_core::asset::{AssetId, AssetStore};
use aion_core::event::EventBus;
use aion_core::graphics::GraphicsDevice;
use aion_core::load::{LoadableItem, ResourceKind, ResourceLoader};
use aion_core::net::Fetch;
use aion_core::platform::{HostEvent, HostWindow, InputPoller};
use aion_core::scene::{Scene, SceneSettings};
use aion_core::system::{names, SystemRegistry};

use crate::config::{AppConfig, AssetManifestEntry, SceneBundle};
use crate::frame::{FrameScheduler, StopToken, TickContext};
use crate::loader::{BatchReport, ResourceLoadCoordinator};
use crate::notify::AppNotification;
use crate::viewport::{DisplaySize, FillMode, FullscreenError, FullscreenSuccess, ResolutionMode, ViewportAdapter};
use crate::visibility::VisibilitySuspension;

/// The top-level lifecycle stage.
///
/// Exactly one transition edge exists between each consecutive pair; stages
/// are never skipped. A failed stage parks the machine where it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Nothing has happened yet.
    Unconfigured,
    /// The configuration payload is being fetched and parsed.
    Configuring,
    /// Declared libraries are loading.
    LibrariesLoading,
    /// The combined preload batch (assets + scripts) is loading.
    Preloading,
    /// The initial scene is being attached and two-phase initialized.
    SceneActivating,
    /// The frame loop is live.
    Running,
}

/// External collaborators handed to the application at construction.
///
/// There is no process-global state; everything the runtime touches arrives
/// through this context.
pub struct AppContext {
    /// Transport for the configuration payload.
    pub fetch: Arc<dyn Fetch>,
    /// Resolver for scripts, assets, and libraries.
    pub loader: Arc<dyn ResourceLoader>,
    /// The drawing surface.
    pub graphics: Arc<dyn GraphicsDevice>,
    /// The host window, when one exists (headless runs pass `None`).
    pub window: Option<Arc<dyn HostWindow>>,
}

/// The runtime core: owns the lifecycle and coordinates its siblings.
pub struct Application {
    state: LifecycleState,
    fetch: Arc<dyn Fetch>,
    loader: Arc<dyn ResourceLoader>,
    systems: SystemRegistry,
    assets: Arc<Mutex<AssetStore>>,
    scene: Arc<Mutex<Scene>>,
    graphics: Arc<dyn GraphicsDevice>,
    window: Option<Arc<dyn HostWindow>>,
    notifications: EventBus<AppNotification>,
    // Environment settings applied by asynchronous bundle activations; the
    // gravity capability check needs the system registry, which only the
    // application thread may touch, so they queue here until the next tick.
    settings_applied: EventBus<SceneSettings>,
    libraries_ready: watch::Sender<bool>,
    scripts: Vec<String>,
    // Shared so a bundle activation queued before configure() finishes can
    // read the tables once the libraries latch flips.
    manifest: Arc<Mutex<Vec<AssetManifestEntry>>>,
    bundles: Arc<Mutex<HashMap<String, SceneBundle>>>,
    scheduler: FrameScheduler,
    viewport: ViewportAdapter,
    visibility: VisibilitySuspension,
    input: Option<Box<dyn InputPoller>>,
}

impl Application {
    /// Creates an unconfigured application around its collaborators.
    #[must_use]
    pub fn new(context: AppContext) -> Self {
        let viewport = ViewportAdapter::new(Arc::clone(&context.graphics), context.window.clone());
        let (libraries_ready, _) = watch::channel(false);
        Self {
            state: LifecycleState::Unconfigured,
            fetch: context.fetch,
            loader: context.loader,
            systems: SystemRegistry::new(),
            assets: Arc::new(Mutex::new(AssetStore::new())),
            scene: Arc::new(Mutex::new(Scene::new())),
            graphics: context.graphics,
            window: context.window,
            notifications: EventBus::new(),
            settings_applied: EventBus::new(),
            libraries_ready,
            scripts: Vec::new(),
            manifest: Arc::new(Mutex::new(Vec::new())),
            bundles: Arc::new(Mutex::new(HashMap::new())),
            scheduler: FrameScheduler::new(),
            viewport,
            visibility: VisibilitySuspension::new(),
            input: None,
        }
    }

    /// The current lifecycle stage.
    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Attaches the host window after construction, for hosts whose surface
    /// only materializes once their event loop is running. Re-arms the frame
    /// loop if it is already live.
    pub fn attach_window(&mut self, window: Arc<dyn HostWindow>) {
        self.viewport.attach_window(Arc::clone(&window));
        if self.state == LifecycleState::Running {
            window.request_redraw();
        }
        self.window = Some(window);
    }

    /// Fetches and applies the configuration at `location`, then loads the
    /// declared libraries.
    ///
    /// Display properties are applied before library loading begins. Any
    /// library failing fails the whole stage; on success the
    /// libraries-loaded latch flips and queued bundle activations proceed.
    pub async fn configure(&mut self, location: &str) -> Result<()> {
        if self.state != LifecycleState::Unconfigured {
            bail!("configure() is only valid in the Unconfigured state, not {:?}", self.state);
        }
        self.state = LifecycleState::Configuring;

        let bytes = self
            .fetch
            .get(location)
            .await
            .with_context(|| format!("retrieving configuration from '{location}'"))?;
        let config = AppConfig::parse(&bytes).context("parsing configuration payload")?;
        log::info!("Configuring application '{}'", config.name);

        let display = config.display;
        self.viewport
            .set_resolution(display.resolution_mode, display.width, display.height);
        self.viewport
            .set_fill_mode(display.fill_mode, display.width, display.height);

        self.scripts = config.scripts;
        *lock(&self.manifest, "manifest")? = config.assets;
        *lock(&self.bundles, "bundle table")? = config.bundles;

        self.state = LifecycleState::LibrariesLoading;
        let libraries: Vec<LoadableItem> = config
            .libraries
            .iter()
            .map(|url| LoadableItem::new(ResourceKind::Library, url.clone()))
            .collect();
        let report = self
            .coordinator()
            .load_batch(vec![libraries], |_fraction| {})
            .await;
        store_resources(&self.assets, &report)?;
        if let Some(error) = report.error {
            bail!("failed to load required library {error}");
        }

        self.libraries_ready.send_replace(true);
        self.notifications.publish(AppNotification::LibrariesReady);
        Ok(())
    }

    /// Loads one combined batch of preload-flagged manifest assets not yet
    /// resident plus the declared preload scripts.
    ///
    /// Progress is observable both through `on_progress` and as
    /// [`AppNotification::PreloadProgress`]. Individual item failures are
    /// logged and never escalated; the returned error only ever reports a
    /// sequencing misuse.
    pub async fn preload(&mut self, mut on_progress: impl FnMut(f32) + Send) -> Result<()> {
        if self.state != LifecycleState::LibrariesLoading || !*self.libraries_ready.borrow() {
            bail!(
                "preload() is only valid after a successful configure(), not in {:?}",
                self.state
            );
        }
        self.state = LifecycleState::Preloading;

        let manifest = lock(&self.manifest, "manifest")?.clone();
        let assets_group: Vec<LoadableItem> = {
            let store = lock(&self.assets, "asset store")?;
            manifest
                .iter()
                .filter(|entry| entry.preload)
                .filter(|entry| !store.contains(&AssetId::from_locator(&entry.locator)))
                .map(|entry| LoadableItem::new(ResourceKind::Asset, entry.locator.clone()))
                .collect()
        };
        let scripts_group: Vec<LoadableItem> = self
            .scripts
            .iter()
            .map(|url| LoadableItem::new(ResourceKind::Script, url.clone()))
            .collect();

        if let Some(script) = self.systems.get_mut(names::SCRIPT) {
            script.set_preloading(true);
        }

        let progress_sender = self.notifications.sender();
        let report = self
            .coordinator()
            .load_batch(vec![assets_group, scripts_group], move |fraction| {
                let _ = progress_sender.send(AppNotification::PreloadProgress { fraction });
                on_progress(fraction);
            })
            .await;
        store_resources(&self.assets, &report)?;
        if report.failed() > 0 {
            log::warn!(
                "Preload finished with {} failed item(s) out of {}",
                report.failed(),
                report.items.len()
            );
        }

        if let Some(script) = self.systems.get_mut(names::SCRIPT) {
            script.set_preloading(false);
        }
        Ok(())
    }

    /// Attaches the initial scene root, runs two-phase initialization over
    /// every registered system, and starts the frame loop.
    ///
    /// Every system's `initialize` completes before any system's
    /// `post_initialize` begins, so sibling cross-references resolve safely
    /// in the second phase.
    pub fn start(&mut self) -> Result<()> {
        if self.state != LifecycleState::Preloading {
            bail!("start() is only valid after preload(), not in {:?}", self.state);
        }
        self.state = LifecycleState::SceneActivating;

        {
            let mut scene = lock(&self.scene, "scene")?;
            scene.attach_root();
            for system in self.systems.iter_mut() {
                system.initialize(&mut scene);
            }
            for system in self.systems.iter_mut() {
                system.post_initialize(&mut scene);
            }
        }

        self.state = LifecycleState::Running;
        self.scheduler.start(self.window.as_deref());
        Ok(())
    }

    /// Activates a named bundle from the table of contents.
    ///
    /// The returned future owns everything it needs, so the host may run it
    /// concurrently with the frame loop. It waits on the libraries-loaded
    /// latch (a queued continuation, not polling), loads the bundle's asset
    /// set, applies the bundle's environment settings to the active scene,
    /// and attaches the skybox — immediately when resident, after its load
    /// when the manifest knows it, or through an asset-store "added"
    /// continuation when it does not exist yet at all.
    pub fn load_from_toc(
        &self,
        name: &str,
        mut on_progress: impl FnMut(f32) + Send + 'static,
    ) -> impl Future<Output = Result<SceneBundle>> + Send + 'static {
        let name = name.to_string();
        let bundles = Arc::clone(&self.bundles);
        let manifest = Arc::clone(&self.manifest);
        let loader = Arc::clone(&self.loader);
        let assets = Arc::clone(&self.assets);
        let scene = Arc::clone(&self.scene);
        let mut ready = self.libraries_ready.subscribe();
        let settings_sender = self.settings_applied.sender();

        async move {
            ready
                .wait_for(|loaded| *loaded)
                .await
                .context("libraries-loaded latch closed before it flipped")?;

            let bundle = lock(&bundles, "bundle table")?
                .get(&name)
                .cloned()
                .ok_or_else(|| anyhow!("no bundle named '{name}' in the table of contents"))?;

            let items: Vec<LoadableItem> = bundle
                .assets
                .iter()
                .map(|locator| LoadableItem::new(ResourceKind::Asset, locator.clone()))
                .collect();
            let coordinator = ResourceLoadCoordinator::new(Arc::clone(&loader));
            let report = coordinator
                .load_batch(vec![items], move |fraction| on_progress(fraction))
                .await;
            store_resources(&assets, &report)?;
            if let Some(error) = report.error {
                bail!("failed to load bundle '{name}': {error}");
            }

            lock(&scene, "scene")?.apply_settings(bundle.settings.clone());
            let _ = settings_sender.send(bundle.settings.clone());

            if let Some(locator) = &bundle.settings.skybox {
                let manifest = lock(&manifest, "manifest")?.clone();
                attach_skybox(locator, &manifest, &loader, &assets, &scene).await?;
            }

            Ok(bundle)
        }
    }

    /// Applies environment settings to the active scene between ticks.
    ///
    /// The scheduler reads the new values on its next tick. Gravity is
    /// forwarded to the physics system when one is registered, and silently
    /// skipped otherwise.
    pub fn update_scene_settings(&mut self, settings: SceneSettings) -> Result<()> {
        self.forward_gravity(&settings);
        lock(&self.scene, "scene")?.apply_settings(settings);
        Ok(())
    }

    /// Routes a host event to the subsystem that owns it. A
    /// [`HostEvent::RedrawRequested`] runs one tick.
    pub fn handle_host_event(&mut self, event: HostEvent) -> Result<()> {
        match event {
            HostEvent::Resized { .. } => {
                let _ = self.viewport.resize(None, None);
                Ok(())
            }
            HostEvent::VisibilityChanged { visible } => {
                self.visibility.handle(visible, &mut self.systems);
                Ok(())
            }
            HostEvent::FullscreenChanged { fullscreen } => {
                self.viewport.handle_fullscreen_changed(fullscreen);
                Ok(())
            }
            HostEvent::RedrawRequested => self.tick(),
        }
    }

    /// Runs one frame at the current instant.
    pub fn tick(&mut self) -> Result<()> {
        self.tick_at(Instant::now())
    }

    /// Runs one frame at an explicit instant.
    ///
    /// Errors raised by per-frame callbacks propagate to the caller; there
    /// is no partial-tick rollback.
    pub fn tick_at(&mut self, now: Instant) -> Result<()> {
        for settings in self.settings_applied.drain() {
            self.forward_gravity(&settings);
        }

        let mut scene = lock(&self.scene, "scene")?;
        self.scheduler.tick_at(
            now,
            TickContext {
                systems: &mut self.systems,
                scene: &mut scene,
                graphics: self.graphics.as_ref(),
                notifications: &self.notifications,
                input: self.input.as_deref_mut(),
                window: self.window.as_deref(),
            },
        )
    }

    fn forward_gravity(&mut self, settings: &SceneSettings) {
        if let Some(gravity) = settings.gravity {
            match self.systems.get_mut(names::PHYSICS) {
                Some(physics) => physics.set_gravity(gravity),
                None => {
                    log::debug!("Scene declares gravity but no physics system is registered")
                }
            }
        }
    }

    fn coordinator(&self) -> ResourceLoadCoordinator {
        ResourceLoadCoordinator::new(Arc::clone(&self.loader))
    }

    // --- Canvas and display surface -------------------------------------

    /// Sets the canvas fill mode, optionally with an explicit displayed
    /// size.
    pub fn set_canvas_fill_mode(
        &mut self,
        mode: FillMode,
        width: Option<u32>,
        height: Option<u32>,
    ) -> DisplaySize {
        self.viewport.set_fill_mode(mode, width, height)
    }

    /// Sets the canvas resolution mode.
    pub fn set_canvas_resolution(
        &mut self,
        mode: ResolutionMode,
        width: Option<u32>,
        height: Option<u32>,
    ) {
        self.viewport.set_resolution(mode, width, height);
    }

    /// Recomputes the displayed canvas size under the current policy.
    pub fn resize_canvas(&mut self, width: Option<u32>, height: Option<u32>) -> DisplaySize {
        self.viewport.resize(width, height)
    }

    /// Begins an asynchronous fullscreen entry. See
    /// [`ViewportAdapter::enable_fullscreen`].
    pub fn enable_fullscreen(
        &mut self,
        on_success: Option<FullscreenSuccess>,
        on_error: Option<FullscreenError>,
    ) {
        self.viewport.enable_fullscreen(on_success, on_error);
    }

    /// Begins an asynchronous fullscreen exit.
    pub fn disable_fullscreen(&mut self, on_success: Option<FullscreenSuccess>) {
        self.viewport.disable_fullscreen(on_success);
    }

    /// Whether the host surface is currently fullscreen.
    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.viewport.is_fullscreen()
    }

    /// Whether the host surface is currently hidden.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.visibility.is_hidden()
    }

    // --- Accessors -------------------------------------------------------

    /// The registered component systems.
    pub fn systems_mut(&mut self) -> &mut SystemRegistry {
        &mut self.systems
    }

    /// The notification bus external observers subscribe to.
    #[must_use]
    pub fn notifications(&self) -> &EventBus<AppNotification> {
        &self.notifications
    }

    /// Shared handle to the active scene.
    #[must_use]
    pub fn scene(&self) -> Arc<Mutex<Scene>> {
        Arc::clone(&self.scene)
    }

    /// Shared handle to the resident-asset store.
    #[must_use]
    pub fn assets(&self) -> Arc<Mutex<AssetStore>> {
        Arc::clone(&self.assets)
    }

    /// The viewport adapter.
    pub fn viewport_mut(&mut self) -> &mut ViewportAdapter {
        &mut self.viewport
    }

    /// Registers the input poller stepped once per tick.
    pub fn set_input_poller(&mut self, poller: Box<dyn InputPoller>) {
        self.input = Some(poller);
    }

    /// A handle that stops the frame loop before its next tick.
    #[must_use]
    pub fn stop_token(&self) -> StopToken {
        self.scheduler.stop_token()
    }

    /// Scales simulation time; zero pauses simulation while rendering
    /// continues.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.scheduler.set_time_scale(scale);
    }

    /// Frames ticked since the loop started.
    #[must_use]
    pub fn frame_number(&self) -> u64 {
        self.scheduler.frame_number()
    }
}

fn lock<'a, T>(mutex: &'a Mutex<T>, label: &str) -> Result<MutexGuard<'a, T>> {
    mutex
        .lock()
        .map_err(|_| anyhow!("{label} mutex poisoned"))
}

fn store_resources(assets: &Mutex<AssetStore>, report: &BatchReport) -> Result<()> {
    let mut store = lock(assets, "asset store")?;
    for settled in &report.items {
        if let Some(resource) = &settled.resource {
            store.insert(
                AssetId::from_locator(&settled.item.source_locator),
                resource.clone(),
            );
        }
    }
    Ok(())
}

async fn attach_skybox(
    locator: &str,
    manifest: &[AssetManifestEntry],
    loader: &Arc<dyn ResourceLoader>,
    assets: &Mutex<AssetStore>,
    scene: &Arc<Mutex<Scene>>,
) -> Result<()> {
    let id = AssetId::from_locator(locator);

    let resident = lock(assets, "asset store")?.get(&id).cloned();
    if let Some(handle) = resident {
        lock(scene, "scene")?.set_skybox(handle);
        return Ok(());
    }

    if manifest.iter().any(|entry| entry.locator == locator) {
        // Known to the manifest but not resident: load it now. A failing
        // skybox leaves the scene rendering without one.
        match loader.load(locator, ResourceKind::Asset).await {
            Ok(handle) => {
                lock(assets, "asset store")?.insert(id, handle.clone());
                lock(scene, "scene")?.set_skybox(handle);
            }
            Err(error) => log::warn!("Skybox load failed, continuing without it: {error}"),
        }
        return Ok(());
    }

    // Unknown asset: attach whenever something makes it resident.
    let scene_for_attach = Arc::clone(scene);
    lock(assets, "asset store")?.on_added(id, move |handle| {
        match scene_for_attach.lock() {
            Ok(mut scene) => scene.set_skybox(handle.clone()),
            Err(_) => log::error!("Scene mutex poisoned while attaching skybox"),
        }
    });
    Ok(())
}

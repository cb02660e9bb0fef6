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

use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use aion_core::event::EventBus;
use aion_core::platform::{HostEvent, HostWindow};
use aion_runtime::Application;

use super::{HostEventPump, WinitHostWindow};

/// Window configuration for [`HostLoop::run`].
#[derive(Debug, Clone)]
pub struct HostLoopConfig {
    /// Window title.
    pub title: String,
    /// Initial logical width.
    pub width: u32,
    /// Initial logical height.
    pub height: u32,
}

impl Default for HostLoopConfig {
    fn default() -> Self {
        Self {
            title: "aion".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Drives a booted [`Application`] from the winit event loop.
///
/// The window materializes on `resumed` and is attached to the application;
/// from then on every winit event is translated into a [`HostEvent`] and
/// routed through the application, so frames run on `RedrawRequested` and
/// the scheduler re-arms itself. Closing the window fires the stop token and
/// exits.
pub struct HostLoop;

impl HostLoop {
    /// Runs the event loop until the window closes or a frame errors.
    /// Blocks the calling thread.
    pub fn run(app: Application, config: HostLoopConfig) -> Result<()> {
        let event_loop = EventLoop::new().context("creating winit event loop")?;
        let mut state = HostState {
            app,
            config,
            window: None,
            events: EventBus::new(),
            pump: None,
        };
        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;
        Ok(())
    }
}

struct HostState {
    app: Application,
    config: HostLoopConfig,
    window: Option<WinitHostWindow>,
    events: EventBus<HostEvent>,
    pump: Option<HostEventPump>,
}

impl ApplicationHandler for HostState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.width as f64,
                self.config.height as f64,
            ));
        match event_loop.create_window(attributes) {
            Ok(window) => {
                log::info!("Window created (id: {:?})", window.id());
                let window = WinitHostWindow::new(window);
                self.app.attach_window(Arc::new(window.clone()));
                self.pump = Some(HostEventPump::new(self.events.sender()));
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let WindowEvent::CloseRequested = event {
            log::info!("Close requested; stopping frame loop");
            self.app.stop_token().stop();
            event_loop.exit();
            return;
        }

        let Some(window) = self.window.as_ref() else {
            return;
        };
        if let Some(pump) = self.pump.as_mut() {
            pump.process(window.is_fullscreen(), &event);
        }

        for host_event in self.events.drain() {
            if let Err(e) = self.app.handle_host_event(host_event) {
                // A frame error is fatal to the tick cycle; surface it and
                // leave the loop.
                log::error!("Frame error: {e:#}");
                event_loop.exit();
                return;
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
    }
}

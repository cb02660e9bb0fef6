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

//! Component-system contracts and the name-keyed registry that owns them.
//!
//! The registry preserves registration order because per-frame invocation
//! order is part of the scheduler's contract: fixed-step, variable-step, and
//! post-update passes each walk the systems in the order they were
//! registered. Lookup by name returns an `Option` so callers make their
//! capability checks explicit instead of assuming a subsystem exists.

use std::any::Any;
use std::collections::HashMap;

use crate::scene::Scene;

/// Well-known system names used by capability checks.
pub mod names {
    /// The audio-producing subsystem suspended on visibility loss.
    pub const AUDIO: &str = "audio";
    /// The physics subsystem that consumes scene gravity, when present.
    pub const PHYSICS: &str = "physics";
    /// The script subsystem whose preloading flag gates script execution.
    pub const SCRIPT: &str = "script";
}

/// One per-component-type subsystem invoked by the frame scheduler.
///
/// Lifecycle: `initialize` runs over every system before any system's
/// `post_initialize` runs, so cross-references between siblings are only
/// resolved in the second phase. Per frame, `fixed_update` (constant step),
/// `update` (scaled measured delta), and `post_update` run in that order
/// across all systems.
pub trait ComponentSystem: Send {
    /// The registry key and capability name of this system.
    fn name(&self) -> &str;

    /// First initialization phase, run over the scene hierarchy.
    fn initialize(&mut self, scene: &mut Scene) {
        let _ = scene;
    }

    /// Second initialization phase; every system's [`initialize`]
    /// (ComponentSystem::initialize) has already run.
    fn post_initialize(&mut self, scene: &mut Scene) {
        let _ = scene;
    }

    /// Deterministic update with a constant step, decoupled from measured
    /// frame time.
    fn fixed_update(&mut self, step: f32) {
        let _ = step;
    }

    /// Variable-step update with the clamped, scaled frame delta.
    fn update(&mut self, dt: f32) {
        let _ = dt;
    }

    /// Second pass after all variable updates, for work that depends on
    /// sibling systems having updated.
    fn post_update(&mut self, dt: f32) {
        let _ = dt;
    }

    /// Applies a gravity vector. Only meaningful for a physics system;
    /// the default ignores it.
    fn set_gravity(&mut self, gravity: [f32; 3]) {
        let _ = gravity;
    }

    /// Marks whether a preload batch is in flight. Only meaningful for a
    /// script system, which defers script execution while the flag is set;
    /// the default ignores it.
    fn set_preloading(&mut self, preloading: bool) {
        let _ = preloading;
    }

    /// Suspends time-consuming work while the surface is hidden.
    fn suspend(&mut self) {}

    /// Resumes after [`suspend`](ComponentSystem::suspend).
    fn resume(&mut self) {}

    /// Type-erased access for callers that need the concrete system.
    fn as_any(&self) -> &dyn Any;

    /// Mutable type-erased access for callers that need the concrete system.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A name-keyed, insertion-order-preserving registry of component systems.
#[derive(Default)]
pub struct SystemRegistry {
    systems: Vec<Box<dyn ComponentSystem>>,
    index: HashMap<String, usize>,
}

impl SystemRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Registers a system under its own name.
    ///
    /// Registering a name twice replaces the earlier system in place, keeping
    /// its position in the invocation order.
    pub fn register(&mut self, system: Box<dyn ComponentSystem>) {
        let name = system.name().to_string();
        match self.index.get(&name) {
            Some(&slot) => {
                log::warn!("Replacing already-registered system '{name}'");
                self.systems[slot] = system;
            }
            None => {
                self.index.insert(name, self.systems.len());
                self.systems.push(system);
            }
        }
    }

    /// Looks up a system by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn ComponentSystem> {
        self.index
            .get(name)
            .map(|&slot| self.systems[slot].as_ref())
    }

    /// Looks up a system by name, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut dyn ComponentSystem> {
        match self.index.get(name) {
            Some(&slot) => Some(self.systems[slot].as_mut()),
            None => None,
        }
    }

    /// Iterates systems in registration order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn ComponentSystem>> {
        self.systems.iter_mut()
    }

    /// The number of registered systems.
    #[must_use]
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Returns `true` if no systems are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named {
        name: &'static str,
        updates: u32,
    }

    impl Named {
        fn boxed(name: &'static str) -> Box<dyn ComponentSystem> {
            Box::new(Self { name, updates: 0 })
        }
    }

    impl ComponentSystem for Named {
        fn name(&self) -> &str {
            self.name
        }

        fn update(&mut self, _dt: f32) {
            self.updates += 1;
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn iteration_follows_registration_order() {
        let mut registry = SystemRegistry::new();
        registry.register(Named::boxed("physics"));
        registry.register(Named::boxed("animation"));
        registry.register(Named::boxed("audio"));

        let order: Vec<String> = registry
            .iter_mut()
            .map(|system| system.name().to_string())
            .collect();
        assert_eq!(order, vec!["physics", "animation", "audio"]);
    }

    #[test]
    fn lookup_by_name() {
        let mut registry = SystemRegistry::new();
        registry.register(Named::boxed("audio"));

        assert!(registry.get("audio").is_some());
        assert!(registry.get("physics").is_none());
    }

    #[test]
    fn replacement_keeps_invocation_slot() {
        let mut registry = SystemRegistry::new();
        registry.register(Named::boxed("physics"));
        registry.register(Named::boxed("audio"));
        registry.register(Named::boxed("physics"));

        assert_eq!(registry.len(), 2);
        let order: Vec<String> = registry
            .iter_mut()
            .map(|system| system.name().to_string())
            .collect();
        assert_eq!(order, vec!["physics", "audio"]);
    }

    #[test]
    fn get_mut_reaches_concrete_state() {
        let mut registry = SystemRegistry::new();
        registry.register(Named::boxed("script"));

        registry
            .get_mut("script")
            .expect("registered above")
            .update(0.016);

        let named = registry
            .get("script")
            .and_then(|system| system.as_any().downcast_ref::<Named>())
            .expect("concrete type");
        assert_eq!(named.updates, 1);
    }
}

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

use super::{AssetId, ResourceHandle};

type AddedContinuation = Box<dyn FnOnce(&ResourceHandle) + Send>;

/// The resident-asset map.
///
/// Resources stay resident after the batch that loaded them is discarded.
/// Continuations registered through [`on_added`](AssetStore::on_added) run
/// exactly once, on the caller's thread, at the moment the asset becomes
/// resident — or immediately if it already is.
#[derive(Default)]
pub struct AssetStore {
    resident: HashMap<AssetId, ResourceHandle>,
    pending_added: HashMap<AssetId, Vec<AddedContinuation>>,
}

impl AssetStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes an asset resident, replacing any previous payload under the
    /// same id, and runs the continuations waiting on it.
    pub fn insert(&mut self, id: AssetId, handle: ResourceHandle) {
        log::trace!("Asset {id} became resident");
        self.resident.insert(id, handle);
        if let Some(waiters) = self.pending_added.remove(&id) {
            let handle = &self.resident[&id];
            for waiter in waiters {
                waiter(handle);
            }
        }
    }

    /// Borrows a resident asset.
    #[must_use]
    pub fn get(&self, id: &AssetId) -> Option<&ResourceHandle> {
        self.resident.get(id)
    }

    /// Whether an asset is resident.
    #[must_use]
    pub fn contains(&self, id: &AssetId) -> bool {
        self.resident.contains_key(id)
    }

    /// Registers a one-shot continuation for the moment `id` becomes
    /// resident. Runs immediately if it already is.
    pub fn on_added(&mut self, id: AssetId, f: impl FnOnce(&ResourceHandle) + Send + 'static) {
        match self.resident.get(&id) {
            Some(handle) => f(handle),
            None => self.pending_added.entry(id).or_default().push(Box::new(f)),
        }
    }

    /// The number of resident assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resident.len()
    }

    /// Returns `true` if nothing is resident.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resident.is_empty()
    }
}

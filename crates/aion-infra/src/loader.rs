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

//! A byte-level resource loader over a [`Fetch`] transport.
//!
//! Type-specific decoding is an external collaborator's concern; this loader
//! resolves locators to raw bytes and keeps them cached, so a repeated load
//! settles immediately the way the batch coordinator expects cache hits to.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use aion_core::asset::ResourceHandle;
use aion_core::error::LoadError;
use aion_core::load::{ResourceKind, ResourceLoader};
use aion_core::net::Fetch;

/// Resolves locators through a [`Fetch`], caching resolved resources.
pub struct FetchLoader {
    fetch: Arc<dyn Fetch>,
    cache: Mutex<HashMap<String, ResourceHandle>>,
}

impl FetchLoader {
    /// Creates a loader over the given transport.
    pub fn new(fetch: Arc<dyn Fetch>) -> Self {
        Self {
            fetch,
            cache: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl ResourceLoader for FetchLoader {
    async fn load(&self, locator: &str, kind: ResourceKind) -> Result<ResourceHandle, LoadError> {
        let cached = self
            .cache
            .lock()
            .ok()
            .and_then(|cache| cache.get(locator).cloned());
        if let Some(handle) = cached {
            log::trace!("Cache hit for {kind:?} '{locator}'");
            return Ok(handle);
        }

        let bytes = self
            .fetch
            .get(locator)
            .await
            .map_err(|e| LoadError::Transport {
                locator: locator.to_string(),
                detail: e.to_string(),
            })?;
        log::debug!("Loaded {kind:?} '{locator}' ({} bytes)", bytes.len());

        let handle = ResourceHandle::new(bytes);
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(locator.to_string(), handle.clone());
        }
        Ok(handle)
    }
}

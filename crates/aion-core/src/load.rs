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

//! The loading seam: one unit of asynchronous work, and the contract of the
//! external loader that resolves it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::asset::ResourceHandle;
use crate::error::LoadError;

/// The category of a loadable unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// A behavior script to be made available to the script subsystem.
    Script,
    /// A content asset from the manifest.
    Asset,
    /// An external library declared by the configuration.
    Library,
}

/// The settlement state of a [`LoadableItem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Not yet settled.
    Pending,
    /// Settled successfully.
    Success,
    /// Settled with a failure. The item still counts as settled for batch
    /// progress purposes.
    Failure {
        /// Description of the failure.
        detail: String,
    },
}

/// Identifies one unit of asynchronous load work within a batch.
///
/// Items are owned exclusively by the batch coordinator while the batch is in
/// flight and discarded when it settles; the underlying resource persists in
/// the asset store.
#[derive(Debug, Clone)]
pub struct LoadableItem {
    /// What kind of work this is.
    pub kind: ResourceKind,
    /// Where the loader should fetch it from.
    pub source_locator: String,
    /// Whether the resource resolved successfully.
    pub loaded: bool,
    /// The settlement state.
    pub outcome: LoadOutcome,
}

impl LoadableItem {
    /// Creates a pending item.
    #[must_use]
    pub fn new(kind: ResourceKind, source_locator: impl Into<String>) -> Self {
        Self {
            kind,
            source_locator: source_locator.into(),
            loaded: false,
            outcome: LoadOutcome::Pending,
        }
    }

    /// Returns `true` once the item has reached a final outcome.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !matches!(self.outcome, LoadOutcome::Pending)
    }
}

/// The external loader contract.
///
/// Each submitted locator is resolved exactly once, asynchronously, in
/// unspecified order and on unspecified timing; a cached resource may resolve
/// immediately. The coordinator in `aion-runtime` is the only caller.
#[async_trait]
pub trait ResourceLoader: Send + Sync {
    /// Resolves a locator to a resource, or reports why it could not.
    async fn load(&self, locator: &str, kind: ResourceKind) -> Result<ResourceHandle, LoadError>;
}

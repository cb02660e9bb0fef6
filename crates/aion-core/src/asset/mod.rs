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

//! Asset identity and residency.
//!
//! Assets are addressed by a stable [`AssetId`] derived from their source
//! locator, held as type-erased [`ResourceHandle`]s, and kept resident in an
//! [`AssetStore`] that outlives the load batches which populated it. The
//! store also carries the "added" notification seam: a one-shot continuation
//! that runs when an asset with a given id becomes resident.

mod handle;
mod id;
mod store;

pub use handle::ResourceHandle;
pub use id::AssetId;
pub use store::AssetStore;

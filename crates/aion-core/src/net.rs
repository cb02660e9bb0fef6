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

//! The transport contract for fetching raw bytes by URL.

use async_trait::async_trait;

use crate::error::FetchError;

/// Single-shot, asynchronous byte retrieval.
///
/// The runtime consumes this for the configuration payload; loaders may
/// consume it for resource bytes. No timeout is enforced at this layer; if
/// the host transport has one, it surfaces as a [`FetchError::Transport`].
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Retrieves the payload at `url`.
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

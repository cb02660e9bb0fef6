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

//! Filesystem-backed transport, resolving URLs relative to a root directory.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use aion_core::error::FetchError;
use aion_core::net::Fetch;

/// A [`Fetch`] implementation reading from a content root on disk, the
/// local stand-in for a network transport.
pub struct FsFetch {
    root: PathBuf,
}

impl FsFetch {
    /// Creates a fetch rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl Fetch for FsFetch {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let path = self.root.join(url);
        log::trace!("Fetching {}", path.display());
        tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                FetchError::NotFound {
                    url: url.to_string(),
                }
            } else {
                FetchError::Transport {
                    url: url.to_string(),
                    detail: e.to_string(),
                }
            }
        })
    }
}

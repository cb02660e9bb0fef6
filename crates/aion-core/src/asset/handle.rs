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

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A thread-safe, reference-counted handle to a loaded resource.
///
/// Type-specific decoders live outside the runtime core, so the handle is
/// type-erased; consumers that know the concrete type recover it through
/// [`downcast_ref`](ResourceHandle::downcast_ref). Cloning is cheap and the
/// payload is dropped with the last handle.
#[derive(Clone)]
pub struct ResourceHandle(Arc<dyn Any + Send + Sync>);

impl ResourceHandle {
    /// Wraps a decoded resource.
    #[must_use]
    pub fn new<T: Send + Sync + 'static>(resource: T) -> Self {
        Self(Arc::new(resource))
    }

    /// Borrows the payload as a concrete type, if it is one.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Whether the payload is of the given concrete type.
    #[must_use]
    pub fn is<T: 'static>(&self) -> bool {
        self.0.is::<T>()
    }
}

impl fmt::Debug for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResourceHandle").finish()
    }
}

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

//! Batch resource loading.
//!
//! A batch is a heterogeneous set of load items (scripts, assets, libraries)
//! issued together and settling as one unit. Items complete independently,
//! asynchronously, and in unspecified order; the coordinator turns that
//! completion-order nondeterminism into a single deterministic terminal
//! settlement.

mod coordinator;

pub use coordinator::{BatchError, BatchReport, ResourceLoadCoordinator, SettledItem};

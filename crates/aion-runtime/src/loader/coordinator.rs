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

use std::fmt;
use std::sync::Arc;

use aion_core::asset::ResourceHandle;
use aion_core::error::LoadError;
use aion_core::load::{LoadOutcome, LoadableItem, ResourceLoader};
use aion_core::progress::ProgressTracker;

/// The first failure recorded across a batch.
///
/// Every failure is logged as it settles; the first one is carried on the
/// batch report so callers with a strict policy (library loading) can
/// escalate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchError {
    /// The locator of the item that failed first.
    pub locator: String,
    /// Description of that failure.
    pub detail: String,
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}': {}", self.locator, self.detail)
    }
}

impl std::error::Error for BatchError {}

/// One settled item together with its resource, when it succeeded.
#[derive(Debug)]
pub struct SettledItem {
    /// The item, with `loaded` and `outcome` reflecting its settlement.
    pub item: LoadableItem,
    /// The resolved resource for successful items.
    pub resource: Option<ResourceHandle>,
}

/// Produced exactly once per batch, after the last outstanding item settles.
#[derive(Debug)]
pub struct BatchReport {
    /// Every item of the batch, settled, in issue order.
    pub items: Vec<SettledItem>,
    /// The first failure, if any item failed. The batch still waited for
    /// every other item.
    pub error: Option<BatchError>,
}

impl BatchReport {
    /// Number of items that settled successfully.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|settled| settled.item.loaded).count()
    }

    /// Number of items that settled with a failure.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.items.len() - self.succeeded()
    }
}

struct Settlement {
    index: usize,
    group: usize,
    result: Result<ResourceHandle, LoadError>,
}

/// Coordinates one batch of independently-completing load operations.
///
/// Each item is submitted to the external [`ResourceLoader`] exactly once.
/// Settlements are delivered over a channel and drained by a single logical
/// consumer, so callbacks observe them one at a time regardless of how the
/// loader's tasks interleave. A cached item may settle before its siblings
/// are even issued; its settlement queues on the channel and the terminal
/// settlement still cannot fire until the drain has seen every item.
///
/// The application creates one coordinator per batch; the coordinator is
/// discarded when the batch settles, the loaded resources persist.
pub struct ResourceLoadCoordinator {
    loader: Arc<dyn ResourceLoader>,
}

impl ResourceLoadCoordinator {
    /// Creates a coordinator issuing against the given loader.
    #[must_use]
    pub fn new(loader: Arc<dyn ResourceLoader>) -> Self {
        Self { loader }
    }

    /// Loads a batch, invoking `on_item_settled` with the completed fraction
    /// after every settlement, and returns the report once — and only once —
    /// the whole batch has settled.
    ///
    /// `groups` partitions the batch; each group gets its own
    /// [`ProgressTracker`] and the reported fraction is
    /// `completed-across-all-trackers / total-across-all-trackers`. An empty
    /// batch reports a single `1.0` and settles immediately. A failing item
    /// does not abort the batch: it counts as settled, the first error is
    /// carried on the report, and every other item is still awaited.
    pub async fn load_batch(
        &self,
        groups: Vec<Vec<LoadableItem>>,
        mut on_item_settled: impl FnMut(f32) + Send,
    ) -> BatchReport {
        let mut trackers: Vec<ProgressTracker> = groups
            .iter()
            .map(|group| ProgressTracker::new(group.len()))
            .collect();

        let mut items: Vec<(usize, LoadableItem)> = Vec::new();
        for (group, group_items) in groups.into_iter().enumerate() {
            for item in group_items {
                items.push((group, item));
            }
        }
        let total = items.len();

        if total == 0 {
            on_item_settled(1.0);
            return BatchReport {
                items: Vec::new(),
                error: None,
            };
        }

        let (settlement_tx, settlement_rx) = flume::unbounded::<Settlement>();

        // Issue phase: every item exactly once. Loads that resolve
        // immediately (cache hits) queue their settlement; nothing is
        // drained until issuing is complete.
        for (index, (group, item)) in items.iter().enumerate() {
            let loader = Arc::clone(&self.loader);
            let tx = settlement_tx.clone();
            let locator = item.source_locator.clone();
            let kind = item.kind;
            let group = *group;
            tokio::spawn(async move {
                let result = loader.load(&locator, kind).await;
                let _ = tx.send(Settlement {
                    index,
                    group,
                    result,
                });
            });
        }
        drop(settlement_tx);

        let mut resources: Vec<Option<ResourceHandle>> = Vec::new();
        resources.resize_with(total, || None);
        let mut settled = vec![false; total];
        let mut settled_count = 0usize;
        let mut first_error: Option<BatchError> = None;

        while settled_count < total {
            let settlement = match settlement_rx.recv_async().await {
                Ok(settlement) => settlement,
                Err(_) => {
                    // A loader task died without reporting; nothing more will
                    // arrive, so the batch can never settle normally.
                    log::error!(
                        "Load batch lost {} settlement(s); settling early",
                        total - settled_count
                    );
                    break;
                }
            };

            // Latch against a double-fired settlement for the same item.
            if settled[settlement.index] {
                log::warn!(
                    "Duplicate settlement for '{}' ignored",
                    items[settlement.index].1.source_locator
                );
                continue;
            }
            settled[settlement.index] = true;
            settled_count += 1;
            trackers[settlement.group].increment();

            let item = &mut items[settlement.index].1;
            match settlement.result {
                Ok(resource) => {
                    item.loaded = true;
                    item.outcome = LoadOutcome::Success;
                    resources[settlement.index] = Some(resource);
                }
                Err(error) => {
                    log::warn!("Load item failed: {error}");
                    item.outcome = LoadOutcome::Failure {
                        detail: error.to_string(),
                    };
                    if first_error.is_none() {
                        first_error = Some(BatchError {
                            locator: item.source_locator.clone(),
                            detail: error.to_string(),
                        });
                    }
                }
            }

            on_item_settled(Self::fraction(&trackers));
        }

        let settled_items = items
            .into_iter()
            .zip(resources)
            .map(|((_, item), resource)| SettledItem { item, resource })
            .collect();

        BatchReport {
            items: settled_items,
            error: first_error,
        }
    }

    fn fraction(trackers: &[ProgressTracker]) -> f32 {
        let total: usize = trackers.iter().map(ProgressTracker::total).sum();
        if total == 0 {
            return 1.0;
        }
        let completed: usize = trackers.iter().map(ProgressTracker::completed).sum();
        completed as f32 / total as f32
    }
}

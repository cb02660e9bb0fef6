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

//! Completion accounting for a known-size set of asynchronous work items.

/// Counts completed items out of a known total.
///
/// A tracker is created fresh per batch and mutated only by
/// [`increment`](ProgressTracker::increment); it is never decremented.
/// An empty tracker (`total == 0`) is done immediately.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    total: usize,
    completed: usize,
}

impl ProgressTracker {
    /// Creates a tracker expecting `total` completions.
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            total,
            completed: 0,
        }
    }

    /// Records one completion.
    ///
    /// Incrementing past `total` is ignored and logged, preserving the
    /// `completed <= total` invariant against double-reported items.
    pub fn increment(&mut self) {
        if self.completed < self.total {
            self.completed += 1;
        } else {
            log::warn!(
                "ProgressTracker received more completions than its total of {}",
                self.total
            );
        }
    }

    /// Fraction of items completed, in `[0, 1]`.
    ///
    /// An empty tracker reports `1.0`.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f32 / self.total as f32
        }
    }

    /// Returns `true` once every expected item has completed.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.completed == self.total
    }

    /// The expected number of completions.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// The number of completions recorded so far.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tracker_is_done_immediately() {
        let tracker = ProgressTracker::new(0);
        assert!(tracker.is_done());
        assert_eq!(tracker.fraction(), 1.0);
    }

    #[test]
    fn fraction_advances_with_increments() {
        let mut tracker = ProgressTracker::new(4);
        assert!(!tracker.is_done());
        assert_eq!(tracker.fraction(), 0.0);

        tracker.increment();
        assert_eq!(tracker.fraction(), 0.25);
        tracker.increment();
        tracker.increment();
        assert_eq!(tracker.fraction(), 0.75);
        assert!(!tracker.is_done());

        tracker.increment();
        assert_eq!(tracker.fraction(), 1.0);
        assert!(tracker.is_done());
    }

    #[test]
    fn increment_past_total_is_ignored() {
        let mut tracker = ProgressTracker::new(1);
        tracker.increment();
        tracker.increment();
        assert_eq!(tracker.completed(), 1);
        assert_eq!(tracker.fraction(), 1.0);
    }
}

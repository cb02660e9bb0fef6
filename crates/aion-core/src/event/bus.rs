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

use log;

/// Manages a generic, thread-safe event channel.
///
/// The bus is generic over the event type `T` it transports, which keeps
/// `aion-core` decoupled from event types defined in higher-level crates.
/// Producers hold cloned senders; the bus owner consumes events either one at
/// a time through [`receiver`](EventBus::receiver) or a frame's worth at a
/// time through [`drain`](EventBus::drain).
#[derive(Debug)]
pub struct EventBus<T: Send + 'static> {
    sender: flume::Sender<T>,
    receiver: flume::Receiver<T>,
}

impl<T: Send + 'static> EventBus<T> {
    /// Creates a new bus backed by an unbounded channel.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    /// Sends an event, logging if the receiving half is gone.
    pub fn publish(&self, event: T) {
        if let Err(e) = self.sender.send(event) {
            log::error!("Failed to publish event: {e}. Receiver likely disconnected.");
        }
    }

    /// Returns a clone of the sender end of the channel, for parts of the
    /// system that need to publish without holding the bus itself.
    #[must_use]
    pub fn sender(&self) -> flume::Sender<T> {
        self.sender.clone()
    }

    /// Returns a reference to the receiver end of the channel. Intended for
    /// the owner of the bus to process events.
    #[must_use]
    pub fn receiver(&self) -> &flume::Receiver<T> {
        &self.receiver
    }

    /// Removes and returns every event currently queued, without blocking.
    #[must_use]
    pub fn drain(&self) -> Vec<T> {
        self.receiver.try_iter().collect()
    }

    /// Returns `true` if no events are queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl<T: Send + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HostEvent;
    use flume::TryRecvError;

    #[test]
    fn publish_then_drain_preserves_order() {
        let bus = EventBus::<HostEvent>::new();
        bus.publish(HostEvent::Resized {
            width: 800,
            height: 600,
        });
        bus.publish(HostEvent::VisibilityChanged { visible: false });
        bus.publish(HostEvent::RedrawRequested);

        let events = bus.drain();
        assert_eq!(
            events,
            vec![
                HostEvent::Resized {
                    width: 800,
                    height: 600
                },
                HostEvent::VisibilityChanged { visible: false },
                HostEvent::RedrawRequested,
            ]
        );
        assert!(bus.is_empty());
    }

    #[test]
    fn drain_on_empty_bus_returns_nothing() {
        let bus = EventBus::<HostEvent>::new();
        assert!(bus.drain().is_empty());
        assert_eq!(bus.receiver().try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn cloned_senders_feed_the_same_receiver() {
        let bus = EventBus::<HostEvent>::new();
        let sender = bus.sender();

        std::thread::spawn(move || {
            sender
                .send(HostEvent::VisibilityChanged { visible: true })
                .expect("send should succeed");
        })
        .join()
        .expect("sender thread should finish");

        let events = bus.drain();
        assert_eq!(events, vec![HostEvent::VisibilityChanged { visible: true }]);
    }

    #[test]
    fn publish_after_receiver_drop_does_not_panic() {
        let bus = EventBus::<HostEvent>::new();
        let sender = bus.sender();
        drop(bus);

        // The bus logs and carries on; the caller never observes the error.
        assert!(sender.send(HostEvent::RedrawRequested).is_err());
    }
}

//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use game_core::{Notification, NotificationSink};

use super::types::{EntityEvent, HeatEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Heat level and overheat lifecycle
    Heat,
    /// Entity movement and attack
    Entity,
}

impl Topic {
    pub const ALL: [Topic; 2] = [Topic::Heat, Topic::Entity];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Heat(HeatEvent),
    Entity(EntityEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Heat(_) => Topic::Heat,
            Event::Entity(_) => Topic::Entity,
        }
    }
}

/// Topic-based event bus
///
/// Publishing never blocks: each topic is a broadcast channel, so a send only
/// copies the event into the subscribers' buffers. Consumers read with
/// `try_recv` from a frame loop or `recv().await` from a task.
pub struct EventBus {
    channels: Arc<HashMap<Topic, broadcast::Sender<Event>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let channels = Topic::ALL
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity.max(1)).0))
            .collect();

        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();

        if let Some(tx) = self.channels.get(&topic)
            && tx.send(event).is_err()
        {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        // Every topic in Topic::ALL is created in with_capacity.
        &self.channels[&topic]
    }
}

impl NotificationSink for EventBus {
    fn notify(&mut self, notification: Notification) {
        self.publish(notification.into());
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{RoomId, Timestamp};

    #[test]
    fn routes_notifications_by_topic() {
        let mut bus = EventBus::new();
        let mut heat_rx = bus.subscribe(Topic::Heat);
        let mut entity_rx = bus.subscribe(Topic::Entity);

        bus.notify(Notification::OverheatStarted);
        bus.notify(Notification::EntityMoved {
            location: RoomId(4),
            at: Timestamp(10_000),
        });

        assert_eq!(
            heat_rx.try_recv().unwrap(),
            Event::Heat(HeatEvent::OverheatStarted)
        );
        assert!(heat_rx.try_recv().is_err());
        assert_eq!(
            entity_rx.try_recv().unwrap(),
            Event::Entity(EntityEvent::Moved {
                location: RoomId(4),
                at: Timestamp(10_000)
            })
        );
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::with_capacity(1);
        bus.publish(Event::Heat(HeatEvent::Changed { percent: 3 }));
    }

    #[test]
    fn clones_share_channels() {
        let bus = EventBus::new();
        let mut rx = bus.clone().subscribe(Topic::Heat);

        bus.publish(Event::Heat(HeatEvent::OverheatEnded));

        assert_eq!(rx.try_recv().unwrap(), Event::Heat(HeatEvent::OverheatEnded));
    }
}

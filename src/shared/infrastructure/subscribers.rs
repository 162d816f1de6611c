// Subscriber dispatch for committed events.
//
// Purpose
// - Let projections and side effects observe every event a store commits.
//
// Responsibilities
// - Keep handlers per event type in registration order.
// - Deliver each committed event to its handlers, in stream order, once.
// - Isolate handler failures: log and continue. The commit is never undone.

use crate::shared::core::primitives::DomainEvent;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;

#[async_trait]
pub trait Subscriber<Event>: Send + Sync {
    async fn handle(&self, event: &Event) -> anyhow::Result<()>;
}

pub struct Subscribers<Event> {
    handlers: RwLock<Vec<(&'static str, Arc<dyn Subscriber<Event>>)>>,
}

impl<Event> Default for Subscribers<Event> {
    fn default() -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
        }
    }
}

impl<Event: DomainEvent> Subscribers<Event> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, event_type: &'static str, handler: Arc<dyn Subscriber<Event>>) {
        self.handlers.write().push((event_type, handler));
    }

    pub fn len(&self) -> usize {
        self.handlers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.read().is_empty()
    }

    /// Deliver `events` to their handlers and return how many deliveries failed.
    pub async fn dispatch(&self, events: &[Event]) -> usize {
        let mut failed = 0;
        for event in events {
            // Clone the matching handlers out so no lock is held across an await.
            let handlers: Vec<Arc<dyn Subscriber<Event>>> = self
                .handlers
                .read()
                .iter()
                .filter(|(event_type, _)| *event_type == event.event_type())
                .map(|(_, handler)| Arc::clone(handler))
                .collect();

            for handler in handlers {
                if let Err(error) = handler.handle(event).await {
                    failed += 1;
                    tracing::warn!(
                        aggregate_id = %event.aggregate_id(),
                        event_type = event.event_type(),
                        error = %error,
                        "subscriber failed to handle committed event"
                    );
                }
            }
        }
        failed
    }
}

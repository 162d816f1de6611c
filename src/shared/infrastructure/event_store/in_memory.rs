// In memory implementation of the EventStore port.
//
// Purpose
// - Support command handler tests and single-process use without a database.
//
// Responsibilities
// - Keep one independently swappable event list per aggregate.
// - Enforce optimistic concurrency by checking the expected version, then publish the
//   extended list with a compare-and-swap. A lost swap re-reads and re-checks.
//
// Invariants
// - A published list is never mutated. Readers holding it keep a consistent snapshot.
// - The arena lock only guards slot lookup and creation, never an append.

use crate::shared::core::primitives::{AggregateId, DomainEvent};
use crate::shared::infrastructure::event_store::{
    EventStore, EventStoreError, LoadedStream, ensure_single_aggregate,
};
use crate::shared::infrastructure::subscribers::Subscribers;
use arc_swap::ArcSwap;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

struct StreamSlot<Event> {
    events: ArcSwap<Vec<Event>>,
}

impl<Event> StreamSlot<Event> {
    fn new() -> Self {
        Self {
            events: ArcSwap::from_pointee(Vec::new()),
        }
    }
}

pub struct InMemoryEventStore<Event: DomainEvent> {
    streams: RwLock<HashMap<AggregateId, Arc<StreamSlot<Event>>>>,
    subscribers: Subscribers<Event>,
}

impl<Event: DomainEvent> Default for InMemoryEventStore<Event> {
    fn default() -> Self {
        Self {
            streams: RwLock::new(HashMap::new()),
            subscribers: Subscribers::new(),
        }
    }
}

impl<Event: DomainEvent> InMemoryEventStore<Event> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of aggregates with a stream slot.
    pub fn stream_count(&self) -> usize {
        self.streams.read().len()
    }

    fn existing_slot(&self, aggregate_id: AggregateId) -> Option<Arc<StreamSlot<Event>>> {
        self.streams.read().get(&aggregate_id).map(Arc::clone)
    }

    fn slot(&self, aggregate_id: AggregateId) -> Arc<StreamSlot<Event>> {
        if let Some(slot) = self.existing_slot(aggregate_id) {
            return slot;
        }
        let mut streams = self.streams.write();
        Arc::clone(
            streams
                .entry(aggregate_id)
                .or_insert_with(|| Arc::new(StreamSlot::new())),
        )
    }
}

#[async_trait::async_trait]
impl<Event> EventStore<Event> for InMemoryEventStore<Event>
where
    Event: DomainEvent,
{
    async fn load(&self, aggregate_id: AggregateId) -> Result<LoadedStream<Event>, EventStoreError> {
        let Some(slot) = self.existing_slot(aggregate_id) else {
            return Ok(LoadedStream::empty());
        };
        let snapshot = slot.events.load_full();
        Ok(LoadedStream {
            events: snapshot.as_ref().clone(),
            version: snapshot.len() as u64,
        })
    }

    async fn append(
        &self,
        aggregate_id: AggregateId,
        expected_version: u64,
        new_events: &[Event],
    ) -> Result<(), EventStoreError> {
        ensure_single_aggregate(aggregate_id, new_events)?;
        let slot = self.slot(aggregate_id);

        loop {
            let current = slot.events.load_full();
            let actual = current.len() as u64;
            if actual != expected_version {
                return Err(EventStoreError::VersionMismatch {
                    aggregate_id,
                    expected: expected_version,
                    actual,
                });
            }
            if new_events.is_empty() {
                return Ok(());
            }

            let mut next = Vec::with_capacity(current.len() + new_events.len());
            next.extend(current.iter().cloned());
            next.extend_from_slice(new_events);

            let previous = slot.events.compare_and_swap(&current, Arc::new(next));
            if Arc::ptr_eq(&current, &*previous) {
                break;
            }
            tracing::trace!(%aggregate_id, expected_version, "lost compare-and-swap, retrying");
        }

        tracing::debug!(
            %aggregate_id,
            from_version = expected_version,
            count = new_events.len(),
            "appended events"
        );
        self.subscribers.dispatch(new_events).await;
        Ok(())
    }

    fn subscribers(&self) -> &Subscribers<Event> {
        &self.subscribers
    }
}

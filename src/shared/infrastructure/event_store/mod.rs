// Event store port.
//
// Purpose
// - Durably record the events of one aggregate and replay them in commit order.
//
// Contract
// - `load` returns the committed events of an aggregate in sequence order; its version is their count.
// - `append` commits a whole batch only if `expected_version` equals the current version, otherwise nothing.
// - Committed events are dispatched to subscribers after the commit, outside of it.
//
// Implementations
// - in_memory: lock-free compare-and-swap per aggregate, for tests and single-process use.
// - sql: SQLite through sqlx, the primary key on (aggregate_id, sequence_number) guards concurrent writers.

use crate::shared::core::primitives::{AggregateId, DomainEvent};
use crate::shared::infrastructure::codec::CodecError;
use crate::shared::infrastructure::subscribers::{Subscriber, Subscribers};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

pub mod in_memory;
pub mod sql;

#[derive(Debug, Error)]
pub enum EventStoreError {
    #[error("version mismatch on {aggregate_id}: expected {expected}, actual {actual}")]
    VersionMismatch {
        aggregate_id: AggregateId,
        expected: u64,
        actual: u64,
    },

    #[error("sequence conflict on {aggregate_id}: events from {expected} were committed concurrently")]
    SequenceConflict {
        aggregate_id: AggregateId,
        expected: u64,
    },

    #[error("event for {found} cannot be appended to {expected}")]
    AggregateMismatch {
        expected: AggregateId,
        found: AggregateId,
    },

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[source] sqlx::Error),

    #[error("invalid storage configuration: {0}")]
    Configuration(#[source] sqlx::Error),
}

impl EventStoreError {
    /// Another writer got there first. Re-load, re-decide and append again.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::VersionMismatch { .. } | Self::SequenceConflict { .. }
        )
    }

    /// Retrying the whole load, decide, append cycle may succeed.
    pub fn is_retryable(&self) -> bool {
        self.is_conflict() || matches!(self, Self::StorageUnavailable(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedStream<E> {
    pub events: Vec<E>,
    pub version: u64,
}

impl<E> LoadedStream<E> {
    pub fn empty() -> Self {
        Self {
            events: Vec::new(),
            version: 0,
        }
    }
}

/// An event as it was committed: its position in the stream and the commit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent<E> {
    pub aggregate_id: AggregateId,
    pub sequence_number: u64,
    pub recorded_at: DateTime<Utc>,
    pub event: E,
}

#[async_trait]
pub trait EventStore<Event: DomainEvent>: Send + Sync {
    async fn load(&self, aggregate_id: AggregateId) -> Result<LoadedStream<Event>, EventStoreError>;

    async fn append(
        &self,
        aggregate_id: AggregateId,
        expected_version: u64,
        new_events: &[Event],
    ) -> Result<(), EventStoreError>;

    fn subscribers(&self) -> &Subscribers<Event>;

    fn subscribe(&self, event_type: &'static str, handler: Arc<dyn Subscriber<Event>>) {
        self.subscribers().subscribe(event_type, handler);
    }
}

/// Every event in a batch must belong to the aggregate it is appended to.
pub(crate) fn ensure_single_aggregate<Event: DomainEvent>(
    aggregate_id: AggregateId,
    new_events: &[Event],
) -> Result<(), EventStoreError> {
    match new_events
        .iter()
        .map(|event| event.aggregate_id())
        .find(|found| *found != aggregate_id)
    {
        Some(found) => Err(EventStoreError::AggregateMismatch {
            expected: aggregate_id,
            found,
        }),
        None => Ok(()),
    }
}

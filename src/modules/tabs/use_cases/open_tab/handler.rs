// OpenTab command handler orchestrates the write flow.
//
// Responsibilities
// - Load past events from the event store and fold them into state.
// - Call the decider with the command.
// - Append new events with the version observed at load time.
//
// A concurrency conflict is returned to the caller, never retried here.

use crate::modules::tabs::core::events::TabEvent;
use crate::modules::tabs::core::evolve::evolve;
use crate::modules::tabs::core::state::TabState;
use crate::modules::tabs::use_cases::open_tab::command::OpenTab;
use crate::modules::tabs::use_cases::open_tab::decide::decide_open_tab;
use crate::modules::tabs::use_cases::open_tab::decision::{DecideError, Decision};
use crate::shared::infrastructure::event_store::{EventStore, EventStoreError};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    EventStore(#[from] EventStoreError),

    #[error("domain rejected: {0}")]
    Domain(#[from] DecideError),
}

impl ApplicationError {
    /// Reloading and handling the command again may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::EventStore(error) if error.is_retryable())
    }
}

pub struct OpenTabHandler<TEventStore>
where
    TEventStore: EventStore<TabEvent> + 'static,
{
    event_store: Arc<TEventStore>,
}

impl<TEventStore> OpenTabHandler<TEventStore>
where
    TEventStore: EventStore<TabEvent> + 'static,
{
    pub fn new(event_store: Arc<TEventStore>) -> Self {
        Self { event_store }
    }

    pub async fn handle(&self, command: OpenTab) -> Result<Vec<TabEvent>, ApplicationError> {
        let aggregate_id = command.id;
        let stream = self.event_store.load(aggregate_id).await?;

        let state = stream
            .events
            .iter()
            .cloned()
            .fold(TabState::None, evolve);

        match decide_open_tab(&state, command) {
            Decision::Accepted { events } => {
                self.event_store
                    .append(aggregate_id, stream.version, &events)
                    .await?;
                Ok(events)
            }
            Decision::Rejected { reason } => Err(ApplicationError::Domain(reason)),
        }
    }
}

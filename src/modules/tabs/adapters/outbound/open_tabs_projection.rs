// In memory read model of open tabs, kept current by subscribing to committed tab events.
//
// Purpose
// - Answer "which tabs are open and who serves them" without replaying streams.
//
// Responsibilities
// - Apply each committed TabOpenedV1 once per tab. A redelivered event leaves the row untouched.

use crate::modules::tabs::core::events::{TAB_OPENED_V1, TabEvent};
use crate::shared::core::primitives::AggregateId;
use crate::shared::infrastructure::event_store::EventStore;
use crate::shared::infrastructure::subscribers::Subscriber;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTabRow {
    pub id: AggregateId,
    pub table_number: u32,
    pub waiter: String,
}

#[derive(Default)]
pub struct OpenTabsProjection {
    rows: RwLock<BTreeMap<AggregateId, OpenTabRow>>,
}

impl OpenTabsProjection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fresh projection with `event_store` and return it.
    pub fn attach<S: EventStore<TabEvent>>(event_store: &S) -> Arc<Self> {
        let projection = Arc::new(Self::new());
        event_store.subscribe(TAB_OPENED_V1, projection.clone());
        projection
    }

    pub fn get(&self, id: AggregateId) -> Option<OpenTabRow> {
        self.rows.read().get(&id).cloned()
    }

    pub fn list(&self) -> Vec<OpenTabRow> {
        self.rows.read().values().cloned().collect()
    }

    pub fn tables_for_waiter(&self, waiter: &str) -> Vec<u32> {
        self.rows
            .read()
            .values()
            .filter(|row| row.waiter == waiter)
            .map(|row| row.table_number)
            .collect()
    }
}

#[async_trait::async_trait]
impl Subscriber<TabEvent> for OpenTabsProjection {
    async fn handle(&self, event: &TabEvent) -> anyhow::Result<()> {
        match event {
            TabEvent::TabOpenedV1(e) => {
                self.rows.write().entry(e.id).or_insert_with(|| OpenTabRow {
                    id: e.id,
                    table_number: e.table_number,
                    waiter: e.waiter.clone(),
                });
            }
        }
        Ok(())
    }
}

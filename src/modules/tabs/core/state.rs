// TabState is the domain state of one tab after folding its events.
//
// Boundaries
// - No input or output here. Keep it framework-free.

use crate::shared::core::primitives::AggregateId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabState {
    None,
    Open {
        id: AggregateId,
        table_number: u32,
        waiter: String,
    },
}

impl TabState {
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }
}

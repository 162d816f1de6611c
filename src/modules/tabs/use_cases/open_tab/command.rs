use crate::shared::core::primitives::AggregateId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTab {
    pub id: AggregateId,
    pub table_number: u32,
    pub waiter: String,
}

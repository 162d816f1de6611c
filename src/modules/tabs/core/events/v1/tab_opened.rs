use crate::shared::core::primitives::AggregateId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TabOpenedV1 {
    pub id: AggregateId,
    pub table_number: u32,
    pub waiter: String,
}

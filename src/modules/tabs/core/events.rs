// Root event enumeration for tabs and re-exports of versioned payloads.
//
// Versioning and evolution
// - Prefer additive changes. If a breaking change is needed, add a new version and a new variant.
// - Do not change the meaning of historical events. They are replayed from the store as written.

use crate::shared::core::primitives::{AggregateId, DomainEvent};

pub mod v1 {
    pub mod tab_opened;
}

pub const TAB_OPENED_V1: &str = "TabOpenedV1";

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum TabEvent {
    TabOpenedV1(v1::tab_opened::TabOpenedV1),
}

impl DomainEvent for TabEvent {
    const AGGREGATE_TYPE: &'static str = "Tab";
    const EVENT_TYPES: &'static [&'static str] = &[TAB_OPENED_V1];

    fn aggregate_id(&self) -> AggregateId {
        match self {
            Self::TabOpenedV1(e) => e.id,
        }
    }

    fn event_type(&self) -> &'static str {
        match self {
            Self::TabOpenedV1(_) => TAB_OPENED_V1,
        }
    }
}

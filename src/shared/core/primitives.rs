// Primitives shared by every aggregate and every store.
//
// Purpose
// - Give aggregate identifiers a type of their own.
// - Describe what an event must expose so stores can index it without knowing its shape.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregateId(Uuid);

impl AggregateId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub const fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for AggregateId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for AggregateId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for AggregateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Capability every stored event type provides.
///
/// `EVENT_TYPES` lists every tag `event_type` can return; codecs use it to
/// reject rows they do not know how to decode.
pub trait DomainEvent: Clone + Send + Sync + 'static {
    const AGGREGATE_TYPE: &'static str;
    const EVENT_TYPES: &'static [&'static str];

    fn aggregate_id(&self) -> AggregateId;
    fn event_type(&self) -> &'static str;
}

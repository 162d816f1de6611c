use crate::shared::core::primitives::{AggregateId, DomainEvent};
use serde::{Deserialize, Serialize};

/// Two-variant event used to exercise the stores independently of any aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TestEvent {
    Created { id: AggregateId, name: String },
    Renamed { id: AggregateId, name: String },
}

impl DomainEvent for TestEvent {
    const AGGREGATE_TYPE: &'static str = "Test";
    const EVENT_TYPES: &'static [&'static str] = &["Created", "Renamed"];

    fn aggregate_id(&self) -> AggregateId {
        match self {
            Self::Created { id, .. } | Self::Renamed { id, .. } => *id,
        }
    }

    fn event_type(&self) -> &'static str {
        match self {
            Self::Created { .. } => "Created",
            Self::Renamed { .. } => "Renamed",
        }
    }
}

pub fn created(id: AggregateId, name: &str) -> TestEvent {
    TestEvent::Created {
        id,
        name: name.to_string(),
    }
}

pub fn renamed(id: AggregateId, name: &str) -> TestEvent {
    TestEvent::Renamed {
        id,
        name: name.to_string(),
    }
}

pub fn make_created() -> TestEvent {
    created(AggregateId::new(), "Teddy Test")
}

pub fn make_renamed() -> TestEvent {
    renamed(AggregateId::new(), "Teddy Renamed")
}

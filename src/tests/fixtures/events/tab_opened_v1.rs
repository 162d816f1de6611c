use crate::modules::tabs::core::events::v1::tab_opened::TabOpenedV1;
use crate::shared::core::primitives::AggregateId;

pub fn make_tab_opened_v1_event() -> TabOpenedV1 {
    make_tab_opened_v1_event_for(AggregateId::new())
}

pub fn make_tab_opened_v1_event_for(id: AggregateId) -> TabOpenedV1 {
    TabOpenedV1 {
        id,
        table_number: 42,
        waiter: "Derek".to_string(),
    }
}

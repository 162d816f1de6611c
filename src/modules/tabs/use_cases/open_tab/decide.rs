// Decide: pure translation of an OpenTab command against the current state into events.
//
// Boundaries
// - No input or output. The handler loads state and persists what is decided here.

use crate::modules::tabs::core::events::TabEvent;
use crate::modules::tabs::core::events::v1::tab_opened::TabOpenedV1;
use crate::modules::tabs::core::state::TabState;
use crate::modules::tabs::use_cases::open_tab::command::OpenTab;
use crate::modules::tabs::use_cases::open_tab::decision::{DecideError, Decision};

pub fn decide_open_tab(state: &TabState, command: OpenTab) -> Decision {
    match state {
        TabState::Open { .. } => Decision::Rejected {
            reason: DecideError::TabAlreadyOpen,
        },
        TabState::None => Decision::Accepted {
            events: vec![TabEvent::TabOpenedV1(TabOpenedV1 {
                id: command.id,
                table_number: command.table_number,
                waiter: command.waiter,
            })],
        },
    }
}

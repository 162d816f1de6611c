// Evolve: combine a prior state with a new event to produce the next state.
//
// Boundaries
// - No input or output. No side effects. Replaying a stream must always yield the same state.

use crate::modules::tabs::core::events::TabEvent;
use crate::modules::tabs::core::state::TabState;

pub fn evolve(state: TabState, event: TabEvent) -> TabState {
    match (state, event) {
        (TabState::None, TabEvent::TabOpenedV1(e)) => TabState::Open {
            id: e.id,
            table_number: e.table_number,
            waiter: e.waiter,
        },
        (state, _) => state,
    }
}

#[cfg(test)]
mod tab_evolve_tests {
    use super::*;
    use crate::modules::tabs::core::events::v1::tab_opened::TabOpenedV1;
    use crate::tests::fixtures::events::tab_opened_v1::make_tab_opened_v1_event;
    use rstest::{fixture, rstest};

    #[fixture]
    fn opened_event() -> TabOpenedV1 {
        make_tab_opened_v1_event()
    }

    #[rstest]
    fn it_should_evolve_the_state_to_open(opened_event: TabOpenedV1) {
        let state = evolve(TabState::None, TabEvent::TabOpenedV1(opened_event.clone()));
        assert_eq!(
            state,
            TabState::Open {
                id: opened_event.id,
                table_number: 42,
                waiter: "Derek".to_string(),
            }
        );
    }

    #[rstest]
    fn it_should_not_change_on_a_second_opened_event(opened_event: TabOpenedV1) {
        let open = evolve(TabState::None, TabEvent::TabOpenedV1(opened_event.clone()));
        let reopened = TabOpenedV1 {
            table_number: 7,
            waiter: "Someone Else".to_string(),
            ..opened_event
        };
        let next = evolve(open.clone(), TabEvent::TabOpenedV1(reopened));
        assert_eq!(next, open, "state should be unchanged by fallback arm");
    }

    #[rstest]
    fn it_should_fold_a_stream_in_order(opened_event: TabOpenedV1) {
        let events = vec![TabEvent::TabOpenedV1(opened_event.clone())];
        let state = events.into_iter().fold(TabState::None, evolve);
        assert!(state.is_open());
    }
}

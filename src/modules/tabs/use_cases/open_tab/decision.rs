use crate::modules::tabs::core::events::TabEvent;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("tab is already open")]
    TabAlreadyOpen,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Decision {
    Accepted { events: Vec<TabEvent> },
    Rejected { reason: DecideError },
}

use crate::modules::tabs::use_cases::open_tab::command::OpenTab;
use crate::shared::core::primitives::AggregateId;

pub struct OpenTabBuilder {
    id: AggregateId,
    table_number: u32,
    waiter: String,
}

impl OpenTabBuilder {
    pub fn new() -> Self {
        Self {
            id: AggregateId::new(),
            table_number: 42,
            waiter: "Derek".to_string(),
        }
    }

    pub fn id(mut self, id: AggregateId) -> Self {
        self.id = id;
        self
    }

    pub fn table_number(mut self, table_number: u32) -> Self {
        self.table_number = table_number;
        self
    }

    pub fn waiter(mut self, waiter: impl Into<String>) -> Self {
        self.waiter = waiter.into();
        self
    }

    pub fn build(self) -> OpenTab {
        OpenTab {
            id: self.id,
            table_number: self.table_number,
            waiter: self.waiter,
        }
    }
}

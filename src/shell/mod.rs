// Composition root for the tabs bounded context.
//
// Responsibilities
// - Read config from the environment.
// - Install the tracing subscriber.
// - Instantiate the durable event store and wire subscribers and handlers to it.

use crate::config::EventStoreConfig;
use crate::modules::tabs::adapters::outbound::open_tabs_projection::OpenTabsProjection;
use crate::modules::tabs::core::events::TabEvent;
use crate::modules::tabs::use_cases::open_tab::handler::OpenTabHandler;
use crate::shared::infrastructure::codec::json::JsonCodec;
use crate::shared::infrastructure::event_store::EventStoreError;
use crate::shared::infrastructure::event_store::sql::SqlEventStore;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub type TabEventStore = SqlEventStore<TabEvent, JsonCodec<TabEvent>>;

pub struct App {
    pub event_store: Arc<TabEventStore>,
    pub open_tabs: Arc<OpenTabsProjection>,
    pub open_tab_handler: OpenTabHandler<TabEventStore>,
}

/// Install a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

pub async fn build(config: &EventStoreConfig) -> Result<App, EventStoreError> {
    let event_store = Arc::new(TabEventStore::connect(config, JsonCodec::new()).await?);
    event_store.ensure_schema().await?;
    let open_tabs = OpenTabsProjection::attach(event_store.as_ref());
    let open_tab_handler = OpenTabHandler::new(event_store.clone());
    Ok(App {
        event_store,
        open_tabs,
        open_tab_handler,
    })
}

use cafe_tabs::config::EventStoreConfig;
use cafe_tabs::modules::tabs::use_cases::open_tab::command::OpenTab;
use cafe_tabs::shared::core::primitives::AggregateId;
use cafe_tabs::shared::infrastructure::event_store::EventStore;
use cafe_tabs::shell;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    shell::init_tracing();

    let config = EventStoreConfig::from_env()?;
    let app = shell::build(&config).await?;

    let id = AggregateId::new();
    app.open_tab_handler
        .handle(OpenTab {
            id,
            table_number: 42,
            waiter: "Derek".to_string(),
        })
        .await?;

    let stream = app.event_store.load(id).await?;
    tracing::info!(tab = %id, version = stream.version, "tab opened");
    for row in app.open_tabs.list() {
        tracing::info!(tab = %row.id, table = row.table_number, waiter = %row.waiter, "open tab");
    }

    app.event_store.close().await;
    Ok(())
}

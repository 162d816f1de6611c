// SQLite implementation of the EventStore port.
//
// Purpose
// - Persist event streams across process restarts with the same contract as the in memory store.
//
// Responsibilities
// - Register the aggregate and insert the whole batch in one transaction. Registering comes
//   first so the transaction holds the write lock before it reads the stream length.
// - Check the stream length inside the transaction, so a caller that overshoots cannot leave a gap.
// - Rely on the primary key (aggregate_id, sequence_number) to reject a concurrent writer that
//   passed the same check.
// - Decode rows lazily and in sequence order when reading.
//
// Error mapping
// - Count differs from the expected version: VersionMismatch.
// - Primary key collision: SequenceConflict.
// - Anything else reported by sqlx (closed or exhausted pool, busy database, I/O): StorageUnavailable.
//   The transaction is dropped on every error path, which rolls it back.

use crate::config::{DEFAULT_BATCH_SIZE, EventStoreConfig};
use crate::shared::core::primitives::{AggregateId, DomainEvent};
use crate::shared::infrastructure::codec::{EncodedEvent, EventCodec};
use crate::shared::infrastructure::event_store::{
    EventStore, EventStoreError, LoadedStream, RecordedEvent, ensure_single_aggregate,
};
use crate::shared::infrastructure::subscribers::Subscribers;
use chrono::{DateTime, Utc};
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use sqlx::error::DatabaseError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Executor, QueryBuilder, Sqlite};
use std::marker::PhantomData;
use std::str::FromStr;
use uuid::Uuid;

const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS aggregates (
    id BLOB PRIMARY KEY NOT NULL,
    aggregate_type TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS events (
    aggregate_id BLOB NOT NULL REFERENCES aggregates (id),
    sequence_number INTEGER NOT NULL,
    event_type TEXT NOT NULL,
    body BLOB NOT NULL,
    recorded_at TEXT NOT NULL,
    PRIMARY KEY (aggregate_id, sequence_number)
);
";

const SELECT_STREAM: &str = r"
SELECT aggregate_id, sequence_number, event_type, body, recorded_at
FROM events
WHERE aggregate_id = ?
ORDER BY sequence_number";

const COUNT_STREAM: &str = "SELECT COUNT(*) FROM events WHERE aggregate_id = ?";

const REGISTER_AGGREGATE: &str =
    "INSERT INTO aggregates (id, aggregate_type) VALUES (?, ?) ON CONFLICT (id) DO NOTHING";

const INSERT_EVENTS: &str =
    "INSERT INTO events (aggregate_id, sequence_number, event_type, body, recorded_at) ";

// SQLite extended result codes for UNIQUE and PRIMARY KEY constraint failures.
const SQLITE_CONSTRAINT_CODES: [&str; 2] = ["2067", "1555"];

#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    aggregate_id: Uuid,
    sequence_number: i64,
    event_type: String,
    body: Vec<u8>,
    recorded_at: DateTime<Utc>,
}

pub struct SqlEventStore<Event, Codec> {
    pool: SqlitePool,
    codec: Codec,
    batch_size: usize,
    subscribers: Subscribers<Event>,
    _event: PhantomData<fn() -> Event>,
}

impl<Event, Codec> SqlEventStore<Event, Codec>
where
    Event: DomainEvent,
    Codec: EventCodec<Event>,
{
    pub fn from_pool(pool: SqlitePool, codec: Codec) -> Self {
        Self {
            pool,
            codec,
            batch_size: DEFAULT_BATCH_SIZE,
            subscribers: Subscribers::new(),
            _event: PhantomData,
        }
    }

    /// Open a pool for `config.url` and wrap it.
    ///
    /// An in-memory database exists per connection, so its pool is pinned to one long-lived connection.
    pub async fn connect(config: &EventStoreConfig, codec: Codec) -> Result<Self, EventStoreError> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(EventStoreError::Configuration)?
            .create_if_missing(true);

        let in_memory = config.url.contains(":memory:") || config.url.contains("mode=memory");
        let max_connections = if in_memory { 1 } else { config.max_connections };
        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(config.acquire_timeout);
        if in_memory {
            pool_options = pool_options
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(EventStoreError::StorageUnavailable)?;

        tracing::info!(
            max_connections,
            in_memory,
            "connected to SQLite event store"
        );
        Ok(Self::from_pool(pool, codec).with_batch_size(config.batch_size))
    }

    #[must_use]
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Create the `aggregates` and `events` tables if they do not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), EventStoreError> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(EventStoreError::StorageUnavailable)?;
        Ok(())
    }

    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("SQLite event store closed");
    }

    pub async fn version(&self, aggregate_id: AggregateId) -> Result<u64, EventStoreError> {
        count_events(&self.pool, aggregate_id)
            .await
            .map_err(EventStoreError::StorageUnavailable)
    }

    /// Stream the committed events of `aggregate_id` in sequence order.
    ///
    /// Rows are fetched and decoded as the stream is polled. The stream is single-pass;
    /// call again to read the aggregate afresh.
    pub fn read_stream(
        &self,
        aggregate_id: AggregateId,
    ) -> BoxStream<'_, Result<RecordedEvent<Event>, EventStoreError>> {
        sqlx::query_as::<_, EventRow>(SELECT_STREAM)
            .bind(aggregate_id.into_uuid())
            .fetch(&self.pool)
            .map(move |row| self.decode_row(row.map_err(EventStoreError::StorageUnavailable)?))
            .boxed()
    }

    fn decode_row(&self, row: EventRow) -> Result<RecordedEvent<Event>, EventStoreError> {
        let event = self.codec.decode(&row.event_type, &row.body)?;
        Ok(RecordedEvent {
            aggregate_id: AggregateId::from_uuid(row.aggregate_id),
            sequence_number: u64::try_from(row.sequence_number).unwrap_or_default(),
            recorded_at: row.recorded_at,
            event,
        })
    }
}

#[async_trait::async_trait]
impl<Event, Codec> EventStore<Event> for SqlEventStore<Event, Codec>
where
    Event: DomainEvent,
    Codec: EventCodec<Event>,
{
    async fn load(&self, aggregate_id: AggregateId) -> Result<LoadedStream<Event>, EventStoreError> {
        let events: Vec<Event> = self
            .read_stream(aggregate_id)
            .map_ok(|recorded| recorded.event)
            .try_collect()
            .await?;
        let version = events.len() as u64;
        tracing::debug!(%aggregate_id, version, "loaded events");
        Ok(LoadedStream { events, version })
    }

    async fn append(
        &self,
        aggregate_id: AggregateId,
        expected_version: u64,
        new_events: &[Event],
    ) -> Result<(), EventStoreError> {
        ensure_single_aggregate(aggregate_id, new_events)?;
        let encoded = new_events
            .iter()
            .map(|event| self.codec.encode(event))
            .collect::<Result<Vec<EncodedEvent>, _>>()?;
        let recorded_at = Utc::now();
        let id = aggregate_id.into_uuid();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(EventStoreError::StorageUnavailable)?;

        // Writing first takes the database write lock, so the count below cannot go stale.
        sqlx::query(REGISTER_AGGREGATE)
            .bind(id)
            .bind(Event::AGGREGATE_TYPE)
            .execute(&mut *tx)
            .await
            .map_err(|error| write_error(error, aggregate_id, expected_version))?;

        let actual = count_events(&mut *tx, aggregate_id)
            .await
            .map_err(EventStoreError::StorageUnavailable)?;
        if actual != expected_version {
            return Err(EventStoreError::VersionMismatch {
                aggregate_id,
                expected: expected_version,
                actual,
            });
        }
        if encoded.is_empty() {
            return Ok(());
        }

        // The count above matched, so it fits in the column type.
        let first_sequence = i64::try_from(actual).unwrap_or(i64::MAX);
        let numbered: Vec<(i64, EncodedEvent)> = (first_sequence..).zip(encoded).collect();
        for chunk in numbered.chunks(self.batch_size) {
            let mut insert = QueryBuilder::<Sqlite>::new(INSERT_EVENTS);
            insert.push_values(chunk, |mut row, (sequence_number, event)| {
                row.push_bind(id)
                    .push_bind(*sequence_number)
                    .push_bind(event.event_type.clone())
                    .push_bind(event.body.clone())
                    .push_bind(recorded_at);
            });
            insert
                .build()
                .execute(&mut *tx)
                .await
                .map_err(|error| write_error(error, aggregate_id, expected_version))?;
        }

        tx.commit()
            .await
            .map_err(|error| write_error(error, aggregate_id, expected_version))?;

        tracing::debug!(
            %aggregate_id,
            from_version = expected_version,
            count = new_events.len(),
            "committed events"
        );
        self.subscribers.dispatch(new_events).await;
        Ok(())
    }

    fn subscribers(&self) -> &Subscribers<Event> {
        &self.subscribers
    }
}

async fn count_events<'c, E>(executor: E, aggregate_id: AggregateId) -> Result<u64, sqlx::Error>
where
    E: Executor<'c, Database = Sqlite>,
{
    let count = sqlx::query_scalar::<_, i64>(COUNT_STREAM)
        .bind(aggregate_id.into_uuid())
        .fetch_one(executor)
        .await?;
    Ok(u64::try_from(count).unwrap_or_default())
}

fn write_error(error: sqlx::Error, aggregate_id: AggregateId, expected: u64) -> EventStoreError {
    match &error {
        sqlx::Error::Database(database_error) if is_sequence_collision(database_error.as_ref()) => {
            tracing::debug!(%aggregate_id, expected, "sequence number already taken");
            EventStoreError::SequenceConflict {
                aggregate_id,
                expected,
            }
        }
        _ => EventStoreError::StorageUnavailable(error),
    }
}

fn is_sequence_collision(error: &dyn DatabaseError) -> bool {
    error.is_unique_violation()
        || error
            .code()
            .is_some_and(|code| SQLITE_CONSTRAINT_CODES.iter().any(|known| code == *known))
}

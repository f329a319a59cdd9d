use async_trait::async_trait;
use rusqlite::params;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;
use crate::gateway::events::EventPublisher;
use crate::utils::date::to_micros;
use crate::utils::sqlite::SqliteClient;

// SqlitePublisher appends domain events to an events table next to the books
#[derive(Debug)]
pub struct SqlitePublisher {
    client: SqliteClient,
    table_name: String,
}

impl SqlitePublisher {
    pub(crate) fn new(client: SqliteClient, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl EventPublisher for SqlitePublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError> {
        let sql = format!("INSERT INTO {} (event_id, name, event_group, event_key, kind, metadata, json_data, created_at) \
                           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)", self.table_name);
        let metadata = serde_json::to_string(&event.metadata)?;
        let values = (event.event_id.clone(), event.name.clone(), event.group.clone(), event.key.clone(),
                      event.kind.as_str(), metadata, event.json_data.clone(), to_micros(&event.created_at));
        self.client.call(move |conn| {
            conn.execute(&sql, params![values.0, values.1, values.2, values.3, values.4, values.5, values.6, values.7])
                .map(|_| ()).map_err(LibraryError::from)
        }).await
    }
}

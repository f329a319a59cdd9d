use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryResult, PageRequest, PaginatedResult, Partition};
use crate::gateway::GatewayPublisherVia;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity, returns the stored copy with the identity assigned by the store
    async fn create(&self, entity: &Entity) -> LibraryResult<Entity>;

    // updates mutable fields of an active entity, the identity carried by entity is never written
    async fn update(&self, id: i64, entity: &Entity) -> LibraryResult<Entity>;

    // get an entity from any partition
    async fn get(&self, id: i64) -> LibraryResult<Option<Entity>>;

    // permanently delete an entity, only when it currently sits in the given partition
    async fn delete(&self, id: i64, partition: Partition) -> LibraryResult<usize>;

    // find a page of a partition whose title contains the query
    async fn query(&self, partition: Partition, query: &str,
                   page: &PageRequest) -> LibraryResult<PaginatedResult<Entity>>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryStore {
    Sqlite,
    #[serde(rename = "local")]
    LocalSqlite,
}

impl RepositoryStore {
    pub fn gateway_publisher(&self) -> GatewayPublisherVia {
        match self {
            RepositoryStore::Sqlite => { GatewayPublisherVia::Sqlite }
            RepositoryStore::LocalSqlite => { GatewayPublisherVia::Logs }
        }
    }
}

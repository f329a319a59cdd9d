use crate::gateway::events::EventPublisher;
use crate::gateway::GatewayPublisherVia;
use crate::gateway::logs::publisher::LogPublisher;
use crate::gateway::sqlite::publisher::SqlitePublisher;
use crate::utils::sqlite::SqliteClient;

pub(crate) fn create_publisher(via: GatewayPublisherVia, client: &SqliteClient) -> Box<dyn EventPublisher> {
    match via {
        GatewayPublisherVia::Logs => {
            Box::new(LogPublisher::new("bookshelf::events"))
        }
        GatewayPublisherVia::Sqlite => {
            Box::new(SqlitePublisher::new(client.clone(), "events"))
        }
    }
}

pub mod events;
pub mod factory;
pub mod logs;
pub mod sqlite;

#[derive(Debug, PartialEq)]
pub enum GatewayPublisherVia {
    Logs,
    Sqlite,
}

use std::collections::HashMap;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::utils::date::serializer;

// DomainEventType defines type of event for domain changes
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum DomainEventType {
    Added,
    Updated,
    Deleted,
    Restored,
    Purged,
}

impl DomainEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainEventType::Added => "Added",
            DomainEventType::Updated => "Updated",
            DomainEventType::Deleted => "Deleted",
            DomainEventType::Restored => "Restored",
            DomainEventType::Purged => "Purged",
        }
    }
}

// DomainEvent abstracts domain event for data changes
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct DomainEvent {
    pub event_id: String,
    pub name: String,
    pub group: String,
    pub key: String,
    pub kind: DomainEventType,
    pub metadata: HashMap<String, String>,
    pub json_data: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
}

impl DomainEvent {
    pub fn added<T: Serialize>(name: &str, group: &str, key: &str, metadata: &HashMap<String, String>, data: &T) -> serde_json::Result<Self> {
        Self::of(DomainEventType::Added, name, group, key, metadata, data)
    }

    pub fn updated<T: Serialize>(name: &str, group: &str, key: &str, metadata: &HashMap<String, String>, data: &T) -> serde_json::Result<Self> {
        Self::of(DomainEventType::Updated, name, group, key, metadata, data)
    }

    pub fn deleted<T: Serialize>(name: &str, group: &str, key: &str, metadata: &HashMap<String, String>, data: &T) -> serde_json::Result<Self> {
        Self::of(DomainEventType::Deleted, name, group, key, metadata, data)
    }

    pub fn restored<T: Serialize>(name: &str, group: &str, key: &str, metadata: &HashMap<String, String>, data: &T) -> serde_json::Result<Self> {
        Self::of(DomainEventType::Restored, name, group, key, metadata, data)
    }

    pub fn purged<T: Serialize>(name: &str, group: &str, key: &str, metadata: &HashMap<String, String>, data: &T) -> serde_json::Result<Self> {
        Self::of(DomainEventType::Purged, name, group, key, metadata, data)
    }

    fn of<T: Serialize>(kind: DomainEventType, name: &str, group: &str, key: &str,
                        metadata: &HashMap<String, String>, data: &T) -> serde_json::Result<Self> {
        let json = serde_json::to_string(&data)?;
        Ok(DomainEvent {
            event_id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            group: group.to_string(),
            key: key.to_string(),
            kind,
            metadata: metadata.clone(),
            json_data: json,
            created_at: Utc::now().naive_utc(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::events::{DomainEvent, DomainEventType};

    #[tokio::test]
    async fn test_should_build_added() {
        let data = HashMap::from([("a", 1), ("b", 2)]);
        let event = DomainEvent::added("name", "group", "key", &HashMap::from([("k".to_string(), "v".to_string())]), &data).expect("build event");
        assert_eq!("name", event.name.as_str());
        assert_eq!("key", event.key.as_str());
        assert_eq!(DomainEventType::Added, event.kind);
    }

    #[tokio::test]
    async fn test_should_build_lifecycle_events() {
        let data = "42".to_string();
        let metadata = HashMap::new();
        let deleted = DomainEvent::deleted("books", "books", "42", &metadata, &data).expect("build event");
        let restored = DomainEvent::restored("books", "books", "42", &metadata, &data).expect("build event");
        let purged = DomainEvent::purged("books", "books", "42", &metadata, &data).expect("build event");
        assert_eq!(DomainEventType::Deleted, deleted.kind);
        assert_eq!(DomainEventType::Restored, restored.kind);
        assert_eq!(DomainEventType::Purged, purged.kind);
        assert_ne!(deleted.event_id, restored.event_id);
        assert_eq!("\"42\"", purged.json_data.as_str());
    }

    #[tokio::test]
    async fn test_should_serialize_event() {
        let event = DomainEvent::updated("books", "books", "7", &HashMap::new(), &7).expect("build event");
        let json = serde_json::to_value(&event).expect("serialize event");
        assert_eq!("Updated", json["kind"]);
        assert_eq!("Updated", event.kind.as_str());
    }
}

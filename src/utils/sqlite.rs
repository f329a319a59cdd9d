use std::sync::{Arc, Mutex};
use std::time::Duration;
use rusqlite::{Connection, ErrorCode, OpenFlags};
use rusqlite::ffi;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::RepositoryStore;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS books (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      title TEXT NOT NULL CHECK (title <> ''),
      author TEXT NOT NULL CHECK (author <> ''),
      isbn TEXT NOT NULL UNIQUE CHECK (isbn <> ''),
      created_at INTEGER NOT NULL,
      deleted INTEGER NOT NULL DEFAULT 0,
      deleted_at INTEGER,
      CHECK ((deleted = 0 AND deleted_at IS NULL) OR (deleted = 1 AND deleted_at IS NOT NULL))
    );
    CREATE INDEX IF NOT EXISTS books_ndx ON books (deleted, created_at);

    CREATE TABLE IF NOT EXISTS events (
      event_id TEXT PRIMARY KEY,
      name TEXT NOT NULL,
      event_group TEXT NOT NULL,
      event_key TEXT NOT NULL,
      kind TEXT NOT NULL,
      metadata TEXT NOT NULL,
      json_data TEXT NOT NULL,
      created_at INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS events_ndx ON events (event_group, event_key);
"#;

// SqliteClient is the shared store handle, a single connection serialized behind a mutex
#[derive(Debug, Clone)]
pub struct SqliteClient {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteClient {
    fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    // runs blocking sqlite work on the blocking pool
    pub async fn call<F, T>(&self, f: F) -> LibraryResult<T>
        where F: FnOnce(&mut Connection) -> LibraryResult<T> + Send + 'static,
              T: Send + 'static {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock().map_err(|err| {
                LibraryError::runtime(format!("sqlite connection poisoned {:?}", err).as_str(), None)
            })?;
            f(&mut guard)
        }).await?
    }
}

pub(crate) async fn create_tables(client: &SqliteClient) -> LibraryResult<()> {
    client.call(|conn| {
        conn.execute_batch(SCHEMA).map_err(LibraryError::from)
    }).await
}

// helper method to build the store client and make sure the schema exists
pub async fn build_db_client(store: RepositoryStore, config: &Configuration) -> LibraryResult<SqliteClient> {
    let conn = match store {
        RepositoryStore::Sqlite => {
            let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX;
            let conn = Connection::open_with_flags(&config.database_path, flags)?;
            conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")?;
            conn.busy_timeout(BUSY_TIMEOUT)?;
            conn
        }
        RepositoryStore::LocalSqlite => {
            Connection::open_in_memory()?
        }
    };
    let client = SqliteClient::new(conn);
    create_tables(&client).await?;
    Ok(client)
}

impl From<rusqlite::Error> for LibraryError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(failure, message) => {
                if failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
                    || failure.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY {
                    let field = unique_field(message.as_deref());
                    LibraryError::duplicate_key(
                        format!("Unique constraint failed for {}", field).as_str(), Some(field))
                } else if matches!(failure.code, ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) {
                    LibraryError::unavailable(
                        format!("sqlite database unavailable error {:?}", err).as_str(),
                        Some(format!("{:?}", failure.code)), true)
                } else {
                    LibraryError::database(
                        format!("sqlite database error {:?}", err).as_str(),
                        Some(format!("{:?}", failure.code)), false)
                }
            }
            _ => LibraryError::database(format!("sqlite error {:?}", err).as_str(), None, false),
        }
    }
}

// "UNIQUE constraint failed: books.isbn" => "isbn"
fn unique_field(message: Option<&str>) -> String {
    message
        .and_then(|m| m.rsplit(": ").next())
        .map(|cols| cols.split(", ")
            .map(|col| col.rsplit('.').next().unwrap_or(col))
            .collect::<Vec<&str>>()
            .join(","))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use crate::core::domain::Configuration;
    use crate::core::library::{LibraryError, LibraryResult};
    use crate::core::repository::RepositoryStore;
    use crate::utils::sqlite::{build_db_client, create_tables, unique_field};

    #[tokio::test]
    async fn test_should_parse_unique_field() {
        assert_eq!("isbn", unique_field(Some("UNIQUE constraint failed: books.isbn")));
        assert_eq!("a,b", unique_field(Some("UNIQUE constraint failed: t.a, t.b")));
        assert_eq!("unknown", unique_field(None));
    }

    #[tokio::test]
    async fn test_should_create_tables_idempotently() {
        let client = build_db_client(RepositoryStore::LocalSqlite, &Configuration::new("test"))
            .await.expect("should build client");
        create_tables(&client).await.expect("should create tables again");
        let count: LibraryResult<i64> = client.call(|conn| {
            conn.query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0)).map_err(LibraryError::from)
        }).await;
        assert_eq!(0, count.expect("should count"));
    }

    #[tokio::test]
    async fn test_should_map_unique_violation_to_duplicate_key() {
        let client = build_db_client(RepositoryStore::LocalSqlite, &Configuration::new("test"))
            .await.expect("should build client");
        let res: LibraryResult<usize> = client.call(|conn| {
            conn.execute("INSERT INTO books (title, author, isbn, created_at) VALUES ('t', 'a', 'i', 0)", [])?;
            conn.execute("INSERT INTO books (title, author, isbn, created_at) VALUES ('t', 'a', 'i', 0)", [])
                .map_err(LibraryError::from)
        }).await;
        assert!(matches!(res, Err(LibraryError::DuplicateKey { field: Some(ref f), .. }) if f == "isbn"));
    }

    #[tokio::test]
    async fn test_should_reject_inconsistent_soft_delete_flags() {
        let client = build_db_client(RepositoryStore::LocalSqlite, &Configuration::new("test"))
            .await.expect("should build client");
        let res: LibraryResult<usize> = client.call(|conn| {
            conn.execute("INSERT INTO books (title, author, isbn, created_at, deleted) VALUES ('t', 'a', 'i', 0, 1)", [])
                .map_err(LibraryError::from)
        }).await;
        assert!(matches!(res, Err(LibraryError::Database { .. })));
    }
}

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rusqlite::{params, OptionalExtension, Row, ToSql};
use tracing::debug;

use crate::books::domain::model::{BookCounts, BookEntity};
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult, PageRequest, PaginatedResult, Partition};
use crate::core::repository::Repository;
use crate::utils::date::{from_micros, to_micros};
use crate::utils::sqlite::SqliteClient;

const COLUMNS: &str = "id, title, author, isbn, created_at, deleted, deleted_at";

#[derive(Debug)]
pub struct SqliteBookRepository {
    client: SqliteClient,
    table_name: String,
}

impl SqliteBookRepository {
    pub(crate) fn new(client: SqliteClient, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }

    async fn select_one<K>(&self, predicate: &str, key: K, partition: Option<Partition>) -> LibraryResult<Option<BookEntity>>
        where K: ToSql + Send + 'static {
        let sql = match partition {
            Some(_) => format!("SELECT {} FROM {} WHERE {} = ?1 AND deleted = ?2", COLUMNS, self.table_name, predicate),
            None => format!("SELECT {} FROM {} WHERE {} = ?1", COLUMNS, self.table_name, predicate),
        };
        self.client.call(move |conn| {
            let res = match partition {
                Some(p) => conn.query_row(&sql, params![key, p.deleted()], map_to_book),
                None => conn.query_row(&sql, params![key], map_to_book),
            };
            res.optional().map_err(LibraryError::from)
        }).await
    }

    // single conditional write, the partition guard and the change happen in one statement
    async fn transition(&self, id: i64, assignments: &str, from: Partition,
                        deleted_at: Option<i64>) -> LibraryResult<BookEntity> {
        let sql = format!("UPDATE {} SET {} WHERE id = ?1 AND deleted = ?2 RETURNING {}",
                          self.table_name, assignments, COLUMNS);
        let res = self.client.call(move |conn| {
            let res = match deleted_at {
                Some(at) => conn.query_row(&sql, params![id, from.deleted(), at], map_to_book),
                None => conn.query_row(&sql, params![id, from.deleted()], map_to_book),
            };
            res.optional().map_err(LibraryError::from)
        }).await?;
        res.ok_or_else(|| {
            debug!(book_id = id, partition = %from, "no book to transition");
            not_found(id, from)
        })
    }
}

#[async_trait]
impl Repository<BookEntity> for SqliteBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let sql = format!("INSERT INTO {} (title, author, isbn, created_at, deleted, deleted_at) \
                           VALUES (?1, ?2, ?3, ?4, 0, NULL) RETURNING {}", self.table_name, COLUMNS);
        let values = (entity.title.clone(), entity.author.clone(), entity.isbn.clone(), to_micros(&entity.created_at));
        self.client.call(move |conn| {
            conn.query_row(&sql, params![values.0, values.1, values.2, values.3], map_to_book)
                .map_err(LibraryError::from)
        }).await
    }

    async fn update(&self, id: i64, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let sql = format!("UPDATE {} SET title = ?2, author = ?3, isbn = ?4 \
                           WHERE id = ?1 AND deleted = 0 RETURNING {}", self.table_name, COLUMNS);
        let values = (entity.title.clone(), entity.author.clone(), entity.isbn.clone());
        let res = self.client.call(move |conn| {
            conn.query_row(&sql, params![id, values.0, values.1, values.2], map_to_book)
                .optional().map_err(LibraryError::from)
        }).await?;
        res.ok_or_else(|| not_found(id, Partition::Active))
    }

    async fn get(&self, id: i64) -> LibraryResult<Option<BookEntity>> {
        let sql = format!("SELECT {} FROM {} WHERE id = ?1", COLUMNS, self.table_name);
        self.client.call(move |conn| {
            conn.query_row(&sql, params![id], map_to_book)
                .optional().map_err(LibraryError::from)
        }).await
    }

    async fn delete(&self, id: i64, partition: Partition) -> LibraryResult<usize> {
        let sql = format!("DELETE FROM {} WHERE id = ?1 AND deleted = ?2", self.table_name);
        let deleted = self.client.call(move |conn| {
            conn.execute(&sql, params![id, partition.deleted()]).map_err(LibraryError::from)
        }).await?;
        if deleted == 0 {
            return Err(not_found(id, partition));
        }
        Ok(deleted)
    }

    async fn query(&self, partition: Partition, query: &str,
                   page: &PageRequest) -> LibraryResult<PaginatedResult<BookEntity>> {
        // instr keeps the match case-sensitive, unlike LIKE; an empty query matches every title
        let filter = "deleted = ?1 AND instr(title, ?2) > 0";
        let select_sql = format!("SELECT {} FROM {} WHERE {} ORDER BY created_at DESC, id DESC LIMIT ?3 OFFSET ?4",
                                 COLUMNS, self.table_name, filter);
        let count_sql = format!("SELECT COUNT(*) FROM {} WHERE {}", self.table_name, filter);
        let query = query.to_string();
        let page = *page;
        // sqlite reads a negative offset as zero, so out of range values stay at the i64 ceiling
        let limit = i64::try_from(page.take).unwrap_or(i64::MAX);
        let offset = i64::try_from(page.skip()).unwrap_or(i64::MAX);
        self.client.call(move |conn| {
            let tx = conn.transaction()?;
            let records = {
                let mut stmt = tx.prepare(&select_sql)?;
                let rows = stmt.query_map(params![partition.deleted(), query, limit, offset], map_to_book)?;
                rows.collect::<Result<Vec<BookEntity>, rusqlite::Error>>()?
            };
            let total: i64 = tx.query_row(&count_sql, params![partition.deleted(), query], |row| row.get(0))?;
            tx.commit()?;
            Ok(PaginatedResult::new(page.page, page.take, total as usize, records))
        }).await
    }
}

#[async_trait]
impl BookRepository for SqliteBookRepository {
    async fn find_by_id(&self, id: i64, partition: Partition) -> LibraryResult<Option<BookEntity>> {
        self.select_one("id", id, Some(partition)).await
    }

    async fn get_by_isbn(&self, isbn: &str) -> LibraryResult<Option<BookEntity>> {
        self.select_one("isbn", isbn.to_string(), None).await
    }

    async fn find_by_isbn(&self, isbn: &str, partition: Partition) -> LibraryResult<Option<BookEntity>> {
        self.select_one("isbn", isbn.to_string(), Some(partition)).await
    }

    async fn mark_deleted(&self, id: i64, deleted_at: NaiveDateTime) -> LibraryResult<BookEntity> {
        self.transition(id, "deleted = 1, deleted_at = ?3", Partition::Active, Some(to_micros(&deleted_at))).await
    }

    async fn restore(&self, id: i64) -> LibraryResult<BookEntity> {
        self.transition(id, "deleted = 0, deleted_at = NULL", Partition::Trashed, None).await
    }

    async fn count(&self, since: NaiveDateTime) -> LibraryResult<BookCounts> {
        // one statement reads one snapshot, the three counts cannot drift apart
        let sql = format!("SELECT COALESCE(SUM(deleted = 0), 0), \
                                  COALESCE(SUM(deleted = 0 AND created_at >= ?1), 0), \
                                  COALESCE(SUM(deleted = 1), 0) FROM {}", self.table_name);
        let since = to_micros(&since);
        self.client.call(move |conn| {
            conn.query_row(&sql, params![since], |row| {
                Ok(BookCounts {
                    active: row.get::<_, i64>(0)? as usize,
                    active_since: row.get::<_, i64>(1)? as usize,
                    trashed: row.get::<_, i64>(2)? as usize,
                })
            }).map_err(LibraryError::from)
        }).await
    }
}

fn not_found(id: i64, partition: Partition) -> LibraryError {
    match partition {
        Partition::Active => LibraryError::not_found(format!("Book not found for id {}", id).as_str()),
        Partition::Trashed => LibraryError::not_found(format!("Book not found in trash for id {}", id).as_str()),
    }
}

fn map_to_book(row: &Row<'_>) -> rusqlite::Result<BookEntity> {
    Ok(BookEntity {
        book_id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        isbn: row.get(3)?,
        created_at: parse_date_column(row, 4)?,
        deleted: row.get(5)?,
        deleted_at: match row.get::<_, Option<i64>>(6)? {
            Some(_) => Some(parse_date_column(row, 6)?),
            None => None,
        },
    })
}

fn parse_date_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDateTime> {
    let micros: i64 = row.get(idx)?;
    from_micros(micros).ok_or(rusqlite::Error::IntegralValueOutOfRange(idx, micros))
}

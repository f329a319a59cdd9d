use crate::books::repository::BookRepository;
use crate::books::repository::sqlite_book_repository::SqliteBookRepository;
use crate::utils::sqlite::SqliteClient;

pub(crate) fn create_book_repository(client: &SqliteClient) -> Box<dyn BookRepository> {
    Box::new(SqliteBookRepository::new(client.clone(), "books"))
}

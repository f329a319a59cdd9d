use crate::core::library::{LibraryError, LibraryResult};

pub mod add_book_cmd;
pub mod find_book_by_isbn_cmd;
pub mod get_book_cmd;
pub mod list_books_cmd;
pub mod purge_book_cmd;
pub mod remove_book_cmd;
pub mod restore_book_cmd;
pub mod update_book_cmd;

// ids arrive as path text, anything that is not an integer is a malformed request
pub(crate) fn parse_book_id(raw: &str) -> LibraryResult<i64> {
    raw.trim().parse::<i64>().map_err(|_| {
        LibraryError::validation(format!("id must be a number but was {}", raw).as_str(), Some("id".to_string()))
    })
}

#[cfg(test)]
mod tests {
    use crate::catalog::command::parse_book_id;
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_parse_book_id() {
        assert_eq!(42, parse_book_id("42").expect("should parse"));
        assert!(matches!(parse_book_id("abc"), Err(LibraryError::Validation { field: Some(ref f), .. }) if f == "id"));
        assert!(parse_book_id("").is_err());
    }
}

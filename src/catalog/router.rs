use axum::body::HttpBody;
use axum::routing::{delete, get, post, put};
use axum::{BoxError, Router};
use tower_http::cors::{Any, CorsLayer};
use crate::catalog::controller::{add_book, find_book_by_id, find_book_by_isbn, list_books, list_trashed_books,
                                 purge_book, remove_book, restore_book, update_book};
use crate::core::controller::AppState;
use crate::dashboard::controller::get_totals;

// routes of the book catalog and its dashboard, generic over the body so the same
// router serves both the plain http server and the lambda runtime.
// Browsers call the api from another origin, so every route answers cors preflights.
pub fn build_router<B>(state: AppState) -> Router<(), B>
    where B: HttpBody + Send + 'static,
          B::Data: Send,
          B::Error: Into<BoxError> {
    Router::new()
        .route("/books", get(list_books).post(add_book))
        .route("/books/:id", get(find_book_by_id).put(update_book).delete(remove_book))
        .route("/books/isbn/:isbn", get(find_book_by_isbn))
        .route("/books/restore/:id", put(restore_book))
        .route("/books/trash/:id", delete(purge_book))
        .route("/books/trash/deleted", get(list_trashed_books))
        .route("/books/dashboard/totals", get(get_totals))
        .with_state(state)
        .layer(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any))
}

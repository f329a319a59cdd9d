use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;
use crate::books::dto::{BookDto, BookFields};
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
use crate::catalog::command::find_book_by_isbn_cmd::{FindBookByIsbnCommand, FindBookByIsbnCommandRequest};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest, ListBooksCommandResponse};
use crate::catalog::command::purge_book_cmd::{PurgeBookCommand, PurgeBookCommandRequest};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
use crate::catalog::command::restore_book_cmd::{RestoreBookCommand, RestoreBookCommandRequest};
use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest};
use crate::catalog::domain::CatalogService;
use crate::catalog::factory;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};
use crate::core::library::Partition;

fn build_service(state: &AppState) -> Box<dyn CatalogService> {
    factory::create_catalog_service(&state.config, &state.client)
}

pub(crate) async fn add_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<(StatusCode, Json<BookDto>), ServerError> {
    let req: AddBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = AddBookCommand::new(build_service(&state)).execute(req).await?;
    Ok((StatusCode::CREATED, Json(res.book)))
}

pub(crate) async fn list_books(
    State(state): State<AppState>,
    Query(mut req): Query<ListBooksCommandRequest>) -> Result<Json<ListBooksCommandResponse>, ServerError> {
    req.partition = Partition::Active;
    let res = ListBooksCommand::new(build_service(&state), state.config.default_page_size).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn list_trashed_books(
    State(state): State<AppState>,
    Query(mut req): Query<ListBooksCommandRequest>) -> Result<Json<ListBooksCommandResponse>, ServerError> {
    req.partition = Partition::Trashed;
    let res = ListBooksCommand::new(build_service(&state), state.config.default_page_size).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn find_book_by_id(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> Result<Json<BookDto>, ServerError> {
    let res = GetBookCommand::new(build_service(&state)).execute(GetBookCommandRequest::new(book_id)).await?;
    Ok(Json(res.book))
}

pub(crate) async fn find_book_by_isbn(
    State(state): State<AppState>,
    Path(isbn): Path<String>) -> Result<Json<BookDto>, ServerError> {
    let req = FindBookByIsbnCommandRequest { isbn };
    let res = FindBookByIsbnCommand::new(build_service(&state)).execute(req).await?;
    Ok(Json(res.book))
}

pub(crate) async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    json: Json<Value>) -> Result<Json<BookDto>, ServerError> {
    let fields: BookFields = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = UpdateBookCommand::new(build_service(&state))
        .execute(UpdateBookCommandRequest::new(book_id, fields)).await?;
    Ok(Json(res.book))
}

pub(crate) async fn remove_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> Result<StatusCode, ServerError> {
    RemoveBookCommand::new(build_service(&state)).execute(RemoveBookCommandRequest::new(book_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn restore_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> Result<Json<BookDto>, ServerError> {
    let res = RestoreBookCommand::new(build_service(&state)).execute(RestoreBookCommandRequest::new(book_id)).await?;
    Ok(Json(res.book))
}

pub(crate) async fn purge_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> Result<StatusCode, ServerError> {
    PurgeBookCommand::new(build_service(&state)).execute(PurgeBookCommandRequest::new(book_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

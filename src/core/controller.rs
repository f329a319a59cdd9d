use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use crate::core::command::CommandError;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};
use crate::utils::sqlite::{build_db_client, SqliteClient};

#[derive(Debug, Clone)]
pub struct AppState {
    pub(crate) config: Configuration,
    pub(crate) client: SqliteClient,
}

impl AppState {
    pub fn new(config: Configuration, client: SqliteClient) -> AppState {
        AppState {
            config,
            client,
        }
    }

    // opens the store configured in `config`
    pub async fn from_config(config: Configuration) -> LibraryResult<AppState> {
        let client = build_db_client(config.store, &config).await?;
        Ok(AppState::new(config, client))
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

pub type ServerError = (StatusCode, Json<ErrorBody>);

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    ServerError::from(CommandError::from(LibraryError::from(err)))
}

pub fn status_of(err: &CommandError) -> StatusCode {
    match err {
        CommandError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        CommandError::DuplicateKey { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        CommandError::NotFound { .. } => StatusCode::NOT_FOUND,
        CommandError::Runtime { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        CommandError::Serialization { .. } => StatusCode::BAD_REQUEST,
        CommandError::Validation { .. } => StatusCode::BAD_REQUEST,
        CommandError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        let status = status_of(&err);
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = ?err, "request failed");
        }
        (status, Json(ErrorBody {
            message: err.message().to_string(),
            field: err.field().map(str::to_string),
        }))
    }
}

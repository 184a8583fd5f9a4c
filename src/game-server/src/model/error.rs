use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rps_common::{error::GameError, model::messages::{ErrorResponse, SessionId}};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("session {0} not found")]
    SessionNotFound(SessionId),

    #[error("session {0} already exists")]
    SessionExists(SessionId),

    #[error("{0}")]
    BadRequest(String),

    #[error("too many active sessions ({0}), try again later")]
    ServerFull(usize),
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        debug!("Rejected body: {}", rejection.body_text());
        let reason = match rejection {
            JsonRejection::JsonSyntaxError(_) => "request body is not valid JSON",
            JsonRejection::JsonDataError(_) => "request body has missing or mistyped fields",
            JsonRejection::MissingJsonContentType(_) => "expected a JSON request body",
            _ => "failed to read request body",
        };
        ServerError::BadRequest(reason.to_owned())
    }
}

impl From<PathRejection> for ServerError {
    fn from(rejection: PathRejection) -> Self {
        debug!("Rejected path: {}", rejection.body_text());
        ServerError::BadRequest("invalid session id".to_owned())
    }
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Game(GameError::InvalidConfiguration { .. })
            | ServerError::Game(GameError::InvalidPlay(_))
            | ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Game(GameError::SeriesComplete) | ServerError::SessionExists(_) => {
                StatusCode::CONFLICT
            }
            ServerError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            ServerError::ServerFull(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

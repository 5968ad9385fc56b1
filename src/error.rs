use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::dto::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid note id: {0}")]
    InvalidId(#[from] PathRejection),

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("Note not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidId(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidBody(rejection) => rejection.status(),
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            Self::Database(e) => {
                tracing::error!("database error: {e}");
                "Database error".to_string()
            }
            Self::InvalidId(_) | Self::InvalidBody(_) => {
                tracing::debug!("rejected request: {self}");
                self.to_string()
            }
            Self::NotFound => self.to_string(),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Failed to connect to database: {0}")]
    Connect(#[from] tokio_postgres::Error),

    #[error("Database bootstrap failed: {0}")]
    Bootstrap(#[from] refinery::Error),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use pronounce_archive::ArchiveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Please enter at least one word.")]
    NoWords,

    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            ServerError::NoWords => {
                (StatusCode::BAD_REQUEST, Html(format!("<h3>{message}</h3>"))).into_response()
            }
            ServerError::Archive(err) => {
                tracing::error!(error = %err, "Failed to build archive");
                (StatusCode::INTERNAL_SERVER_ERROR, "failed to build archive").into_response()
            }
        }
    }
}

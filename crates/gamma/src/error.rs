use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gamma_core::project::ProjectError;
use serde::Serialize;

use crate::backend::BackendError;

/// Request-level error, rendered as `{"error": "..."}` with a matching status.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("{0}")]
    Io(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Backend(BackendError::MissingCredentials(_)) => StatusCode::BAD_REQUEST,
            Error::Backend(_) | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ProjectError> for Error {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::FolderNotFound(_) | ProjectError::FileNotFound(_) => {
                Error::NotFound(err.to_string())
            }
            ProjectError::InvalidObjectName(_) => Error::Validation(err.to_string()),
            ProjectError::ReadObjects(_) | ProjectError::Write(_) => Error::Io(err.to_string()),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            log::error!("{self}");
        } else {
            log::debug!("Rejected request ({status}): {self}");
        }

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

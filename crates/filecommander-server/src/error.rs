//! Mapping of engine errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use filecommander_core::{ErrorKind, FsError};

/// An engine error on its way to the client.
#[derive(Debug)]
pub struct ApiError(pub FsError);

impl ApiError {
    /// `NotFound` is 404; everything else is a bad request.
    pub fn status(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::InvalidArgument
            | ErrorKind::AlreadyExists
            | ErrorKind::Cancelled
            | ErrorKind::Io => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<FsError> for ApiError {
    fn from(error: FsError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        debug!(%status, kind = %self.0.kind(), "{}", self.0);
        (status, self.0.to_string()).into_response()
    }
}

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tally_api::v1::{Message, ValidationError};
use tracing::{error, warn};

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    MalformedBody(String),
    #[error("Todo not found")]
    NotFound,
    #[error("{source}")]
    Store {
        status: StatusCode,
        source: StoreError,
    },
}

impl ApiError {
    /// Missing records are always 404, whatever `status` says.
    pub fn store(status: StatusCode) -> impl FnOnce(StoreError) -> Self {
        move |err| match err {
            StoreError::NotFound(_) => Self::NotFound,
            source => Self::Store { status, source },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Store { status, .. } => *status,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            Self::Store { source, .. } => error!(%status, error = ?source, "storage failure"),
            _ => warn!(%status, error = %self, "rejected request"),
        }

        (status, Json(Message::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use tally_api::v1::TodoId;

    use super::*;

    #[test]
    fn missing_records_are_not_found_whatever_the_path() {
        let err = ApiError::store(StatusCode::INTERNAL_SERVER_ERROR)(StoreError::NotFound(
            TodoId::generate(),
        ));

        assert!(matches!(err, ApiError::NotFound));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn storage_failures_keep_the_requested_status() {
        let io = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        let err = ApiError::store(StatusCode::BAD_REQUEST)(StoreError::Io(io));

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "failed to access data file: read-only");
    }

    #[test]
    fn validation_errors_are_bad_requests() {
        let err = ApiError::from(ValidationError::TitleRequired);

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Title is required");
    }
}

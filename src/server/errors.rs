use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// A lookup or filter matched nothing
    #[error("Not found")]
    NotFound,

    /// A write failed and was rolled back
    #[error("Unprocessable: {0}")]
    Unprocessable(#[source] sqlx::Error),

    /// The body is valid JSON but does not have the expected shape
    #[error("Unprocessable body: {0}")]
    UnprocessableBody(String),

    /// The request body or query could not be read
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unexpected failure on a read path
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: &'static str,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unprocessable(_) | ApiError::UnprocessableBody(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to clients; details stay in the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::NotFound => "Not found",
            ApiError::Unprocessable(_) | ApiError::UnprocessableBody(_) => "Unprocessable",
            ApiError::BadRequest(_) => "Bad request",
            ApiError::Database(_) => "Internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Database(_) => tracing::error!("Internal server error: {:#}", self),
            ApiError::Unprocessable(_) => tracing::warn!("{:#}", self),
            ApiError::NotFound | ApiError::UnprocessableBody(_) | ApiError::BadRequest(_) => {
                tracing::debug!("Client error: {}", self)
            }
        }

        let status = self.status_code();
        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

// unreadable bodies (bad syntax, wrong content type) are 400; readable JSON of the wrong shape is 422
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => ApiError::UnprocessableBody(err.body_text()),
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

// a path segment that does not parse as an id cannot name an existing record
impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_error_maps_to_its_status() {
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Unprocessable(sqlx::Error::PoolClosed).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::UnprocessableBody("oops".to_owned()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::BadRequest("oops".to_owned()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn client_messages_hide_details() {
        assert_eq!(ApiError::BadRequest("expected `,`".to_owned()).user_message(), "Bad request");
        assert_eq!(
            ApiError::Unprocessable(sqlx::Error::PoolClosed).user_message(),
            "Unprocessable"
        );
    }
}

//! HTTP mapping for domain errors.

use airport_booking::error::BookingError;
use axum::{
    Json,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

/// Handler error; wraps [`BookingError`] so it can become a response.
#[derive(Debug)]
pub struct ApiError(pub BookingError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::Conflict(_) => StatusCode::CONFLICT,
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            BookingError::Forbidden(_) => StatusCode::FORBIDDEN,
            BookingError::Config(_)
            | BookingError::PasswordHash(_)
            | BookingError::Database(_)
            | BookingError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(BookingError::field(
            "non_field_errors",
            rejection.body_text(),
        ))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(BookingError::field(
            "non_field_errors",
            rejection.body_text(),
        ))
    }
}

/// A path id that does not parse can never match a row.
impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        Self(BookingError::NotFound("Not found.".to_string()))
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self(BookingError::field("image", err.body_text()))
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self(BookingError::field("image", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self.0 {
            BookingError::Validation(fields) => json!(fields),
            BookingError::Conflict(msg)
            | BookingError::NotFound(msg)
            | BookingError::Unauthorized(msg)
            | BookingError::Forbidden(msg) => json!({ "detail": msg }),
            internal @ (BookingError::Config(_)
            | BookingError::PasswordHash(_)
            | BookingError::Database(_)
            | BookingError::Io(_)) => {
                error!(status = %status, error = %internal, "Internal server error");
                json!({ "detail": "Internal server error." })
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airport_booking::error::FieldErrors;
    use sea_orm::DbErr;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (BookingError::field("name", "bad"), StatusCode::BAD_REQUEST),
            (BookingError::Conflict("x".into()), StatusCode::CONFLICT),
            (BookingError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (BookingError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (BookingError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (
                BookingError::Database(DbErr::Custom("x".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError(err).status(), expected);
        }
    }

    #[test]
    fn test_validation_body_is_field_map() {
        let mut fields = FieldErrors::new();
        fields.add("row", "out of range");
        assert_eq!(
            json!(fields),
            json!({ "row": ["out of range"] })
        );
    }
}

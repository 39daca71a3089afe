use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use domain::auth::AuthError;
use domain::DomainError;
use models::errors::ModelError;
use thiserror::Error;
use tracing::{error, warn};

/// Any failure a handler can return, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self { Self::new(StatusCode::BAD_REQUEST, message) }

    fn internal(detail: &str) -> Self {
        error!(error = %detail, "request failed with internal error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.message))).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        let msg = e.message();
        match e {
            DomainError::Validation(_)
            | DomainError::UnknownReference(_)
            | DomainError::Conflict(_)
            | DomainError::Model(ModelError::Conflict(_)) => Self::bad_request(msg),
            DomainError::InUse(_) => Self::new(StatusCode::CONFLICT, msg),
            DomainError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, msg),
            DomainError::Db(_) | DomainError::Model(ModelError::Db(_)) => Self::internal(&msg),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Unauthorized => Self::new(StatusCode::UNAUTHORIZED, e.to_string()),
            AuthError::Forbidden => Self::new(StatusCode::FORBIDDEN, e.to_string()),
            AuthError::Store(ref detail) => Self::internal(detail),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        warn!(error = %e.body_text(), "rejected request body");
        Self::bad_request(e.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self { Self::bad_request(e.body_text()) }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self { Self::bad_request(e.body_text()) }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database setup failed: {0}")]
    Database(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_status() {
        let cases = [
            (DomainError::Validation("phone is required".into()), StatusCode::BAD_REQUEST),
            (
                DomainError::UnknownReference("master 9 does not exist".into()),
                StatusCode::BAD_REQUEST,
            ),
            (DomainError::Conflict("phone taken".into()), StatusCode::BAD_REQUEST),
            (DomainError::Model(ModelError::Conflict("UNIQUE".into())), StatusCode::BAD_REQUEST),
            (DomainError::InUse("linked".into()), StatusCode::CONFLICT),
            (DomainError::not_found("master", 1), StatusCode::NOT_FOUND),
            (DomainError::Db("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn unique_violation_reports_the_field() {
        let raced = DomainError::Model(ModelError::Conflict(
            "UNIQUE constraint failed: service.title".into(),
        ));
        let api = ApiError::from(raced);
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.message, "title is already taken");
    }

    #[test]
    fn internal_errors_hide_details() {
        let db_down = ModelError::Db("connection refused at 10.0.0.1".into());
        let api = ApiError::from(DomainError::Model(db_down));
        assert_eq!(api.message, "internal server error");
        assert_eq!(ApiError::from(AuthError::Forbidden).message, "admin privileges required");
        assert_eq!(ApiError::from(AuthError::Unauthorized).status, StatusCode::UNAUTHORIZED);
    }
}

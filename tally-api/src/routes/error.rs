use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

use crate::{
    auth::AuthError,
    domain::{ProjectError, ReportError, TimeEntryError},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationFailed,
    DailyCapExceeded,
    ProjectNotFound,
    ProjectInUse,
    NotFound,
    Unauthorized,
    Forbidden,
    Internal,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<ErrorCode>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: Option<ErrorCode>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Logs the underlying cause and returns an opaque 500.
    pub fn internal(cause: impl fmt::Display) -> Self {
        tracing::error!("Storage failure: {}", cause);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            .with_code(ErrorCode::Internal)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message).with_code(ErrorCode::ValidationFailed)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message).with_code(ErrorCode::NotFound)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message).with_code(ErrorCode::Unauthorized)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message).with_code(ErrorCode::Forbidden)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            code: self.code,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<TimeEntryError> for ApiError {
    fn from(err: TimeEntryError) -> Self {
        match err {
            TimeEntryError::ValidationFailed(message) => Self::bad_request(message),
            TimeEntryError::DailyCapExceeded { .. } => {
                Self::new(StatusCode::BAD_REQUEST, err.to_string())
                    .with_code(ErrorCode::DailyCapExceeded)
            }
            TimeEntryError::ProjectNotFoundOrUnauthorized => {
                Self::new(StatusCode::NOT_FOUND, "project not found or unauthorized")
                    .with_code(ErrorCode::ProjectNotFound)
            }
            TimeEntryError::NotFound => Self::not_found("time entry not found or unauthorized"),
            TimeEntryError::Storage(cause) => Self::internal(cause),
        }
    }
}

impl From<ProjectError> for ApiError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::ValidationFailed(message) => Self::bad_request(message),
            ProjectError::NotFound => Self::new(StatusCode::NOT_FOUND, "project not found")
                .with_code(ErrorCode::ProjectNotFound),
            ProjectError::InUse => {
                Self::conflict(err.to_string()).with_code(ErrorCode::ProjectInUse)
            }
            ProjectError::Storage(cause) => Self::internal(cause),
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::ValidationFailed(message) => Self::bad_request(message),
            ReportError::Storage(cause) => Self::internal(cause),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Forbidden(_) => Self::forbidden(err.to_string()),
            AuthError::MissingToken | AuthError::InvalidToken | AuthError::ExpiredToken => {
                Self::unauthorized(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::auth::Capability;

    #[test]
    fn daily_cap_keeps_current_total_in_message() {
        let err = ApiError::from(TimeEntryError::DailyCapExceeded {
            current_total: dec!(24),
        });

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), Some(ErrorCode::DailyCapExceeded));
        assert!(err.message.contains("24 hours already logged"));
    }

    #[test]
    fn storage_failures_are_opaque() {
        let err = ApiError::from(ProjectError::storage("connection reset by peer"));

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "internal server error");
    }

    #[test]
    fn auth_failures_map_to_401_and_403() {
        assert_eq!(
            ApiError::from(AuthError::MissingToken).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(AuthError::Forbidden(Capability::ReadAny)).status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn project_in_use_is_a_conflict() {
        let err = ApiError::from(ProjectError::InUse);

        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.code(), Some(ErrorCode::ProjectInUse));
    }
}

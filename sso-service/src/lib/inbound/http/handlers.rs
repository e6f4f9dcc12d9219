use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::identity::errors::AuthError;
use crate::domain::identity::errors::AuthErrorKind;
use crate::inbound::validation::ValidationError;

pub mod is_admin;
pub mod login;
pub mod register;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    NotFound(String),
    Conflict(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

/// Login failures of every kind collapse into one opaque response.
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err.kind() {
            AuthErrorKind::UserAlreadyExists => {
                ApiError::Conflict("User already exists".to_string())
            }
            AuthErrorKind::UserNotFound => ApiError::NotFound("User not found".to_string()),
            AuthErrorKind::InvalidCredentials
            | AuthErrorKind::InvalidApp
            | AuthErrorKind::Internal => {
                ApiError::InternalServerError("Internal error".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::errors::Operation;
    use crate::domain::identity::errors::StorageError;

    #[test]
    fn test_auth_error_mapping() {
        let operation = Operation::Login;

        assert_eq!(
            ApiError::from(AuthError::InvalidCredentials { operation }),
            ApiError::InternalServerError("Internal error".to_string())
        );
        assert_eq!(
            ApiError::from(AuthError::InvalidApp { operation }),
            ApiError::InternalServerError("Internal error".to_string())
        );
        assert_eq!(
            ApiError::from(AuthError::UserAlreadyExists {
                operation: Operation::Register
            }),
            ApiError::Conflict("User already exists".to_string())
        );
        assert_eq!(
            ApiError::from(AuthError::UserNotFound {
                operation: Operation::IsAdmin
            }),
            ApiError::NotFound("User not found".to_string())
        );
        assert_eq!(
            ApiError::from(AuthError::internal(
                operation,
                StorageError::Database("disk full".to_string())
            )),
            ApiError::InternalServerError("Internal error".to_string())
        );
    }

    #[test]
    fn test_validation_error_mapping() {
        assert_eq!(
            ApiError::from(ValidationError::NonPositiveId("app_id")),
            ApiError::UnprocessableEntity("app_id must be a positive integer".to_string())
        );
    }
}

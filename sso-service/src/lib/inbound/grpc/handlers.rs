use tonic::Status;

use crate::domain::identity::errors::AuthError;
use crate::domain::identity::errors::AuthErrorKind;
use crate::inbound::validation::ValidationError;

pub mod is_admin;
pub mod login;
pub mod register;

impl From<ValidationError> for Status {
    fn from(err: ValidationError) -> Self {
        tracing::debug!(error = %err, "Request validation failed");
        Status::invalid_argument("Request validation failed")
    }
}

/// Map a domain error to the status returned to callers.
///
/// Login failures of every kind collapse into one opaque status so callers
/// cannot tell a wrong password from an unknown email or app.
pub fn status_from_auth_error(err: AuthError) -> Status {
    match err.kind() {
        AuthErrorKind::UserAlreadyExists => Status::already_exists("User already exists"),
        AuthErrorKind::UserNotFound => Status::not_found("User not found"),
        AuthErrorKind::InvalidCredentials | AuthErrorKind::InvalidApp | AuthErrorKind::Internal => {
            Status::internal("Internal error")
        }
    }
}

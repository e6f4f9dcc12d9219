//! Request shape checks shared by the gRPC and HTTP boundaries.
//!
//! Only presence and format are checked here; existence and correctness are
//! domain rules.

use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("email is required")]
    MissingEmail,

    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    #[error("password is required")]
    MissingPassword,

    #[error("{0} must be a positive integer")]
    NonPositiveId(&'static str),
}

pub fn email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::MissingEmail);
    }

    email_address::EmailAddress::from_str(email)
        .map(|_| ())
        .map_err(|e| ValidationError::InvalidEmail(e.to_string()))
}

pub fn password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::MissingPassword);
    }

    Ok(())
}

pub fn positive_id(field: &'static str, id: i64) -> Result<(), ValidationError> {
    if id < 1 {
        return Err(ValidationError::NonPositiveId(field));
    }

    Ok(())
}

pub fn credentials(email_value: &str, password_value: &str) -> Result<(), ValidationError> {
    email(email_value)?;
    password(password_value)
}

use std::fmt;
use std::time::Duration;

use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

/// Error for credential store operations
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("User already exists")]
    UserAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Application not found")]
    AppNotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage call timed out after {0:?}")]
    Timeout(Duration),
}

/// Domain operation that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    Register,
    IsAdmin,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Login => "login",
            Operation::Register => "register",
            Operation::IsAdmin => "is_admin",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of an [`AuthError`], for callers that branch on outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    InvalidCredentials,
    InvalidApp,
    UserAlreadyExists,
    UserNotFound,
    Internal,
}

/// Unexpected failure behind an [`AuthError::Internal`].
#[derive(Debug, Error)]
pub enum InternalError {
    #[error("Storage failure: {0}")]
    Storage(#[from] StorageError),

    #[error("Password hashing failure: {0}")]
    Password(#[from] PasswordError),

    #[error("Token issuance failure: {0}")]
    Token(#[from] JwtError),

    #[error("Blocking task failure: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Top-level error for authentication operations.
///
/// Never carries passwords, hashes or signing keys.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{operation}: invalid credentials")]
    InvalidCredentials { operation: Operation },

    #[error("{operation}: invalid application id")]
    InvalidApp { operation: Operation },

    #[error("{operation}: user already exists")]
    UserAlreadyExists { operation: Operation },

    #[error("{operation}: user not found")]
    UserNotFound { operation: Operation },

    #[error("{operation}: internal error")]
    Internal {
        operation: Operation,
        #[source]
        source: InternalError,
    },
}

impl AuthError {
    pub fn internal(operation: Operation, source: impl Into<InternalError>) -> Self {
        AuthError::Internal {
            operation,
            source: source.into(),
        }
    }

    pub fn kind(&self) -> AuthErrorKind {
        match self {
            AuthError::InvalidCredentials { .. } => AuthErrorKind::InvalidCredentials,
            AuthError::InvalidApp { .. } => AuthErrorKind::InvalidApp,
            AuthError::UserAlreadyExists { .. } => AuthErrorKind::UserAlreadyExists,
            AuthError::UserNotFound { .. } => AuthErrorKind::UserNotFound,
            AuthError::Internal { .. } => AuthErrorKind::Internal,
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            AuthError::InvalidCredentials { operation }
            | AuthError::InvalidApp { operation }
            | AuthError::UserAlreadyExists { operation }
            | AuthError::UserNotFound { operation }
            | AuthError::Internal { operation, .. } => *operation,
        }
    }
}

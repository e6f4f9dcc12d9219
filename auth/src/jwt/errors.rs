use thiserror::Error;

/// Error type for token issuing and verification.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    /// Signing failed; the only way issuing a token can fail on valid input.
    #[error("Failed to sign token: {0}")]
    EncodingFailed(String),

    /// Token is not a well-formed JWT carrying access claims.
    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    /// Signature does not match the claims.
    #[error("Token signature is invalid: {0}")]
    InvalidToken(String),

    #[error("Token lifetime must be at least one second")]
    InvalidTtl,
}

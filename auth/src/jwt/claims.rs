use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by an access token.
///
/// Binds a user identity to the application the token was issued for.
/// Timestamps are Unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// User identifier
    pub uid: i64,

    /// User email
    pub email: String,

    /// Identifier of the application the token is scoped to
    pub app_id: i64,

    /// Expiration time
    pub exp: i64,

    /// Issued at
    pub iat: i64,
}

impl AccessClaims {
    /// Create claims issued at `now` and expiring `ttl_seconds` later.
    ///
    /// # Arguments
    /// * `uid` - User identifier
    /// * `email` - User email
    /// * `app_id` - Application identifier
    /// * `now` - Issue instant
    /// * `ttl_seconds` - Lifetime in seconds
    pub fn new(
        uid: i64,
        email: impl Into<String>,
        app_id: i64,
        now: DateTime<Utc>,
        ttl_seconds: i64,
    ) -> Self {
        let iat = now.timestamp();

        Self {
            uid,
            email: email.into(),
            app_id,
            exp: iat.saturating_add(ttl_seconds),
            iat,
        }
    }
}

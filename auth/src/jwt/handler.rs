use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::AccessClaims;
use super::errors::JwtError;

/// Issues and verifies application-scoped access tokens.
///
/// Uses HS256 (HMAC with SHA-256) with a symmetric key shared with every
/// downstream verifier. The key is fixed at construction.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenIssuer {
    /// Create a new token issuer with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    ///
    /// # Returns
    /// TokenIssuer instance configured with HS256 algorithm
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a signed token for a user and application.
    ///
    /// # Arguments
    /// * `user_id` - User identifier
    /// * `email` - User email
    /// * `app_id` - Application the token is scoped to
    /// * `ttl` - Token lifetime, whole seconds
    ///
    /// # Returns
    /// JWT token string expiring at `now + ttl`
    ///
    /// # Errors
    /// * `InvalidTtl` - `ttl` is shorter than one second or too large
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(
        &self,
        user_id: i64,
        email: &str,
        app_id: i64,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        let ttl_seconds = i64::try_from(ttl.as_secs()).map_err(|_| JwtError::InvalidTtl)?;
        if ttl_seconds <= 0 {
            return Err(JwtError::InvalidTtl);
        }

        let claims = AccessClaims::new(user_id, email, app_id, Utc::now(), ttl_seconds);
        self.sign(&claims)
    }

    /// Sign an explicit claim set.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn sign(&self, claims: &AccessClaims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token's signature and expiry.
    ///
    /// No clock leeway is applied and `exp` is mandatory.
    ///
    /// # Arguments
    /// * `token` - JWT token string
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `TokenExpired` - Token lifetime has passed
    /// * `InvalidToken` - Signature does not match the claims
    /// * `DecodingFailed` - Token is malformed
    pub fn verify(&self, token: &str) -> Result<AccessClaims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let token_data =
            decode::<AccessClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                    ErrorKind::InvalidSignature => JwtError::InvalidToken(e.to_string()),
                    _ => JwtError::DecodingFailed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

//! Credential primitives for the single-sign-on service
//!
//! Provides the cryptographic building blocks used by the authentication domain:
//! - Password hashing (Argon2id, random salt per hash)
//! - Access token issuing and verification (HS256 JWT bound to a user and an app)
//!
//! Downstream applications that trust the identity authority depend on this crate
//! only for [`TokenIssuer::verify`], sharing the signing key out of band.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash(b"my_password").unwrap();
//! assert!(hasher.verify(&hash, b"my_password"));
//! assert!(!hasher.verify(&hash, b"not_my_password"));
//! ```
//!
//! ## Access Tokens
//! ```
//! use std::time::Duration;
//!
//! use auth::TokenIssuer;
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!");
//! let token = issuer.issue(1, "a@x.com", 1, Duration::from_secs(3600)).unwrap();
//!
//! let claims = issuer.verify(&token).unwrap();
//! assert_eq!(claims.uid, 1);
//! assert_eq!(claims.app_id, 1);
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::AccessClaims;
pub use jwt::JwtError;
pub use jwt::TokenIssuer;
pub use password::PasswordError;
pub use password::PasswordHasher;

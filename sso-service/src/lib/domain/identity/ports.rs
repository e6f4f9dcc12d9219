use async_trait::async_trait;

use crate::domain::identity::errors::AuthError;
use crate::domain::identity::errors::StorageError;
use crate::domain::identity::models::App;
use crate::domain::identity::models::User;

/// Port for authentication domain operations.
///
/// Inputs are assumed shape-validated by the caller (non-empty email and
/// password, positive identifiers).
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `email` - Unique email address
    /// * `password` - Plaintext password (hashed before storage)
    ///
    /// # Returns
    /// Identifier assigned to the new user
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Email is already registered
    /// * `Internal` - Hashing or storage failed
    async fn register(&self, email: &str, password: &str) -> Result<i64, AuthError>;

    /// Verify credentials and issue a token scoped to an application.
    ///
    /// Credentials are checked before the application is looked up.
    ///
    /// # Arguments
    /// * `email` - User email
    /// * `password` - Plaintext password
    /// * `app_id` - Application the token is requested for
    ///
    /// # Returns
    /// Signed access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `InvalidApp` - Credentials are valid but the application does not exist
    /// * `Internal` - Storage or token issuance failed
    async fn login(&self, email: &str, password: &str, app_id: i64) -> Result<String, AuthError>;

    /// Report whether a user holds administrator privileges.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `Internal` - Storage failed
    async fn is_admin(&self, user_id: i64) -> Result<bool, AuthError>;
}

/// Persistence operations for users and applications.
///
/// Implementations must be safe for concurrent use.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// Uniqueness of `email` is enforced atomically by the store: of several
    /// concurrent calls with the same email exactly one succeeds.
    ///
    /// # Arguments
    /// * `email` - User email
    /// * `password_hash` - Output of the password hasher
    ///
    /// # Returns
    /// Identifier assigned to the new user
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Email is already registered
    /// * `Database` - Database operation failed
    async fn save_user(&self, email: &str, password_hash: &[u8]) -> Result<i64, StorageError>;

    /// Retrieve user by email address.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this email
    /// * `Database` - Database operation failed
    async fn find_user_by_email(&self, email: &str) -> Result<User, StorageError>;

    /// Retrieve the administrator flag of a user.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `Database` - Database operation failed
    async fn is_admin(&self, user_id: i64) -> Result<bool, StorageError>;

    /// Retrieve application by identifier.
    ///
    /// # Errors
    /// * `AppNotFound` - Application does not exist
    /// * `Database` - Database operation failed
    async fn find_app_by_id(&self, app_id: i64) -> Result<App, StorageError>;
}

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenIssuer;

use crate::config::Config;
use crate::domain::identity::errors::AuthError;
use crate::domain::identity::errors::Operation;
use crate::domain::identity::errors::StorageError;
use crate::domain::identity::ports::AuthServicePort;
use crate::domain::identity::ports::CredentialStore;

/// Domain service implementation for authentication operations.
///
/// Stateless apart from its injected collaborators; one instance is shared
/// across all requests.
pub struct AuthService<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    token_issuer: Arc<TokenIssuer>,
    password_hasher: PasswordHasher,
    token_ttl: Duration,
    store_timeout: Duration,
}

impl<S> AuthService<S>
where
    S: CredentialStore,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `token_issuer` - Issuer holding the process-wide signing key
    /// * `config` - Supplies the token lifetime and the store call timeout
    pub fn new(store: Arc<S>, token_issuer: Arc<TokenIssuer>, config: &Config) -> Self {
        Self {
            store,
            token_issuer,
            password_hasher: PasswordHasher::new(),
            token_ttl: config.token.ttl(),
            store_timeout: config.storage.timeout(),
        }
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, StorageError>>,
    ) -> Result<T, StorageError> {
        match tokio::time::timeout(self.store_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(StorageError::Timeout(self.store_timeout)),
        }
    }
}

#[async_trait]
impl<S> AuthServicePort for AuthService<S>
where
    S: CredentialStore,
{
    #[tracing::instrument(name = "register", skip_all)]
    async fn register(&self, email: &str, password: &str) -> Result<i64, AuthError> {
        let operation = Operation::Register;

        // Argon2 is CPU bound, keep it off the async workers.
        let hasher = self.password_hasher;
        let secret = password.as_bytes().to_vec();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&secret))
            .await
            .map_err(|e| AuthError::internal(operation, e))?
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to hash password");
                AuthError::internal(operation, e)
            })?;

        let user_id = self
            .bounded(self.store.save_user(email, &password_hash))
            .await
            .map_err(|e| match e {
                StorageError::UserAlreadyExists => {
                    tracing::warn!("User already exists");
                    AuthError::UserAlreadyExists { operation }
                }
                e => {
                    tracing::error!(error = %e, "Failed to save user");
                    AuthError::internal(operation, e)
                }
            })?;

        tracing::info!(user_id, "User registered");

        Ok(user_id)
    }

    #[tracing::instrument(name = "login", skip_all, fields(app_id = app_id))]
    async fn login(&self, email: &str, password: &str, app_id: i64) -> Result<String, AuthError> {
        let operation = Operation::Login;

        let user = self
            .bounded(self.store.find_user_by_email(email))
            .await
            .map_err(|e| match e {
                StorageError::UserNotFound => {
                    tracing::warn!("User not found");
                    AuthError::InvalidCredentials { operation }
                }
                e => {
                    tracing::error!(error = %e, "Failed to look up user");
                    AuthError::internal(operation, e)
                }
            })?;

        let hasher = self.password_hasher;
        let stored_hash = user.password_hash.clone();
        let candidate = password.as_bytes().to_vec();
        let is_valid =
            tokio::task::spawn_blocking(move || hasher.verify(&stored_hash, &candidate))
                .await
                .map_err(|e| AuthError::internal(operation, e))?;

        if !is_valid {
            tracing::info!(user_id = user.id, "Invalid password");
            return Err(AuthError::InvalidCredentials { operation });
        }

        // Looked up only after the password check so an unknown app id
        // reveals nothing about the credentials.
        let app = self
            .bounded(self.store.find_app_by_id(app_id))
            .await
            .map_err(|e| match e {
                StorageError::AppNotFound => {
                    tracing::warn!(user_id = user.id, "App not found");
                    AuthError::InvalidApp { operation }
                }
                e => {
                    tracing::error!(error = %e, "Failed to look up app");
                    AuthError::internal(operation, e)
                }
            })?;

        let token = self
            .token_issuer
            .issue(user.id, &user.email, app.id, self.token_ttl)
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to issue token");
                AuthError::internal(operation, e)
            })?;

        tracing::info!(user_id = user.id, app_id = app.id, "User logged in");

        Ok(token)
    }

    #[tracing::instrument(name = "is_admin", skip(self))]
    async fn is_admin(&self, user_id: i64) -> Result<bool, AuthError> {
        let operation = Operation::IsAdmin;

        let is_admin = self
            .bounded(self.store.is_admin(user_id))
            .await
            .map_err(|e| match e {
                StorageError::UserNotFound => {
                    tracing::warn!("User not found");
                    AuthError::UserNotFound { operation }
                }
                e => {
                    tracing::error!(error = %e, "Failed to check admin flag");
                    AuthError::internal(operation, e)
                }
            })?;

        tracing::info!(is_admin, "Checked admin flag");

        Ok(is_admin)
    }
}

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqliteJournalMode;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::domain::identity::errors::StorageError;
use crate::domain::identity::models::App;
use crate::domain::identity::models::User;
use crate::domain::identity::ports::CredentialStore;

pub struct SqliteCredentialStore {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    pass_hash: Vec<u8>,
    is_admin: bool,
}

#[derive(sqlx::FromRow)]
struct AppRow {
    id: i64,
    name: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            password_hash: row.pass_hash,
            is_admin: row.is_admin,
        }
    }
}

impl From<AppRow> for App {
    fn from(row: AppRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

impl SqliteCredentialStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open the database at `path`, creating the file if missing.
    ///
    /// An in-memory database lives as long as its single pooled connection,
    /// so the pool is pinned to one connection that is never recycled.
    pub async fn connect(path: &str) -> Result<Self, sqlx::Error> {
        let in_memory = path.contains(":memory:");

        let options = SqliteConnectOptions::from_str(path)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));
        let options = if in_memory {
            options
        } else {
            options.journal_mode(SqliteJournalMode::Wal)
        };

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options.connect_with(options).await?;

        Ok(Self::new(pool))
    }

    /// Apply the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl CredentialStore for SqliteCredentialStore {
    async fn save_user(&self, email: &str, password_hash: &[u8]) -> Result<i64, StorageError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (email, pass_hash)
            VALUES (?, ?)
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return StorageError::UserAlreadyExists;
                }
            }
            StorageError::Database(e.to_string())
        })?;

        Ok(result.last_insert_rowid())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<User, StorageError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, pass_hash, is_admin
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Database(e.to_string()))?;

        row.map(User::from).ok_or(StorageError::UserNotFound)
    }

    async fn is_admin(&self, user_id: i64) -> Result<bool, StorageError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT is_admin
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Database(e.to_string()))?
        .ok_or(StorageError::UserNotFound)
    }

    async fn find_app_by_id(&self, app_id: i64) -> Result<App, StorageError> {
        let row = sqlx::query_as::<_, AppRow>(
            r#"
            SELECT id, name
            FROM apps
            WHERE id = ?
            "#,
        )
        .bind(app_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Database(e.to_string()))?;

        row.map(App::from).ok_or(StorageError::AppNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> SqliteCredentialStore {
        let store = SqliteCredentialStore::connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");
        store.migrate().await.expect("Failed to run migrations");
        store
    }

    #[tokio::test]
    async fn test_save_and_find_user() {
        let store = store().await;

        let id = store
            .save_user("a@x.com", b"hash-bytes")
            .await
            .expect("Failed to save user");
        assert_eq!(id, 1);

        let user = store
            .find_user_by_email("a@x.com")
            .await
            .expect("Failed to find user");
        assert_eq!(user.id, 1);
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.password_hash, b"hash-bytes".to_vec());
        assert!(!user.is_admin);
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let store = store().await;

        let first = store.save_user("a@x.com", b"h1").await.unwrap();
        let second = store.save_user("b@x.com", b"h2").await.unwrap();
        assert_eq!(second, first + 1);
    }

    #[tokio::test]
    async fn test_save_duplicate_email() {
        let store = store().await;

        store.save_user("a@x.com", b"h1").await.unwrap();
        let result = store.save_user("a@x.com", b"h2").await;

        assert!(matches!(result, Err(StorageError::UserAlreadyExists)));
    }

    #[tokio::test]
    async fn test_find_unknown_user() {
        let store = store().await;

        let result = store.find_user_by_email("nobody@x.com").await;
        assert!(matches!(result, Err(StorageError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_is_admin() {
        let store = store().await;

        let id = store.save_user("a@x.com", b"h1").await.unwrap();
        assert!(!store.is_admin(id).await.unwrap());

        sqlx::query("UPDATE users SET is_admin = TRUE WHERE id = ?")
            .bind(id)
            .execute(store.pool())
            .await
            .unwrap();
        assert!(store.is_admin(id).await.unwrap());

        let result = store.is_admin(id + 1).await;
        assert!(matches!(result, Err(StorageError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_find_app_by_id() {
        let store = store().await;

        sqlx::query("INSERT INTO apps (id, name) VALUES (?, ?)")
            .bind(1_i64)
            .bind("test-app")
            .execute(store.pool())
            .await
            .unwrap();

        let app = store.find_app_by_id(1).await.unwrap();
        assert_eq!(
            app,
            App {
                id: 1,
                name: "test-app".to_string()
            }
        );

        let result = store.find_app_by_id(2).await;
        assert!(matches!(result, Err(StorageError::AppNotFound)));
    }
}

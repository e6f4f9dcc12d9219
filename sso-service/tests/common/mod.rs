#![allow(dead_code)]

use std::sync::Arc;

use auth::TokenIssuer;
use sso_service::config::Config;
use sso_service::config::ServerConfig;
use sso_service::config::StorageConfig;
use sso_service::config::TokenConfig;
use sso_service::domain::identity::service::AuthService;
use sso_service::inbound::http::router::create_router;
use sso_service::outbound::repositories::SqliteCredentialStore;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TEST_APP_ID: i64 = 1;

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<SqliteCredentialStore>,
    pub api_client: reqwest::Client,
    pub token_issuer: TokenIssuer,
}

pub fn test_config(ttl_seconds: u64) -> Config {
    Config {
        env: "local".to_string(),
        storage: StorageConfig {
            path: "sqlite::memory:".to_string(),
            timeout_ms: 5000,
        },
        token: TokenConfig {
            secret: String::from_utf8(TEST_SECRET.to_vec()).expect("Secret is valid UTF-8"),
            ttl_seconds,
        },
        server: ServerConfig {
            grpc_port: 0,
            http_port: 0,
            request_timeout_ms: 10_000,
        },
    }
}

/// Open a migrated in-memory store with one provisioned application.
pub async fn test_store() -> Arc<SqliteCredentialStore> {
    let store = SqliteCredentialStore::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    store.migrate().await.expect("Failed to run migrations");

    sqlx::query("INSERT INTO apps (id, name) VALUES (?, ?)")
        .bind(TEST_APP_ID)
        .bind("test-app")
        .execute(store.pool())
        .await
        .expect("Failed to provision test app");

    Arc::new(store)
}

/// Open a migrated file-backed store inside `dir`, using the same WAL pool
/// as a deployed service.
pub async fn test_file_store(dir: &tempfile::TempDir) -> Arc<SqliteCredentialStore> {
    let path = dir.path().join("sso.db");
    let store = SqliteCredentialStore::connect(&format!("sqlite://{}", path.display()))
        .await
        .expect("Failed to open database file");
    store.migrate().await.expect("Failed to run migrations");

    Arc::new(store)
}

/// Grant administrator privileges out of band, as an operator would.
pub async fn grant_admin(store: &SqliteCredentialStore, user_id: i64) {
    sqlx::query("UPDATE users SET is_admin = TRUE WHERE id = ?")
        .bind(user_id)
        .execute(store.pool())
        .await
        .expect("Failed to grant admin");
}

pub fn test_service(
    store: Arc<SqliteCredentialStore>,
    ttl_seconds: u64,
) -> AuthService<SqliteCredentialStore> {
    AuthService::new(
        store,
        Arc::new(TokenIssuer::new(TEST_SECRET)),
        &test_config(ttl_seconds),
    )
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let store = test_store().await;

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let auth_service = Arc::new(test_service(Arc::clone(&store), 3600));
        let router = create_router(auth_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            store,
            api_client: reqwest::Client::new(),
            token_issuer: TokenIssuer::new(TEST_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }
}

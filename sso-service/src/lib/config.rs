use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Deployment environment: `local`, `dev` or `prod`
    pub env: String,
    pub storage: StorageConfig,
    pub token: TokenConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// SQLite database location (`sqlite::memory:` for an in-memory database)
    pub path: String,
    pub timeout_ms: u64,
}

#[derive(Deserialize, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub ttl_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub grpc_port: u16,
    pub http_port: u16,
    pub request_timeout_ms: u64,
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl StorageConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl TokenConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (TOKEN__SECRET, STORAGE__PATH, etc.)
    /// 2. File at `config_path` (from `--config` or CONFIG_PATH), if given
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    pub fn load(config_path: Option<&str>) -> Result<Self, ConfigError> {
        Self::load_with(config_path, Environment::default())
    }

    /// Same layering as [`Config::load`], reading overrides from `environment`.
    pub fn load_with(
        config_path: Option<&str>,
        environment: Environment,
    ) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false));

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        let configuration = builder
            // No prefix: TOKEN__TTL_SECONDS=900 overrides token.ttl_seconds
            .add_source(environment.separator("__").try_parsing(true))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.secret.is_empty() {
            return Err(ConfigError::Message("token.secret must not be empty".into()));
        }
        if self.token.ttl_seconds == 0 {
            return Err(ConfigError::Message(
                "token.ttl_seconds must be greater than zero".into(),
            ));
        }
        if self.storage.path.is_empty() {
            return Err(ConfigError::Message("storage.path must not be empty".into()));
        }
        if self.storage.timeout_ms == 0 {
            return Err(ConfigError::Message(
                "storage.timeout_ms must be greater than zero".into(),
            ));
        }
        if self.server.request_timeout_ms == 0 {
            return Err(ConfigError::Message(
                "server.request_timeout_ms must be greater than zero".into(),
            ));
        }

        Ok(())
    }
}

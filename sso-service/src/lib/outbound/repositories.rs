pub mod credentials;

pub use credentials::SqliteCredentialStore;

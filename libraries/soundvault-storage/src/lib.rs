//! SoundVault Storage
//!
//! Durable, device-local persistence of the client's credentials: the
//! access token, the refresh token and the cached user profile.
//!
//! The store is a plain key/value surface with no validation and no expiry
//! logic. The session layer is its only writer.
//!
//! # Example
//!
//! ```rust,no_run
//! use soundvault_storage::{CredentialKey, CredentialStore, SqliteCredentialStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteCredentialStore::open("sqlite://soundvault.db", "soundvault").await?;
//!
//! store.set(CredentialKey::AccessToken, "token").await?;
//! let token = store.get(CredentialKey::AccessToken).await?;
//! assert_eq!(token.as_deref(), Some("token"));
//!
//! store.clear().await?;
//! # Ok(())
//! # }
//! ```

mod credentials;
mod error;

pub use credentials::{
    CredentialKey, CredentialStore, MemoryCredentialStore, SqliteCredentialStore,
    StoredCredentials, DEFAULT_NAMESPACE,
};
#[cfg(feature = "mock")]
pub use credentials::MockCredentialStore;
pub use error::{Result, StorageError};

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// In-memory databases get a single connection, since every connection to
/// `sqlite::memory:` opens its own empty database.
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(url = %database_url, "Creating credential store pool");

    let in_memory = database_url.contains(":memory:");
    let mut options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .busy_timeout(std::time::Duration::from_secs(30));
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let mut pool_options = SqlitePoolOptions::new().max_connections(if in_memory { 1 } else { 5 });
    if in_memory {
        pool_options = pool_options.idle_timeout(None).max_lifetime(None);
    }

    let pool = pool_options.connect_with(options).await?;

    Ok(pool)
}

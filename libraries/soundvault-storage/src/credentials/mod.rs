//! Credential keys and the store contract
//!
//! Three keys live under a fixed namespace: the access token, the refresh
//! token and the serialized user profile. They are written and cleared as a
//! unit by the session layer; the request transport only ever reads the
//! access token.

mod memory;
mod sqlite;

pub use memory::MemoryCredentialStore;
pub use sqlite::SqliteCredentialStore;

use async_trait::async_trait;

use crate::error::Result;

/// Namespace used when the caller does not pick one
pub const DEFAULT_NAMESPACE: &str = "soundvault";

/// The keys a credential store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKey {
    AccessToken,
    RefreshToken,
    User,
}

impl CredentialKey {
    /// Every key, in write order.
    pub const ALL: [CredentialKey; 3] = [
        CredentialKey::AccessToken,
        CredentialKey::RefreshToken,
        CredentialKey::User,
    ];

    /// Stable storage name of the key.
    pub fn as_str(self) -> &'static str {
        match self {
            CredentialKey::AccessToken => "accessToken",
            CredentialKey::RefreshToken => "refreshToken",
            CredentialKey::User => "user",
        }
    }
}

impl std::fmt::Display for CredentialKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of everything a store currently holds.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct StoredCredentials {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    /// Serialized user profile (JSON)
    pub user: Option<String>,
}

impl StoredCredentials {
    /// No key is present.
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none() && self.user.is_none()
    }

    /// All three keys are present.
    pub fn is_complete(&self) -> bool {
        self.access_token.is_some() && self.refresh_token.is_some() && self.user.is_some()
    }
}

impl std::fmt::Debug for StoredCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredCredentials")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("user", &self.user)
            .finish()
    }
}

/// Durable key/value persistence for credentials.
///
/// Implementations do no validation and no expiry handling.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Read a key. `Ok(None)` when it was never set or has been removed.
    async fn get(&self, key: CredentialKey) -> Result<Option<String>>;

    /// Write a key, replacing any previous value.
    async fn set(&self, key: CredentialKey, value: &str) -> Result<()>;

    /// Delete a key. Removing an absent key is not an error.
    async fn remove(&self, key: CredentialKey) -> Result<()>;

    /// Write several keys.
    ///
    /// The default writes them one after another; backends that can do so
    /// apply the whole batch atomically.
    async fn set_many(&self, entries: &[(CredentialKey, String)]) -> Result<()> {
        for (key, value) in entries {
            self.set(*key, value).await?;
        }
        Ok(())
    }

    /// Remove every credential key.
    async fn clear(&self) -> Result<()> {
        for key in CredentialKey::ALL {
            self.remove(key).await?;
        }
        Ok(())
    }

    /// Read all keys at once.
    async fn load(&self) -> Result<StoredCredentials> {
        Ok(StoredCredentials {
            access_token: self.get(CredentialKey::AccessToken).await?,
            refresh_token: self.get(CredentialKey::RefreshToken).await?,
            user: self.get(CredentialKey::User).await?,
        })
    }
}

//! In-memory credential store

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CredentialKey, CredentialStore};
use crate::error::Result;

/// Process-local store. Survives nothing but the process; meant for tests
/// and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: RwLock<HashMap<CredentialKey, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self, key: CredentialKey) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(&key).cloned())
    }

    async fn set(&self, key: CredentialKey, value: &str) -> Result<()> {
        self.entries.write().await.insert(key, value.to_string());
        Ok(())
    }

    async fn remove(&self, key: CredentialKey) -> Result<()> {
        self.entries.write().await.remove(&key);
        Ok(())
    }

    async fn set_many(&self, entries: &[(CredentialKey, String)]) -> Result<()> {
        let mut map = self.entries.write().await;
        for (key, value) in entries {
            map.insert(*key, value.clone());
        }
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.entries.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.get(CredentialKey::AccessToken).await.unwrap(), None);

        store.set(CredentialKey::AccessToken, "a1").await.unwrap();
        assert_eq!(
            store.get(CredentialKey::AccessToken).await.unwrap().as_deref(),
            Some("a1")
        );

        store.remove(CredentialKey::AccessToken).await.unwrap();
        assert_eq!(store.get(CredentialKey::AccessToken).await.unwrap(), None);

        // Removing again is fine
        store.remove(CredentialKey::AccessToken).await.unwrap();
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let store = MemoryCredentialStore::new();
        store
            .set_many(&[
                (CredentialKey::AccessToken, "a".into()),
                (CredentialKey::RefreshToken, "r".into()),
                (CredentialKey::User, "{}".into()),
            ])
            .await
            .unwrap();
        assert!(store.load().await.unwrap().is_complete());

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_empty());
    }
}

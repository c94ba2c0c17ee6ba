//! Integration tests for the `SQLite` credential store.

use soundvault_storage::{
    create_pool, run_migrations, CredentialKey, CredentialStore, SqliteCredentialStore,
    DEFAULT_NAMESPACE,
};

async fn memory_store(namespace: &str) -> SqliteCredentialStore {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();
    SqliteCredentialStore::new(pool, namespace)
}

#[tokio::test]
async fn test_set_and_get() {
    let store = memory_store(DEFAULT_NAMESPACE).await;

    store.set(CredentialKey::AccessToken, "access-1").await.unwrap();

    let value = store.get(CredentialKey::AccessToken).await.unwrap();
    assert_eq!(value.as_deref(), Some("access-1"));
}

#[tokio::test]
async fn test_get_missing_key() {
    let store = memory_store(DEFAULT_NAMESPACE).await;

    assert_eq!(store.get(CredentialKey::RefreshToken).await.unwrap(), None);
}

#[tokio::test]
async fn test_set_overwrites() {
    let store = memory_store(DEFAULT_NAMESPACE).await;

    store.set(CredentialKey::AccessToken, "old").await.unwrap();
    store.set(CredentialKey::AccessToken, "new").await.unwrap();

    let value = store.get(CredentialKey::AccessToken).await.unwrap();
    assert_eq!(value.as_deref(), Some("new"));
}

#[tokio::test]
async fn test_remove_is_idempotent() {
    let store = memory_store(DEFAULT_NAMESPACE).await;

    store.set(CredentialKey::User, r#"{"id":1}"#).await.unwrap();
    store.remove(CredentialKey::User).await.unwrap();
    store.remove(CredentialKey::User).await.unwrap();

    assert_eq!(store.get(CredentialKey::User).await.unwrap(), None);
}

#[tokio::test]
async fn test_set_many_and_clear() {
    let store = memory_store(DEFAULT_NAMESPACE).await;

    store
        .set_many(&[
            (CredentialKey::AccessToken, "a".to_string()),
            (CredentialKey::RefreshToken, "r".to_string()),
            (CredentialKey::User, r#"{"id":1,"username":"alice"}"#.to_string()),
        ])
        .await
        .unwrap();

    let loaded = store.load().await.unwrap();
    assert!(loaded.is_complete());
    assert_eq!(loaded.refresh_token.as_deref(), Some("r"));

    store.clear().await.unwrap();
    assert!(store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_namespaces_are_isolated() {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();

    let first = SqliteCredentialStore::new(pool.clone(), "first");
    let second = SqliteCredentialStore::new(pool, "second");

    first.set(CredentialKey::AccessToken, "first-token").await.unwrap();
    assert_eq!(second.get(CredentialKey::AccessToken).await.unwrap(), None);

    second.set(CredentialKey::AccessToken, "second-token").await.unwrap();
    second.clear().await.unwrap();

    let value = first.get(CredentialKey::AccessToken).await.unwrap();
    assert_eq!(value.as_deref(), Some("first-token"));
}

#[tokio::test]
async fn test_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("credentials.db").display());

    {
        let store = SqliteCredentialStore::open(&url, DEFAULT_NAMESPACE).await.unwrap();
        store.set(CredentialKey::RefreshToken, "persisted").await.unwrap();
        store.pool().close().await;
    }

    let reopened = SqliteCredentialStore::open(&url, DEFAULT_NAMESPACE).await.unwrap();
    let value = reopened.get(CredentialKey::RefreshToken).await.unwrap();
    assert_eq!(value.as_deref(), Some("persisted"));
}
